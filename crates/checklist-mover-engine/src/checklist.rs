use regex::Regex;
use std::sync::OnceLock;

/// Checklist item: optional indent, `-`/`*`/`+`, one space, `[ ]`/`[x]`/`[X]`, one space, payload.
fn checklist_regex() -> &'static Regex {
    static CHECKLIST_REGEX: OnceLock<Regex> = OnceLock::new();
    CHECKLIST_REGEX.get_or_init(|| {
        Regex::new(r"^(\s*[-*+] \[([ xX])\] )(.*)$").expect("Invalid checklist regex")
    })
}

/// Inline directive such as `<!-- TODO-MOVER: hide -->`.
fn directive_regex() -> &'static Regex {
    static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*<!--\s*TODO-MOVER:\s*(hide|move)\s*-->\s*$")
            .expect("Invalid directive regex")
    })
}

/// A single markdown task line, borrowed from the document it was read from.
///
/// The original text is kept verbatim so the line can be written back
/// without any reformatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistLine<'a> {
    /// The whole line exactly as it appeared.
    pub text: &'a str,
    /// Indent, bullet, checkbox and the following space.
    pub marker: &'a str,
    /// Whether the checkbox holds `x` or `X`.
    pub checked: bool,
    /// Everything after the marker.
    pub payload: &'a str,
}

impl<'a> ChecklistLine<'a> {
    /// Parse a line as a checklist item, returning `None` for anything else.
    ///
    /// Only a space, `x` or `X` between the brackets counts; `- [?] foo`
    /// is an ordinary line.
    pub fn parse(text: &'a str) -> Option<Self> {
        let caps = checklist_regex().captures(text)?;
        let marker = caps.get(1)?.as_str();
        let checked = caps.get(2)?.as_str().eq_ignore_ascii_case("x");
        let payload = caps.get(3).map_or("", |m| m.as_str());

        Some(Self {
            text,
            marker,
            checked,
            payload,
        })
    }

    pub fn is_checklist(text: &str) -> bool {
        checklist_regex().is_match(text)
    }
}

/// Per-block override read from the line directly above a checklist block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Hide completed items regardless of the global setting.
    Hide,
    /// Move completed items to the bottom regardless of the global setting.
    Move,
}

impl Directive {
    /// Parse an override marker line. Matching is case-insensitive and
    /// tolerates surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = directive_regex().captures(text)?;
        let value = caps.get(1)?.as_str();
        if value.eq_ignore_ascii_case("hide") {
            Some(Directive::Hide)
        } else {
            Some(Directive::Move)
        }
    }

    pub fn hides(self) -> bool {
        matches!(self, Directive::Hide)
    }
}
