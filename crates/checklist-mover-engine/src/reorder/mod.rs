//! Reordering of completed checklist items.
//!
//! A document is read as a flat sequence of lines. Every maximal run of
//! checklist lines is a block; each block either sends its completed items
//! to the bottom or hides them in the [`HiddenStore`]. Nothing else in the
//! document is touched. When the global policy stops hiding, the store's
//! entries for the document are spliced back in near where they came from.

mod restore;

use crate::checklist::{ChecklistLine, Directive};
use crate::store::{HiddenEntry, HiddenStore};

/// Global hide-or-move default for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub hide_completed: bool,
}

impl Policy {
    pub fn hide() -> Self {
        Self {
            hide_completed: true,
        }
    }

    pub fn move_to_bottom() -> Self {
        Self {
            hide_completed: false,
        }
    }
}

/// Decision taken for one block after applying any override marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPolicy {
    Hide,
    Move,
}

impl BlockPolicy {
    pub fn resolve(directive: Option<Directive>, policy: Policy) -> Self {
        match directive {
            Some(Directive::Hide) => BlockPolicy::Hide,
            Some(Directive::Move) => BlockPolicy::Move,
            None if policy.hide_completed => BlockPolicy::Hide,
            None => BlockPolicy::Move,
        }
    }
}

/// Result of a reorder pass, with counts for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    /// Completed items emitted after the open items of their block.
    pub moved: usize,
    /// Completed items removed from the text and added to the store.
    pub hidden: usize,
    /// Previously hidden items put back into the text.
    pub restored: usize,
}

/// Reorder `text` under `policy`, updating `store` for `document_id`.
///
/// Returns only the new text; see [`reorder`] for the counts.
pub fn transform(text: &str, document_id: &str, policy: Policy, store: &mut HiddenStore) -> String {
    reorder(text, document_id, policy, store).text
}

pub fn reorder(
    text: &str,
    document_id: &str,
    policy: Policy,
    store: &mut HiddenStore,
) -> Transformed {
    // Drained up front: scanning never reads the store, and restoring needs
    // the entries to outlive the output lines that borrow them.
    let pending = if policy.hide_completed {
        Vec::new()
    } else {
        store.drain_all(document_id)
    };

    let lines = split_lines(text);
    let mut scan = scan_blocks(&lines, policy);

    let mut restored = 0;
    if !pending.is_empty() {
        let retained = restore::splice_hidden(
            &mut scan.output,
            &mut scan.hide_zone,
            &scan.kept,
            &pending,
        );
        restored = pending.len() - retained.len();
        if !retained.is_empty() {
            log::debug!(
                "{document_id}: {} hidden item(s) stay hidden under a hide marker",
                retained.len()
            );
        }
        store.append(document_id, retained);
    }

    let hidden = scan.hidden.len();
    store.append(document_id, scan.hidden);

    Transformed {
        text: scan.output.join("\n"),
        moved: scan.moved,
        hidden,
        restored,
    }
}

/// Split on `\n` or `\r\n`. A trailing newline yields a trailing empty line.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Output of the left-to-right block scan, before any restoring.
struct Scan<'a> {
    output: Vec<&'a str>,
    /// Per original line: did it make it into `output`.
    kept: Vec<bool>,
    /// Parallel to `output`: line is a hide marker or belongs to a hide-marked block.
    hide_zone: Vec<bool>,
    hidden: Vec<HiddenEntry>,
    moved: usize,
}

fn scan_blocks<'a>(lines: &[&'a str], policy: Policy) -> Scan<'a> {
    let mut scan = Scan {
        output: Vec::with_capacity(lines.len()),
        kept: vec![false; lines.len()],
        hide_zone: Vec::with_capacity(lines.len()),
        hidden: Vec::new(),
        moved: 0,
    };

    let mut i = 0;
    while i < lines.len() {
        if !ChecklistLine::is_checklist(lines[i]) {
            // A hide marker counts on its own, even once its block is empty.
            scan.output.push(lines[i]);
            scan.hide_zone
                .push(Directive::parse(lines[i]).is_some_and(Directive::hides));
            scan.kept[i] = true;
            i += 1;
            continue;
        }

        let start = i;
        let mut items = Vec::new();
        while let Some(item) = lines.get(i).copied().and_then(ChecklistLine::parse) {
            items.push((i, item));
            i += 1;
        }

        let directive = start
            .checked_sub(1)
            .and_then(|prev| Directive::parse(lines[prev]));
        let block_policy = BlockPolicy::resolve(directive, policy);
        let hide_marked = directive.is_some_and(Directive::hides);

        emit_block(&mut scan, &items, block_policy, hide_marked);

        log::debug!(
            "block at line {start}: {} item(s), {block_policy:?}{}",
            items.len(),
            if directive.is_some() { " (marker)" } else { "" }
        );
    }

    scan
}

fn emit_block<'a>(
    scan: &mut Scan<'a>,
    items: &[(usize, ChecklistLine<'a>)],
    block_policy: BlockPolicy,
    hide_marked: bool,
) {
    let mut completed = Vec::new();

    for &(index, item) in items {
        if !item.checked {
            scan.output.push(item.text);
            scan.hide_zone.push(hide_marked);
            scan.kept[index] = true;
        } else {
            completed.push((index, item.text));
        }
    }

    match block_policy {
        BlockPolicy::Move => {
            for (index, text) in completed {
                scan.output.push(text);
                scan.hide_zone.push(hide_marked);
                scan.kept[index] = true;
                scan.moved += 1;
            }
        }
        BlockPolicy::Hide => {
            scan.hidden.extend(
                completed
                    .into_iter()
                    .map(|(index, text)| HiddenEntry::new(index, text)),
            );
        }
    }
}
