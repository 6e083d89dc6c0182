use crate::store::HiddenEntry;

/// Splice hidden entries back into `output`.
///
/// `entries` must be sorted by original index. An entry's index counts every
/// earlier entry, spliced in or held back, so its position is the number of
/// kept lines ahead of it in the current document plus the earlier entries
/// spliced in, clamped to the output length. `kept` is the snapshot taken during the scan and is
/// never updated while splicing.
///
/// An entry that would land straight after a line of a hide-marked block
/// (or its marker) is not inserted; it is returned so it can stay hidden.
pub(super) fn splice_hidden<'a>(
    output: &mut Vec<&'a str>,
    hide_zone: &mut Vec<bool>,
    kept: &[bool],
    entries: &'a [HiddenEntry],
) -> Vec<HiddenEntry> {
    let mut retained = Vec::new();
    let mut inserted = 0;

    for entry in entries {
        let current_index = entry.index.saturating_sub(inserted + retained.len());
        let position = (kept_before(kept, current_index) + inserted).min(output.len());

        if position > 0 && hide_zone[position - 1] {
            retained.push(entry.clone());
            continue;
        }

        output.insert(position, entry.text.as_str());
        hide_zone.insert(position, false);
        inserted += 1;
    }

    retained
}

/// Count of kept lines with an original index strictly below `index`.
fn kept_before(kept: &[bool], index: usize) -> usize {
    kept.iter().take(index).filter(|&&k| k).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_before_counts_prefix() {
        let kept = [true, false, true, true];
        assert_eq!(kept_before(&kept, 0), 0);
        assert_eq!(kept_before(&kept, 2), 1);
        assert_eq!(kept_before(&kept, 4), 3);
        // Past the end counts everything
        assert_eq!(kept_before(&kept, 99), 3);
    }

    #[test]
    fn test_splice_clamps_to_output_length() {
        let entries = vec![HiddenEntry::new(10, "- [x] gone")];
        let mut output = vec!["- [ ] a"];
        let mut zone = vec![false];

        let retained = splice_hidden(&mut output, &mut zone, &[true], &entries);

        assert!(retained.is_empty());
        assert_eq!(output, vec!["- [ ] a", "- [x] gone"]);
        assert_eq!(zone.len(), output.len());
    }

    #[test]
    fn test_splice_keeps_entries_in_hide_zone() {
        let entries = vec![HiddenEntry::new(2, "- [x] b")];
        let mut output = vec!["<!-- TODO-MOVER: hide -->", "- [ ] a"];
        let mut zone = vec![true, true];

        let retained = splice_hidden(&mut output, &mut zone, &[true, true, false], &entries);

        assert_eq!(retained, entries);
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_splice_held_back_entries_shift_later_ones() {
        // Original: marker, o, [x] a, [x] b, "", More, [x] c
        let entries = vec![
            HiddenEntry::new(2, "- [x] a"),
            HiddenEntry::new(3, "- [x] b"),
            HiddenEntry::new(6, "- [x] c"),
        ];
        let mut output = vec!["<!-- TODO-MOVER: hide -->", "- [ ] o", "", "More"];
        let mut zone = vec![true, true, false, false];

        let retained = splice_hidden(&mut output, &mut zone, &[true; 4], &entries);

        assert_eq!(retained, entries[..2].to_vec());
        assert_eq!(
            output,
            vec!["<!-- TODO-MOVER: hide -->", "- [ ] o", "", "More", "- [x] c"]
        );
    }

    #[test]
    fn test_splice_accounts_for_earlier_insertions() {
        // Original: a, [x] b, [x] c, "", Notes, [x] d
        let entries = vec![
            HiddenEntry::new(1, "- [x] b"),
            HiddenEntry::new(2, "- [x] c"),
            HiddenEntry::new(5, "- [x] d"),
        ];
        let mut output = vec!["- [ ] a", "", "Notes"];
        let mut zone = vec![false; 3];

        splice_hidden(&mut output, &mut zone, &[true, true, true], &entries);

        assert_eq!(
            output,
            vec!["- [ ] a", "- [x] b", "- [x] c", "", "Notes", "- [x] d"]
        );
    }

    #[test]
    fn test_splice_same_position_keeps_index_order() {
        let entries = vec![
            HiddenEntry::new(5, "- [x] five"),
            HiddenEntry::new(6, "- [x] six"),
        ];
        let mut output = vec!["- [ ] a"];
        let mut zone = vec![false];

        // Both clamp to the end; ascending order decides the tie
        splice_hidden(&mut output, &mut zone, &[true], &entries);

        assert_eq!(output, vec!["- [ ] a", "- [x] five", "- [x] six"]);
    }
}
