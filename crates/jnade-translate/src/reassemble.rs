//! Merge translated items back into the source's line layout.

use rustc_hash::FxHashMap;

use crate::item::Item;

/// Produce the output lines.
///
/// For every physical source line, the texts of the items anchored there
/// are emitted in `(priority, insertion)` order. A line without items
/// becomes an empty output line if it is blank in the source and
/// disappears otherwise. Items on line 0 or past the end of the source
/// are dropped.
pub fn reassemble(items: &[Item], source: &str) -> Vec<String> {
    let source_lines: Vec<&str> = source.lines().collect();
    let line_count = source_lines.len() as u32;

    let mut buckets: FxHashMap<u32, Vec<(usize, &Item)>> = FxHashMap::default();
    for (index, item) in items.iter().enumerate() {
        if item.line == 0 || item.line > line_count {
            tracing::trace!(line = item.line, text = %item.text, "dropping item");
            continue;
        }
        buckets.entry(item.line).or_default().push((index, item));
    }

    let mut out = Vec::new();
    for (i, text) in source_lines.iter().enumerate() {
        let line = i as u32 + 1;
        match buckets.get_mut(&line) {
            Some(bucket) => {
                bucket.sort_by_key(|(index, item)| (item.priority, *index));
                out.extend(bucket.iter().map(|(_, item)| item.text.clone()));
            }
            None if is_blank(text) => out.push(String::new()),
            None => {}
        }
    }
    out
}

/// Blank means only ASCII whitespace and ideographic spaces.
fn is_blank(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_whitespace() || c == '\u{3000}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Priority;

    #[test]
    fn items_sort_by_priority_then_insertion() {
        let items = vec![
            Item::new(1, "close", Priority::BLOCK_CLOSE),
            Item::new(1, "first", Priority::STATEMENT),
            Item::new(1, "second", Priority::STATEMENT),
            Item::new(1, "branch", Priority::BRANCH),
        ];
        assert_eq!(
            reassemble(&items, "x\n"),
            vec!["branch", "first", "second", "close"]
        );
    }

    #[test]
    fn blank_lines_survive_and_code_lines_vanish() {
        let items = vec![Item::new(3, "c", Priority::STATEMENT)];
        let source = "a\n  \nb\n\u{3000}\nd";
        assert_eq!(reassemble(&items, source), vec!["", "c", ""]);
    }

    #[test]
    fn out_of_range_items_are_dropped() {
        let items = vec![
            Item::new(0, "nowhere", Priority::STATEMENT),
            Item::new(9, "too far", Priority::STATEMENT),
            Item::new(1, "kept", Priority::STATEMENT),
        ];
        assert_eq!(reassemble(&items, "x\n"), vec!["kept"]);
    }

    #[test]
    fn empty_source_gives_empty_output() {
        assert!(reassemble(&[], "").is_empty());
    }
}
