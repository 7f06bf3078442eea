//! Per-line indentation prefixes.
//!
//! Block converters record the prefix of every line they own before the
//! statements on those lines are converted; leaf converters and the
//! comment pass read it back. A table lives for exactly one translation.

use rustc_hash::FxHashMap;

/// Map from 1-based source line to indentation prefix.
#[derive(Debug, Default)]
pub struct IndentTable {
    lines: FxHashMap<u32, String>,
}

impl IndentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Record `prefix` for `line`. The last write wins.
    pub fn set(&mut self, line: u32, prefix: &str) {
        if line == 0 {
            return;
        }
        tracing::trace!(line, prefix, "indent");
        self.lines.insert(line, prefix.to_string());
    }

    /// The prefix recorded for `line`, or `""`.
    pub fn get(&self, line: u32) -> &str {
        self.lines.get(&line).map(String::as_str).unwrap_or("")
    }

    /// Record `prefix` for every line in `from..=to`. No-op when `from > to`.
    pub fn stamp_range(&mut self, from: u32, to: u32, prefix: &str) {
        for line in from..=to {
            self.set(line, prefix);
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lines_have_no_prefix() {
        let table = IndentTable::new();
        assert_eq!(table.get(3), "");
    }

    #[test]
    fn last_write_wins() {
        let mut table = IndentTable::new();
        table.set(2, "　");
        table.set(2, "　　");
        assert_eq!(table.get(2), "　　");
    }

    #[test]
    fn stamp_range_is_inclusive() {
        let mut table = IndentTable::new();
        table.stamp_range(2, 4, "　");
        assert_eq!(table.get(1), "");
        assert_eq!(table.get(2), "　");
        assert_eq!(table.get(4), "　");
        assert_eq!(table.get(5), "");
    }

    #[test]
    fn reversed_range_is_a_no_op() {
        let mut table = IndentTable::new();
        table.stamp_range(5, 4, "　");
        assert!(table.is_empty());
    }

    #[test]
    fn line_zero_is_ignored() {
        let mut table = IndentTable::new();
        table.set(0, "　");
        assert!(table.is_empty());
        table.set(1, "　");
        table.clear();
        assert_eq!(table.len(), 0);
    }
}
