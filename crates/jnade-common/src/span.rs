use serde::Serialize;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// Every position in the front end is a byte offset into the original Java
/// source. Line numbers, which drive the whole translation, are computed on
/// demand via [`LineIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }
}

/// Start offsets of every physical line of one source file.
///
/// The translator anchors each output item to the 1-based line of a node
/// boundary, so it asks for a line per node; lookups are a binary search.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self { line_starts }
    }

    /// The 1-based line containing byte `offset`. A newline belongs to the
    /// line it ends; offsets past the end map to the last line.
    pub fn line(&self, offset: u32) -> u32 {
        // Index of the first line starting after `offset`.
        let next = self.line_starts.partition_point(|&start| start <= offset);
        next.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let idx = LineIndex::new("hello");
        assert_eq!(idx.line(0), 1);
        assert_eq!(idx.line(4), 1);
    }

    #[test]
    fn multiple_lines() {
        let idx = LineIndex::new("hello\nworld\nfoo");
        assert_eq!(idx.line(0), 1);
        assert_eq!(idx.line(6), 2);
        assert_eq!(idx.line(12), 3);
        assert_eq!(idx.line(13), 3);
    }

    #[test]
    fn newline_belongs_to_the_line_it_ends() {
        let idx = LineIndex::new("ab\ncd");
        assert_eq!(idx.line(2), 1);
        assert_eq!(idx.line(3), 2);
    }

    #[test]
    fn blank_lines_and_trailing_newline() {
        let idx = LineIndex::new("a\n\n\nb\n");
        assert_eq!(idx.line(2), 2);
        assert_eq!(idx.line(3), 3);
        assert_eq!(idx.line(4), 4);
        assert_eq!(idx.line(6), 5);
    }

    #[test]
    fn multibyte_text_is_measured_in_bytes() {
        // U+3000 is three bytes wide.
        let idx = LineIndex::new("\u{3000}a\nb");
        assert_eq!(idx.line(0), 1);
        assert_eq!(idx.line(3), 1);
        assert_eq!(idx.line(5), 2);
    }
}
