//! Output items: one translated line anchored to a source line.

/// Ordering tier of an [`Item`] among the items of the same source line.
///
/// Lower values print first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u16);

impl Priority {
    pub const COMMENT: Priority = Priority(5);
    pub const PACKAGE: Priority = Priority(5);
    pub const IMPORT: Priority = Priority(5);
    /// `もし` / `違えば` lines of an if chain.
    pub const BRANCH: Priority = Priority(5);
    pub const METHOD_HEADER: Priority = Priority(10);
    /// Marker annotation line such as `Web応答用。`.
    pub const MARKER: Priority = Priority(15);
    /// Class, entry point and constructor headers.
    pub const TYPE_HEADER: Priority = Priority(20);
    pub const TYPE_CLOSE: Priority = Priority(21);
    pub const STATEMENT: Priority = Priority(30);
    pub const RETURN: Priority = Priority(35);
    pub const BLOCK_CLOSE: Priority = Priority(50);
    /// Close of an if chain; always the last thing on its line.
    pub const END_OF_CONSTRUCT: Priority = Priority(999);
}

/// A single translated line.
///
/// `text` already carries its indentation. `line` is the 1-based source
/// line the item is printed at; 0 means the position is unknown and the
/// item is dropped during reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub line: u32,
    pub text: String,
    pub priority: Priority,
}

impl Item {
    pub fn new(line: u32, text: impl Into<String>, priority: Priority) -> Self {
        Self {
            line,
            text: text.into(),
            priority,
        }
    }
}
