//! Event-based parser for the Java subset.
//!
//! The parser consumes a token stream and produces events (Open/Close/Advance)
//! that are later converted into a rowan green tree. This decouples parsing
//! logic from tree construction.
//!
//! # Architecture
//!
//! 1. Parse functions call `open()` to start a node, `advance()` to consume
//!    tokens, and `close()` to finish a node with its actual kind.
//! 2. Events are collected into a flat `Vec<Event>`.
//! 3. `build_tree()` converts events into a rowan `GreenNode`.
//!
//! The `open_before()` method enables wrapping a previously completed node
//! (e.g., turning `a` into `method_call(a, ., name, arg_list)`) using the
//! "forward parent" technique.
//!
//! # Trivia
//!
//! Whitespace, newlines and comments are never significant. Lookahead skips
//! them; `advance()` emits Advance events for them so they appear in the CST.
//! `open()` flushes pending trivia before starting a node, so every node
//! starts at a significant token and its text range maps straight onto the
//! source lines it spans.

pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod statements;

use jnade_common::span::Span;
use jnade_common::token::Token;

use crate::error::ParseError;
use crate::syntax_kind::SyntaxKind;

/// A parser event. Events are collected during parsing and later converted
/// into a rowan green tree by [`Parser::build_tree`].
#[derive(Debug)]
enum Event {
    /// Start a new CST node. The `kind` is initially TOMBSTONE and gets
    /// patched by `close()` with the real node kind.
    ///
    /// `forward_parent` is used by `open_before()` to indicate that this
    /// node should be opened before the node at the specified event index.
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    /// Finish the current CST node.
    Close,
    /// Consume the next raw token (significant or trivia).
    Advance,
}

/// An opaque marker for a started but not-yet-closed CST node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

/// An opaque marker for a completed (opened and closed) CST node.
/// Used by `open_before()` to wrap a previously completed node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkClosed {
    index: usize,
}

/// Event-based parser for Java source code.
///
/// # Usage
///
/// ```ignore
/// let tokens = jnade_lexer::Lexer::tokenize(source);
/// let mut parser = Parser::new(tokens, source);
/// parse_source_file(&mut parser);
/// let (green, errors) = parser.build_tree();
/// ```
pub(crate) struct Parser<'src> {
    /// All tokens from the lexer (including trivia and the final Eof).
    tokens: Vec<Token>,
    /// Current raw position in the token stream.
    pos: usize,
    /// Collected parser events.
    events: Vec<Event>,
    /// Original source text (for extracting token text via spans).
    source: &'src str,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Whether an error has been encountered (first-error-only strategy).
    has_error: bool,
}

impl<'src> Parser<'src> {
    /// Create a new parser from a token stream and source text.
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            source,
            errors: Vec::new(),
            has_error: false,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    /// Returns the SyntaxKind of the current significant token.
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Returns the SyntaxKind of the Nth significant token ahead.
    ///
    /// `nth(0)` is equivalent to `current()`. Returns `SyntaxKind::EOF`
    /// if past the end.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        match self.nth_pos(n) {
            Some(pos) => SyntaxKind::from(self.tokens[pos].kind.clone()),
            None => SyntaxKind::EOF,
        }
    }

    /// Returns the text of the Nth significant token ahead.
    pub(crate) fn nth_text(&self, n: usize) -> &str {
        match self.nth_pos(n) {
            Some(pos) => self.token_text(pos),
            None => "",
        }
    }

    /// Returns the text of the current significant token.
    pub(crate) fn current_text(&self) -> &str {
        self.nth_text(0)
    }

    /// Whether the Nth significant token is immediately followed by the
    /// next one, with no trivia in between. Used to join `>` `>` into a
    /// shift operator.
    pub(crate) fn nth_joined(&self, n: usize) -> bool {
        match self.nth_pos(n) {
            Some(pos) => self
                .tokens
                .get(pos + 1)
                .is_some_and(|next| !next.kind.is_trivia()),
            None => false,
        }
    }

    /// Returns the span of the current significant token.
    pub(crate) fn current_span(&self) -> Span {
        match self.nth_pos(0) {
            Some(pos) => self.tokens[pos].span,
            None => {
                let end = self.source.len() as u32;
                Span::new(end, end)
            }
        }
    }

    /// Check if the current significant token matches the given kind.
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Check if the current significant token matches any of the given kinds.
    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        let current = self.current();
        kinds.contains(&current)
    }

    /// Check if the current token is an identifier with the given text.
    /// Contextual keywords (`record`, `yield`, `var`) are identifiers.
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    // ── Mutation: node management ──────────────────────────────────────

    /// Start a new CST node. Returns a marker that must be passed to
    /// `close()` to finish the node.
    ///
    /// Pending trivia is consumed first (except for the root node), so the
    /// node starts at a significant token.
    pub(crate) fn open(&mut self) -> MarkOpened {
        if !self.events.is_empty() {
            self.skip_trivia();
        }
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        mark
    }

    /// Start a new CST node BEFORE a previously completed node.
    ///
    /// Instead of physically inserting into the events vec (which would
    /// invalidate indices), this sets a `forward_parent` link on the
    /// completed node's Open event.
    pub(crate) fn open_before(&mut self, completed: MarkClosed) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        if let Event::Open { forward_parent, .. } = &mut self.events[completed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    /// Close a CST node, patching its Open event with the actual kind.
    /// Returns a `MarkClosed` that can be used with `open_before()`.
    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Event::Open {
            kind: slot_kind, ..
        } = &mut self.events[m.index]
        {
            *slot_kind = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: m.index }
    }

    // ── Mutation: token consumption ────────────────────────────────────

    /// Consume the current token, emitting Advance events for all skipped
    /// trivia tokens and then for the significant token itself.
    pub(crate) fn advance(&mut self) {
        self.skip_trivia();
        if self.pos < self.tokens.len() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// If the current token matches `kind`, consume it and return true.
    /// Otherwise, emit an error and return false. Sets the error flag.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            self.error(&format!("expected {}", kind.describe()));
            false
        }
    }

    /// If the current token matches `kind`, consume it and return true.
    /// Otherwise, return false (no error emitted).
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Emit Advance events for trivia at the current position.
    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    /// Record a parse error at the current position. Sets the error flag.
    ///
    /// Only the first error is kept; later ones are usually knock-on
    /// effects of the first.
    pub(crate) fn error(&mut self, message: &str) {
        if self.has_error {
            return;
        }
        let span = self.current_span();
        self.errors.push(ParseError::new(message, span));
        self.has_error = true;
    }

    /// Record a parse error with a related span for additional context.
    pub(crate) fn error_with_related(&mut self, message: &str, related_span: Span, related_msg: &str) {
        if self.has_error {
            return;
        }
        let span = self.current_span();
        self.errors
            .push(ParseError::with_related(message, span, related_msg, related_span));
        self.has_error = true;
    }

    /// Whether the parser has encountered an error.
    /// Parse functions should check this and bail early.
    pub(crate) fn has_error(&self) -> bool {
        self.has_error
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Raw position of the Nth significant token at or after `self.pos`.
    fn nth_pos(&self, n: usize) -> Option<usize> {
        let mut remaining = n;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            if !self.tokens[pos].kind.is_trivia() {
                if remaining == 0 {
                    return Some(pos);
                }
                remaining -= 1;
            }
            pos += 1;
        }
        None
    }

    fn token_text(&self, pos: usize) -> &str {
        let span = &self.tokens[pos].span;
        &self.source[span.start as usize..span.end as usize]
    }

    // ── Tree building ──────────────────────────────────────────────────

    /// Convert collected events into a rowan `GreenNode` and errors.
    ///
    /// Forward parents: when `open_before(completed)` is called, the completed
    /// node's Open event gets a `forward_parent` link pointing to the wrapping
    /// Open event. During tree building, when we encounter such an Open, we
    /// follow the chain, collect all kinds, and open nodes in reverse order
    /// (outermost wrapper first). The wrapper Open events are then marked as
    /// TOMBSTONE so they are skipped when encountered later.
    pub(crate) fn build_tree(mut self) -> (rowan::GreenNode, Vec<ParseError>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos: usize = 0;
        let mut forward_parents: Vec<(usize, SyntaxKind)> = Vec::new();

        for i in 0..self.events.len() {
            match self.events[i] {
                Event::Open {
                    kind,
                    forward_parent,
                } => {
                    if forward_parent.is_some() {
                        forward_parents.clear();
                        let mut current = i;
                        while let Event::Open {
                            kind,
                            forward_parent,
                        } = self.events[current]
                        {
                            forward_parents.push((current, kind));
                            match forward_parent {
                                Some(next) => current = next,
                                None => break,
                            }
                        }

                        for &(fp_idx, _) in forward_parents.iter().skip(1) {
                            if let Event::Open {
                                ref mut kind,
                                ref mut forward_parent,
                            } = self.events[fp_idx]
                            {
                                *kind = SyntaxKind::TOMBSTONE;
                                *forward_parent = None;
                            }
                        }
                        if let Event::Open {
                            ref mut forward_parent,
                            ..
                        } = self.events[i]
                        {
                            *forward_parent = None;
                        }

                        for &(_, fk) in forward_parents.iter().rev() {
                            if fk != SyntaxKind::TOMBSTONE {
                                builder.start_node(rowan::SyntaxKind(fk as u16));
                            }
                        }
                    } else if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Close => {
                    builder.finish_node();
                }
                Event::Advance => {
                    if let Some(token) = self.tokens.get(token_pos) {
                        let syntax_kind = SyntaxKind::from(token.kind.clone());
                        let text =
                            &self.source[token.span.start as usize..token.span.end as usize];
                        builder.token(rowan::SyntaxKind(syntax_kind as u16), text);
                        token_pos += 1;
                    }
                }
            }
        }

        (builder.finish(), self.errors)
    }
}

// ── Top-level parsing ──────────────────────────────────────────────────

/// Parse a complete compilation unit.
///
/// `package` and `import` declarations come first, followed by any number
/// of type declarations. After the first error the rest of the input is
/// folded into the root node unparsed.
pub(crate) fn parse_source_file(p: &mut Parser) {
    let root = p.open();

    if items::at_package_decl(p) {
        items::parse_package_decl(p);
    }

    while !p.has_error() {
        match p.current() {
            SyntaxKind::SEMICOLON => p.advance(),
            SyntaxKind::IMPORT_KW => items::parse_import_decl(p),
            SyntaxKind::EOF => break,
            _ => items::parse_type_decl(p),
        }
    }

    // Consume remaining tokens (including EOF).
    while !p.at(SyntaxKind::EOF) {
        p.advance();
    }
    p.advance(); // EOF, plus any trailing trivia

    p.close(root, SyntaxKind::SOURCE_FILE);
}
