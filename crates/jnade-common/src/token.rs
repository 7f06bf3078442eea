use serde::Serialize;

use crate::span::Span;

/// A token produced by the jnade lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token from a kind and byte offsets.
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// Every kind of token in the accepted Java subset.
///
/// The lexer is lossless: whitespace, newlines and comments are tokens too,
/// so the parser can place them in the CST and every node's text range maps
/// straight back onto source offsets.
///
/// Primitive type names (`int`, `double`, ...) and contextual keywords
/// (`var`, `record`, `yield`) are plain identifiers; the parser decides what
/// they mean from their position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // ── Keywords (42) ──────────────────────────────────────────────────
    Abstract,
    Assert,
    Break,
    Case,
    Catch,
    Class,
    Continue,
    Default,
    Do,
    Else,
    Enum,
    Extends,
    False,
    Final,
    Finally,
    For,
    If,
    Implements,
    Import,
    Instanceof,
    Interface,
    Native,
    New,
    Null,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Static,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    True,
    Try,
    Void,
    Volatile,
    While,

    // ── Operators (36) ─────────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `=`
    Eq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,
    /// `<<=`
    ShlEq,
    /// `>>=`
    ShrEq,
    /// `>>>=`
    UshrEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`. Never fused into `>>`: the parser joins adjacent `>` tokens
    /// into shifts so generic argument lists can close with `>>`.
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    Shl,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `?`
    Question,
    /// `->`
    Arrow,
    /// `::`
    ColonColon,

    // ── Delimiters (6) ─────────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // ── Punctuation (6) ────────────────────────────────────────────────
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `@`
    At,

    // ── Literals (5) ───────────────────────────────────────────────────
    /// Integer literal, e.g. `42`, `0xFF`, `10L`, `1_000`.
    IntLiteral,
    /// Floating-point literal, e.g. `3.14`, `1e10`, `2.5f`.
    FloatLiteral,
    /// `"..."` string literal, quotes included.
    StringLiteral,
    /// `"""..."""` text block, delimiters included.
    TextBlock,
    /// `'c'` character literal, quotes included.
    CharLiteral,

    // ── Identifiers and trivia (5) ─────────────────────────────────────
    /// Identifier, e.g. `foo`, `String`, `int`.
    Ident,
    /// `// ...` up to (not including) the newline.
    LineComment,
    /// `/* ... */`, including `/** ... */` doc comments.
    BlockComment,
    /// Spaces, tabs, carriage returns, form feeds and `\u{3000}`.
    Whitespace,
    /// A single `\n`.
    Newline,

    // ── Special (2) ────────────────────────────────────────────────────
    /// End of file.
    Eof,
    /// Invalid/unexpected input. Used for error recovery.
    Error,
}

impl TokenKind {
    /// Whether this token carries no syntactic meaning.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}

/// Look up a keyword from its string representation.
///
/// Returns `Some(TokenKind)` if the string is a reserved Java keyword (or one
/// of the literal words `true`, `false`, `null`), `None` otherwise.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "abstract" => Some(TokenKind::Abstract),
        "assert" => Some(TokenKind::Assert),
        "break" => Some(TokenKind::Break),
        "case" => Some(TokenKind::Case),
        "catch" => Some(TokenKind::Catch),
        "class" => Some(TokenKind::Class),
        "continue" => Some(TokenKind::Continue),
        "default" => Some(TokenKind::Default),
        "do" => Some(TokenKind::Do),
        "else" => Some(TokenKind::Else),
        "enum" => Some(TokenKind::Enum),
        "extends" => Some(TokenKind::Extends),
        "false" => Some(TokenKind::False),
        "final" => Some(TokenKind::Final),
        "finally" => Some(TokenKind::Finally),
        "for" => Some(TokenKind::For),
        "if" => Some(TokenKind::If),
        "implements" => Some(TokenKind::Implements),
        "import" => Some(TokenKind::Import),
        "instanceof" => Some(TokenKind::Instanceof),
        "interface" => Some(TokenKind::Interface),
        "native" => Some(TokenKind::Native),
        "new" => Some(TokenKind::New),
        "null" => Some(TokenKind::Null),
        "package" => Some(TokenKind::Package),
        "private" => Some(TokenKind::Private),
        "protected" => Some(TokenKind::Protected),
        "public" => Some(TokenKind::Public),
        "return" => Some(TokenKind::Return),
        "static" => Some(TokenKind::Static),
        "super" => Some(TokenKind::Super),
        "switch" => Some(TokenKind::Switch),
        "synchronized" => Some(TokenKind::Synchronized),
        "this" => Some(TokenKind::This),
        "throw" => Some(TokenKind::Throw),
        "throws" => Some(TokenKind::Throws),
        "transient" => Some(TokenKind::Transient),
        "true" => Some(TokenKind::True),
        "try" => Some(TokenKind::Try),
        "void" => Some(TokenKind::Void),
        "volatile" => Some(TokenKind::Volatile),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_control_keywords() {
        let keywords = [
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("for", TokenKind::For),
            ("while", TokenKind::While),
            ("do", TokenKind::Do),
            ("switch", TokenKind::Switch),
            ("case", TokenKind::Case),
            ("default", TokenKind::Default),
            ("try", TokenKind::Try),
            ("catch", TokenKind::Catch),
            ("finally", TokenKind::Finally),
            ("return", TokenKind::Return),
            ("throw", TokenKind::Throw),
            ("instanceof", TokenKind::Instanceof),
        ];

        for (s, expected) in &keywords {
            assert_eq!(
                keyword_from_str(s),
                Some(expected.clone()),
                "keyword_from_str({s:?}) should return Some({expected:?})"
            );
        }
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("foo"), None);
        assert_eq!(keyword_from_str("int"), None); // primitive types are identifiers
        assert_eq!(keyword_from_str("var"), None); // contextual
        assert_eq!(keyword_from_str("record"), None); // contextual
        assert_eq!(keyword_from_str(""), None);
        assert_eq!(keyword_from_str("If"), None); // case-sensitive
    }

    #[test]
    fn token_new_constructor() {
        let tok = Token::new(TokenKind::Class, 10, 15);
        assert_eq!(tok.kind, TokenKind::Class);
        assert_eq!(tok.span, Span::new(10, 15));
    }

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(TokenKind::LineComment.is_trivia());
        assert!(TokenKind::BlockComment.is_trivia());
        assert!(!TokenKind::Ident.is_trivia());
        assert!(!TokenKind::Semicolon.is_trivia());
    }
}
