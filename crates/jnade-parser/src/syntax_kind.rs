//! SyntaxKind enum for the jnade CST.
//!
//! This is a superset of `TokenKind` (mapped to SCREAMING_SNAKE_CASE) plus
//! composite node kinds for CST nodes produced by the parser.

use jnade_common::token::TokenKind;

/// Every kind of syntax element in the jnade CST.
///
/// Token kinds (leaves) are mapped 1:1 from [`TokenKind`]. Composite node kinds
/// represent parser-produced tree nodes. The first two values are sentinels used
/// by the event-based parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    /// Placeholder kind for incomplete/unfinished parser events.
    TOMBSTONE = 0,
    /// Wrapper for tokens/nodes that couldn't be parsed.
    ERROR_NODE = 1,

    // ── Keywords (42) ─────────────────────────────────────────────────
    ABSTRACT_KW,
    ASSERT_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINAL_KW,
    FINALLY_KW,
    FOR_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INTERFACE_KW,
    NATIVE_KW,
    NEW_KW,
    NULL_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    STATIC_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRUE_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    // ── Operators (36) ────────────────────────────────────────────────
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    PLUS_PLUS,
    MINUS_MINUS,
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    USHR_EQ,
    EQ_EQ,
    NOT_EQ,
    LT,
    GT,
    LT_EQ,
    GT_EQ,
    SHL,
    AMP_AMP,
    PIPE_PIPE,
    BANG,
    AMP,
    PIPE,
    CARET,
    TILDE,
    QUESTION,
    ARROW,
    COLON_COLON,

    // ── Delimiters (6) ────────────────────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,

    // ── Punctuation (6) ───────────────────────────────────────────────
    COMMA,
    DOT,
    ELLIPSIS,
    COLON,
    SEMICOLON,
    AT,

    // ── Literals (5) ──────────────────────────────────────────────────
    INT_LITERAL,
    FLOAT_LITERAL,
    STRING_LITERAL,
    TEXT_BLOCK,
    CHAR_LITERAL,

    // ── Identifiers and trivia (5) ────────────────────────────────────
    IDENT,
    LINE_COMMENT,
    BLOCK_COMMENT,
    WHITESPACE,
    NEWLINE,

    // ── Special (2) ────────────────────────────────────────────────────
    EOF,
    /// Lexer error token
    ERROR,

    // ── Node kinds: items ─────────────────────────────────────────────
    /// Root node of a parsed compilation unit.
    SOURCE_FILE,
    /// `package a.b.c;`
    PACKAGE_DECL,
    /// `import a.b.C;`, `import a.b.*;`, `import static a.B.c;`
    IMPORT_DECL,
    /// Dotted name inside a package or import declaration.
    QUALIFIED_NAME,
    /// Declared name of a type, method, parameter or variable.
    NAME,
    /// Modifier keywords and annotations preceding a declaration.
    MODIFIERS,
    /// `@Name` or `@Name(args)`
    ANNOTATION,
    /// `class Name ... { ... }`
    CLASS_DECL,
    /// `interface Name ... { ... }` (also `@interface`)
    INTERFACE_DECL,
    /// `enum Name { A, B; ... }`
    ENUM_DECL,
    /// `record Name(int x) { ... }`
    RECORD_DECL,
    /// Generic parameter list on a declaration: `<T extends X>`
    TYPE_PARAMS,
    /// `extends A` or, on interfaces, `extends A, B`
    EXTENDS_CLAUSE,
    /// `implements A, B`
    IMPLEMENTS_CLAUSE,
    /// `{ members }` of a type declaration or anonymous class.
    CLASS_BODY,
    /// One constant in an enum body.
    ENUM_CONSTANT,
    /// `int x = 1, y;` at member level.
    FIELD_DECL,
    /// Method declaration, with or without a body.
    METHOD_DECL,
    /// Constructor declaration.
    CONSTRUCTOR_DECL,
    /// `(params)` of a method, constructor, record or catch-less lambda.
    PARAM_LIST,
    /// One formal parameter.
    PARAM,
    /// `throws A, B`
    THROWS_CLAUSE,
    /// `static { ... }` or `{ ... }` at member level.
    INITIALIZER_BLOCK,
    /// A type reference: `int`, `List<String>`, `int[][]`.
    TYPE,
    /// `<A, B>` type argument list, including the diamond `<>`.
    TYPE_ARGS,
    /// `name [= init]` inside a field or local declaration.
    VAR_DECLARATOR,
    /// `{a, b, c}` array initializer.
    ARRAY_INIT,

    // ── Node kinds: statements ────────────────────────────────────────
    /// `{ statements }`
    BLOCK,
    /// Local variable declaration statement.
    LOCAL_VAR_DECL,
    /// Expression statement: `expr;`
    EXPR_STMT,
    /// `if (cond) stmt [else stmt]`
    IF_STMT,
    /// `else stmt` (the statement may itself be an `if`).
    ELSE_BRANCH,
    /// Counted `for (init; cond; update) stmt`
    FOR_STMT,
    /// Initializer part of a counted for.
    FOR_INIT,
    /// Update part of a counted for.
    FOR_UPDATE,
    /// `for (T x : coll) stmt`
    FOREACH_STMT,
    /// `while (cond) stmt`
    WHILE_STMT,
    /// `do stmt while (cond);`
    DO_WHILE_STMT,
    /// `switch (x) { entries }`
    SWITCH_STMT,
    /// One `case ...:`/`default:` group or arrow rule.
    SWITCH_ENTRY,
    /// One label expression of a case.
    SWITCH_LABEL,
    /// `try [(resources)] block catch... [finally block]`
    TRY_STMT,
    /// `(resources)` of try-with-resources.
    RESOURCE_LIST,
    /// One resource declaration or reference.
    RESOURCE,
    /// `catch (T e) block`
    CATCH_CLAUSE,
    /// `T | U e` inside a catch clause.
    CATCH_PARAM,
    /// `finally block`
    FINALLY_CLAUSE,
    /// `return [expr];`
    RETURN_STMT,
    /// `break [label];`
    BREAK_STMT,
    /// `continue [label];`
    CONTINUE_STMT,
    /// `throw expr;`
    THROW_STMT,
    /// `yield expr;` inside a switch expression.
    YIELD_STMT,
    /// `assert cond [: msg];`
    ASSERT_STMT,
    /// A lone `;`.
    EMPTY_STMT,
    /// `label: stmt`
    LABELED_STMT,
    /// `synchronized (x) block`
    SYNCHRONIZED_STMT,
    /// `this(args);` or `super(args);` inside a constructor.
    EXPLICIT_CTOR_CALL,

    // ── Node kinds: expressions ───────────────────────────────────────
    /// Number, string, text block, char, boolean or null literal.
    LITERAL,
    /// Identifier used as an expression.
    NAME_REF,
    /// `this` (optionally qualified: `Outer.this`).
    THIS_EXPR,
    /// `super` as a method receiver.
    SUPER_EXPR,
    /// `(expr)`
    PAREN_EXPR,
    /// `a op b` for arithmetic, comparison, logical and bitwise ops.
    BINARY_EXPR,
    /// `-x`, `!x`, `~x`, `++x`, `--x`
    PREFIX_EXPR,
    /// `x++`, `x--`
    POSTFIX_EXPR,
    /// `a = b`, `a += b`, ...
    ASSIGN_EXPR,
    /// `c ? a : b`
    CONDITIONAL_EXPR,
    /// `x instanceof T [binding]`
    INSTANCEOF_EXPR,
    /// `(T) expr`
    CAST_EXPR,
    /// `expr.name`
    FIELD_ACCESS,
    /// `[expr.]name(args)`
    METHOD_CALL,
    /// `(args)` of a call or object creation.
    ARG_LIST,
    /// `new T(args) [class body]`
    NEW_EXPR,
    /// `new T[n][m]` or `new T[] {..}`
    ARRAY_CREATION,
    /// `[n]` dimension of an array creation.
    DIM_EXPR,
    /// `a[i]`
    INDEX_EXPR,
    /// `x -> body`, `(a, b) -> body`
    LAMBDA_EXPR,
    /// Parameter part of a lambda.
    LAMBDA_PARAMS,
    /// `Type::name`, `expr::name`
    METHOD_REF,
    /// `Type.class`
    CLASS_LITERAL,
    /// `switch` used as an expression.
    SWITCH_EXPR,
}

impl SyntaxKind {
    /// The highest discriminant in use.
    const LAST: u16 = SyntaxKind::SWITCH_EXPR as u16;

    /// Recover a kind from its rowan representation.
    pub(crate) fn from_raw(raw: u16) -> Self {
        assert!(raw <= Self::LAST, "invalid SyntaxKind discriminant {raw}");
        // Safety: SyntaxKind is #[repr(u16)] with contiguous discriminants
        // 0..=LAST, and the bound was checked above.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) }
    }

    /// Whether this kind represents trivia (tokens that don't affect parsing).
    ///
    /// Trivia tokens are whitespace, newlines, and comments. They are preserved
    /// in the CST but skipped by the parser's lookahead methods.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE
                | SyntaxKind::NEWLINE
                | SyntaxKind::LINE_COMMENT
                | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Human-readable description for diagnostics: the token's text in
    /// backticks for keywords and punctuation, the kind name otherwise.
    pub fn describe(self) -> String {
        let text = match self {
            SyntaxKind::L_PAREN => "(",
            SyntaxKind::R_PAREN => ")",
            SyntaxKind::L_BRACKET => "[",
            SyntaxKind::R_BRACKET => "]",
            SyntaxKind::L_BRACE => "{",
            SyntaxKind::R_BRACE => "}",
            SyntaxKind::COMMA => ",",
            SyntaxKind::DOT => ".",
            SyntaxKind::COLON => ":",
            SyntaxKind::SEMICOLON => ";",
            SyntaxKind::EQ => "=",
            SyntaxKind::LT => "<",
            SyntaxKind::GT => ">",
            SyntaxKind::ARROW => "->",
            SyntaxKind::IDENT => return "identifier".to_string(),
            SyntaxKind::EOF => return "end of file".to_string(),
            kind => {
                let name = format!("{kind:?}");
                return match name.strip_suffix("_KW") {
                    Some(keyword) => format!("`{}`", keyword.to_lowercase()),
                    None => name,
                };
            }
        };
        format!("`{text}`")
    }

    /// Whether this kind is an assignment operator token.
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            SyntaxKind::EQ
                | SyntaxKind::PLUS_EQ
                | SyntaxKind::MINUS_EQ
                | SyntaxKind::STAR_EQ
                | SyntaxKind::SLASH_EQ
                | SyntaxKind::PERCENT_EQ
                | SyntaxKind::AMP_EQ
                | SyntaxKind::PIPE_EQ
                | SyntaxKind::CARET_EQ
                | SyntaxKind::SHL_EQ
                | SyntaxKind::SHR_EQ
                | SyntaxKind::USHR_EQ
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            // Keywords
            TokenKind::Abstract => SyntaxKind::ABSTRACT_KW,
            TokenKind::Assert => SyntaxKind::ASSERT_KW,
            TokenKind::Break => SyntaxKind::BREAK_KW,
            TokenKind::Case => SyntaxKind::CASE_KW,
            TokenKind::Catch => SyntaxKind::CATCH_KW,
            TokenKind::Class => SyntaxKind::CLASS_KW,
            TokenKind::Continue => SyntaxKind::CONTINUE_KW,
            TokenKind::Default => SyntaxKind::DEFAULT_KW,
            TokenKind::Do => SyntaxKind::DO_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Enum => SyntaxKind::ENUM_KW,
            TokenKind::Extends => SyntaxKind::EXTENDS_KW,
            TokenKind::False => SyntaxKind::FALSE_KW,
            TokenKind::Final => SyntaxKind::FINAL_KW,
            TokenKind::Finally => SyntaxKind::FINALLY_KW,
            TokenKind::For => SyntaxKind::FOR_KW,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::Implements => SyntaxKind::IMPLEMENTS_KW,
            TokenKind::Import => SyntaxKind::IMPORT_KW,
            TokenKind::Instanceof => SyntaxKind::INSTANCEOF_KW,
            TokenKind::Interface => SyntaxKind::INTERFACE_KW,
            TokenKind::Native => SyntaxKind::NATIVE_KW,
            TokenKind::New => SyntaxKind::NEW_KW,
            TokenKind::Null => SyntaxKind::NULL_KW,
            TokenKind::Package => SyntaxKind::PACKAGE_KW,
            TokenKind::Private => SyntaxKind::PRIVATE_KW,
            TokenKind::Protected => SyntaxKind::PROTECTED_KW,
            TokenKind::Public => SyntaxKind::PUBLIC_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::Static => SyntaxKind::STATIC_KW,
            TokenKind::Super => SyntaxKind::SUPER_KW,
            TokenKind::Switch => SyntaxKind::SWITCH_KW,
            TokenKind::Synchronized => SyntaxKind::SYNCHRONIZED_KW,
            TokenKind::This => SyntaxKind::THIS_KW,
            TokenKind::Throw => SyntaxKind::THROW_KW,
            TokenKind::Throws => SyntaxKind::THROWS_KW,
            TokenKind::Transient => SyntaxKind::TRANSIENT_KW,
            TokenKind::True => SyntaxKind::TRUE_KW,
            TokenKind::Try => SyntaxKind::TRY_KW,
            TokenKind::Void => SyntaxKind::VOID_KW,
            TokenKind::Volatile => SyntaxKind::VOLATILE_KW,
            TokenKind::While => SyntaxKind::WHILE_KW,
            // Operators
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::PlusPlus => SyntaxKind::PLUS_PLUS,
            TokenKind::MinusMinus => SyntaxKind::MINUS_MINUS,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::AmpEq => SyntaxKind::AMP_EQ,
            TokenKind::PipeEq => SyntaxKind::PIPE_EQ,
            TokenKind::CaretEq => SyntaxKind::CARET_EQ,
            TokenKind::ShlEq => SyntaxKind::SHL_EQ,
            TokenKind::ShrEq => SyntaxKind::SHR_EQ,
            TokenKind::UshrEq => SyntaxKind::USHR_EQ,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::NotEq => SyntaxKind::NOT_EQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::LtEq => SyntaxKind::LT_EQ,
            TokenKind::GtEq => SyntaxKind::GT_EQ,
            TokenKind::Shl => SyntaxKind::SHL,
            TokenKind::AmpAmp => SyntaxKind::AMP_AMP,
            TokenKind::PipePipe => SyntaxKind::PIPE_PIPE,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::ColonColon => SyntaxKind::COLON_COLON,
            // Delimiters
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            // Punctuation
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::At => SyntaxKind::AT,
            // Literals
            TokenKind::IntLiteral => SyntaxKind::INT_LITERAL,
            TokenKind::FloatLiteral => SyntaxKind::FLOAT_LITERAL,
            TokenKind::StringLiteral => SyntaxKind::STRING_LITERAL,
            TokenKind::TextBlock => SyntaxKind::TEXT_BLOCK,
            TokenKind::CharLiteral => SyntaxKind::CHAR_LITERAL,
            // Identifiers and trivia
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::LineComment => SyntaxKind::LINE_COMMENT,
            TokenKind::BlockComment => SyntaxKind::BLOCK_COMMENT,
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            // Special
            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Error => SyntaxKind::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kinds_convert_to_syntax_kind() {
        let pairs = [
            (TokenKind::Class, SyntaxKind::CLASS_KW),
            (TokenKind::Instanceof, SyntaxKind::INSTANCEOF_KW),
            (TokenKind::UshrEq, SyntaxKind::USHR_EQ),
            (TokenKind::Ellipsis, SyntaxKind::ELLIPSIS),
            (TokenKind::TextBlock, SyntaxKind::TEXT_BLOCK),
            (TokenKind::BlockComment, SyntaxKind::BLOCK_COMMENT),
            (TokenKind::Error, SyntaxKind::ERROR),
        ];
        for (token, expected) in pairs {
            assert_eq!(SyntaxKind::from(token), expected);
        }
    }

    #[test]
    fn trivia_kinds_identified() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(SyntaxKind::LINE_COMMENT.is_trivia());
        assert!(SyntaxKind::BLOCK_COMMENT.is_trivia());

        assert!(!SyntaxKind::IDENT.is_trivia());
        assert!(!SyntaxKind::CLASS_KW.is_trivia());
        assert!(!SyntaxKind::SOURCE_FILE.is_trivia());
    }

    #[test]
    fn sentinel_kinds_are_first_values() {
        assert_eq!(SyntaxKind::TOMBSTONE as u16, 0);
        assert_eq!(SyntaxKind::ERROR_NODE as u16, 1);
    }

    #[test]
    fn raw_round_trip_at_bounds() {
        assert_eq!(SyntaxKind::from_raw(SyntaxKind::LAST), SyntaxKind::SWITCH_EXPR);
        assert_eq!(SyntaxKind::from_raw(1), SyntaxKind::ERROR_NODE);
    }

    #[test]
    fn describe_uses_source_text() {
        assert_eq!(SyntaxKind::SEMICOLON.describe(), "`;`");
        assert_eq!(SyntaxKind::RETURN_KW.describe(), "`return`");
        assert_eq!(SyntaxKind::IDENT.describe(), "identifier");
        assert_eq!(SyntaxKind::BLOCK.describe(), "BLOCK");
    }

    #[test]
    fn assignment_operators() {
        assert!(SyntaxKind::EQ.is_assign_op());
        assert!(SyntaxKind::PLUS_EQ.is_assign_op());
        assert!(!SyntaxKind::EQ_EQ.is_assign_op());
    }
}
