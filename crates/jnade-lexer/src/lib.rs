// jnade lexer -- lossless tokenizer for the accepted Java subset.

mod cursor;

use cursor::Cursor;
use jnade_common::error::{LexError, LexErrorKind};
use jnade_common::span::Span;
use jnade_common::token::{keyword_from_str, Token, TokenKind};

/// The jnade lexer. Converts Java source text into a stream of tokens.
///
/// Every byte of the input belongs to exactly one token: whitespace,
/// newlines and comments come out as trivia tokens. Implements
/// `Iterator<Item = Token>`; the final item is always `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Whether we have already emitted the `Eof` token.
    emitted_eof: bool,
    /// Problems found so far. Lexing never stops on an error.
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
            errors: Vec::new(),
        }
    }

    /// Convenience: tokenize the entire source into a `Vec<Token>`.
    ///
    /// The returned vector includes the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Tokenize the entire source and also return the lexer errors.
    pub fn tokenize_with_errors(source: &str) -> (Vec<Token>, Vec<LexError>) {
        let mut lexer = Lexer::new(source);
        let tokens: Vec<Token> = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    /// Produce the next token from the source.
    fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            // ── Trivia ────────────────────────────────────────────────────
            '\n' => self.single_char_token(TokenKind::Newline, start),
            c if is_blank(c) => {
                self.cursor.eat_while(is_blank);
                Token::new(TokenKind::Whitespace, start, self.cursor.pos())
            }

            // ── Single-character delimiters ───────────────────────────────
            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            '[' => self.single_char_token(TokenKind::LBracket, start),
            ']' => self.single_char_token(TokenKind::RBracket, start),
            '{' => self.single_char_token(TokenKind::LBrace, start),
            '}' => self.single_char_token(TokenKind::RBrace, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            ';' => self.single_char_token(TokenKind::Semicolon, start),
            '@' => self.single_char_token(TokenKind::At, start),
            '~' => self.single_char_token(TokenKind::Tilde, start),
            '?' => self.single_char_token(TokenKind::Question, start),
            // `>` is never fused with a following `>`; see `TokenKind::Gt`.
            '>' => self.lex_gt(start),

            // ── Multi-character operators ─────────────────────────────────
            '=' => self.one_or_two(start, '=', TokenKind::Eq, TokenKind::EqEq),
            '!' => self.one_or_two(start, '=', TokenKind::Bang, TokenKind::NotEq),
            '*' => self.one_or_two(start, '=', TokenKind::Star, TokenKind::StarEq),
            '%' => self.one_or_two(start, '=', TokenKind::Percent, TokenKind::PercentEq),
            '^' => self.one_or_two(start, '=', TokenKind::Caret, TokenKind::CaretEq),
            '<' => self.lex_lt(start),
            '&' => self.lex_amp(start),
            '|' => self.lex_pipe(start),
            '+' => self.lex_plus(start),
            '-' => self.lex_minus(start),
            ':' => self.one_or_two(start, ':', TokenKind::Colon, TokenKind::ColonColon),
            '.' => self.lex_dot(start),

            // ── Comments or division ──────────────────────────────────────
            '/' => self.lex_slash(start),

            // ── Number literals ──────────────────────────────────────────
            '0'..='9' => self.lex_number(start),

            // ── String, text block and char literals ─────────────────────
            '"' => self.lex_string(start),
            '\'' => self.lex_char(start),

            // ── Identifiers and keywords ─────────────────────────────────
            c if is_ident_start(c) => self.lex_ident(start),

            // ── Unknown character (error recovery) ───────────────────────
            c => {
                self.cursor.advance();
                let end = self.cursor.pos();
                self.error(LexErrorKind::UnexpectedCharacter(c), start, end);
                Token::new(TokenKind::Error, start, end)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn error(&mut self, kind: LexErrorKind, start: u32, end: u32) {
        self.errors.push(LexError::new(kind, Span::new(start, end)));
    }

    /// Consume one character and produce a token of the given kind.
    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Consume one character, plus `second` if it follows.
    fn one_or_two(&mut self, start: u32, second: char, one: TokenKind, two: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some(second) {
            self.cursor.advance();
            Token::new(two, start, self.cursor.pos())
        } else {
            Token::new(one, start, self.cursor.pos())
        }
    }

    /// Lex `>`, `>=`, `>>=`, `>>>=`. Bare `>>` stays two tokens.
    fn lex_gt(&mut self, start: u32) -> Token {
        if self.cursor.starts_with(">>>=") {
            self.cursor.advance_n(4);
            return Token::new(TokenKind::UshrEq, start, self.cursor.pos());
        }
        if self.cursor.starts_with(">>=") {
            self.cursor.advance_n(3);
            return Token::new(TokenKind::ShrEq, start, self.cursor.pos());
        }
        self.one_or_two(start, '=', TokenKind::Gt, TokenKind::GtEq)
    }

    /// Lex `<`, `<=`, `<<`, `<<=`.
    fn lex_lt(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("<<=") {
            self.cursor.advance_n(3);
            return Token::new(TokenKind::ShlEq, start, self.cursor.pos());
        }
        if self.cursor.starts_with("<<") {
            self.cursor.advance_n(2);
            return Token::new(TokenKind::Shl, start, self.cursor.pos());
        }
        self.one_or_two(start, '=', TokenKind::Lt, TokenKind::LtEq)
    }

    /// Lex `&`, `&&`, `&=`.
    fn lex_amp(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = match self.cursor.peek() {
            Some('&') => TokenKind::AmpAmp,
            Some('=') => TokenKind::AmpEq,
            _ => return Token::new(TokenKind::Amp, start, self.cursor.pos()),
        };
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Lex `|`, `||`, `|=`.
    fn lex_pipe(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = match self.cursor.peek() {
            Some('|') => TokenKind::PipePipe,
            Some('=') => TokenKind::PipeEq,
            _ => return Token::new(TokenKind::Pipe, start, self.cursor.pos()),
        };
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Lex `+`, `++`, `+=`.
    fn lex_plus(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = match self.cursor.peek() {
            Some('+') => TokenKind::PlusPlus,
            Some('=') => TokenKind::PlusEq,
            _ => return Token::new(TokenKind::Plus, start, self.cursor.pos()),
        };
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Lex `-`, `--`, `-=`, `->`.
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = match self.cursor.peek() {
            Some('-') => TokenKind::MinusMinus,
            Some('=') => TokenKind::MinusEq,
            Some('>') => TokenKind::Arrow,
            _ => return Token::new(TokenKind::Minus, start, self.cursor.pos()),
        };
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    /// Lex `.`, `...`, or a float literal starting with `.` (e.g. `.5`).
    fn lex_dot(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("...") {
            self.cursor.advance_n(3);
            return Token::new(TokenKind::Ellipsis, start, self.cursor.pos());
        }
        if self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.advance(); // '.'
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            self.lex_float_tail();
            return Token::new(TokenKind::FloatLiteral, start, self.cursor.pos());
        }
        self.single_char_token(TokenKind::Dot, start)
    }

    /// Lex `//` and `/* */` comments, `/` and `/=`.
    fn lex_slash(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("//") {
            self.cursor.eat_while(|c| c != '\n');
            return Token::new(TokenKind::LineComment, start, self.cursor.pos());
        }
        if self.cursor.starts_with("/*") {
            self.cursor.advance_n(2);
            loop {
                if self.cursor.starts_with("*/") {
                    self.cursor.advance_n(2);
                    break;
                }
                if self.cursor.advance().is_none() {
                    let end = self.cursor.pos();
                    self.error(LexErrorKind::UnterminatedBlockComment, start, end);
                    break;
                }
            }
            return Token::new(TokenKind::BlockComment, start, self.cursor.pos());
        }
        self.one_or_two(start, '=', TokenKind::Slash, TokenKind::SlashEq)
    }

    /// Lex an integer or floating-point literal.
    ///
    /// Handles hex/binary prefixes, underscores, exponents, and the
    /// `L`/`F`/`D` suffixes (which stay part of the token text).
    fn lex_number(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("0x") || self.cursor.starts_with("0X") {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            self.eat_int_suffix();
            return Token::new(TokenKind::IntLiteral, start, self.cursor.pos());
        }
        if self.cursor.starts_with("0b") || self.cursor.starts_with("0B") {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|c| c == '0' || c == '1' || c == '_');
            self.eat_int_suffix();
            return Token::new(TokenKind::IntLiteral, start, self.cursor.pos());
        }

        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');

        // Float: `.` followed by a digit, or an exponent, or a float suffix.
        let mut is_float = false;
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.advance(); // '.'
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            is_float = true;
        } else if self.cursor.peek() == Some('.')
            && !self.cursor.peek_next().is_some_and(|c| c == '.' || is_ident_start(c))
        {
            // `1.` is a valid double literal.
            self.cursor.advance();
            is_float = true;
        }
        if self.lex_float_tail() {
            is_float = true;
        }

        if is_float {
            Token::new(TokenKind::FloatLiteral, start, self.cursor.pos())
        } else {
            self.eat_int_suffix();
            Token::new(TokenKind::IntLiteral, start, self.cursor.pos())
        }
    }

    /// Consume an optional exponent and `f`/`d` suffix. Returns whether
    /// anything float-specific was consumed.
    fn lex_float_tail(&mut self) -> bool {
        let mut consumed = false;
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            consumed = true;
        }
        if matches!(self.cursor.peek(), Some('f' | 'F' | 'd' | 'D')) {
            self.cursor.advance();
            consumed = true;
        }
        consumed
    }

    fn eat_int_suffix(&mut self) {
        if matches!(self.cursor.peek(), Some('l' | 'L')) {
            self.cursor.advance();
        }
    }

    /// Lex a `"..."` string or a `"""` text block.
    fn lex_string(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("\"\"\"") {
            return self.lex_text_block(start);
        }
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.peek() {
                Some('"') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some_and(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('\n') | None => {
                    let end = self.cursor.pos();
                    self.error(LexErrorKind::UnterminatedString, start, end);
                    return Token::new(TokenKind::Error, start, end);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
        Token::new(TokenKind::StringLiteral, start, self.cursor.pos())
    }

    /// Lex a text block: `"""` newline ... `"""`.
    fn lex_text_block(&mut self, start: u32) -> Token {
        self.cursor.advance_n(3);
        loop {
            if self.cursor.starts_with("\"\"\"") {
                self.cursor.advance_n(3);
                break;
            }
            match self.cursor.advance() {
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(_) => {}
                None => {
                    let end = self.cursor.pos();
                    self.error(LexErrorKind::UnterminatedTextBlock, start, end);
                    return Token::new(TokenKind::Error, start, end);
                }
            }
        }
        Token::new(TokenKind::TextBlock, start, self.cursor.pos())
    }

    /// Lex a `'c'` character literal (escapes included).
    fn lex_char(&mut self, start: u32) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.peek() {
                Some('\'') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some_and(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('\n') | None => {
                    let end = self.cursor.pos();
                    self.error(LexErrorKind::UnterminatedChar, start, end);
                    return Token::new(TokenKind::Error, start, end);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
        Token::new(TokenKind::CharLiteral, start, self.cursor.pos())
    }

    /// Lex an identifier or keyword.
    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume first char
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());

        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, start, self.cursor.pos())
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

/// Horizontal whitespace, including the ideographic space used for
/// full-width indentation.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\u{000C}' | '\u{3000}')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
