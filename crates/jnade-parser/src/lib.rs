//! jnade parser: recursive descent parser producing a rowan-based CST for
//! the Java subset the translator understands.
//!
//! This crate transforms the token stream from `jnade-lexer` into a
//! lossless concrete syntax tree (CST) using the `rowan` library. The CST
//! preserves all tokens including whitespace and comments, so the
//! translator can recover comment text and source lines from the same
//! tree. The typed [`ast`] layer sits on top.

pub mod ast;
pub mod cst;
pub mod error;
mod parser;
pub mod syntax_kind;

pub use cst::{SyntaxElement, SyntaxNode, SyntaxToken};
pub use error::ParseError;
pub use syntax_kind::SyntaxKind;

use jnade_lexer::Lexer;

use crate::ast::item::SourceFile;

/// Result of parsing a Java source file.
///
/// Contains the green tree (the immutable, cheap-to-clone CST) and any
/// errors encountered. Lexer errors come first. The parser itself stops
/// at its first error, so at most one parse error follows them.
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// Build the syntax tree root from the green node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The typed root of the tree.
    pub fn tree(&self) -> SourceFile {
        // The root is always built as SOURCE_FILE.
        SourceFile {
            syntax: self.syntax(),
        }
    }

    /// Lexer and parse errors, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Whether parsing completed without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a Java compilation unit into a CST.
///
/// This is the main entry point for the parser. It lexes the source,
/// parses the token stream, and returns a [`Parse`] result containing the
/// syntax tree and any errors. A tree is produced even when errors are
/// reported.
pub fn parse(source: &str) -> Parse {
    let (tokens, lex_errors) = Lexer::tokenize_with_errors(source);
    let mut p = parser::Parser::new(tokens, source);
    parser::parse_source_file(&mut p);
    let (green, parse_errors) = p.build_tree();

    let mut errors: Vec<ParseError> = lex_errors.iter().map(ParseError::from).collect();
    errors.extend(parse_errors);
    Parse { green, errors }
}

/// Render a syntax tree as an indented outline, one node or token per line.
///
/// Nodes print as `KIND@start..end`; tokens also print their text.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(node, 0, &mut out);
    out
}

fn write_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    let range = node.text_range();
    out.push_str(&format!(
        "{}{:?}@{}..{}\n",
        "  ".repeat(depth),
        node.kind(),
        u32::from(range.start()),
        u32::from(range.end())
    ));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => write_node(&n, depth + 1, out),
            rowan::NodeOrToken::Token(t) => {
                let range = t.text_range();
                out.push_str(&format!(
                    "{}{:?}@{}..{} {:?}\n",
                    "  ".repeat(depth + 1),
                    t.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    t.text()
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstNode;

    #[test]
    fn parse_produces_source_file_root() {
        let parse = parse("class A {}");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::SOURCE_FILE);
        assert!(SourceFile::cast(parse.syntax()).is_some());
        assert_eq!(parse.tree().types().count(), 1);
    }

    #[test]
    fn lex_errors_are_reported_first() {
        let parse = parse("class A { String s = \"open; }");
        assert!(!parse.ok());
        assert!(parse.errors()[0].message.contains("unterminated"));
    }

    #[test]
    fn tree_is_lossless() {
        let source = "package a.b;\n\n// note\nclass A {\n  void f() { x++; }\n}\n";
        let parse = parse(source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn debug_tree_outline() {
        let parse = parse("class A {}");
        insta::assert_snapshot!(debug_tree(&parse.syntax()), @r#"
        SOURCE_FILE@0..10
          CLASS_DECL@0..10
            MODIFIERS@0..0
            CLASS_KW@0..5 "class"
            WHITESPACE@5..6 " "
            NAME@6..7
              IDENT@6..7 "A"
            WHITESPACE@7..8 " "
            CLASS_BODY@8..10
              L_BRACE@8..9 "{"
              R_BRACE@9..10 "}"
          EOF@10..10 ""
        "#);
    }
}
