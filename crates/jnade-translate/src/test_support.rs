//! Fixtures shared by the unit tests of this crate.

use jnade_parser::ast::expr::Expr;
use jnade_parser::ast::stmt::ExprStmt;
use jnade_parser::ast::AstNode;
use jnade_parser::SyntaxKind;

use crate::{translate, TranslateConfig};

/// The expression of the first expression statement in `snippet`, parsed
/// inside a method body.
///
/// A plain `x = value` statement yields `value`, so tests can write
/// expressions that are not valid statements on their own. The value is
/// then nested in an assignment, as it would be in real code.
pub(crate) fn first_expr(snippet: &str) -> Expr {
    let source = format!("class T {{ void m() {{ {snippet}; }} }}");
    let parse = jnade_parser::parse(&source);
    assert!(parse.ok(), "`{snippet}` failed to parse: {:?}", parse.errors());
    let stmt = parse
        .syntax()
        .descendants()
        .find_map(ExprStmt::cast)
        .expect("snippet has an expression statement");
    let expr = stmt.expr().expect("statement has an expression");
    match &expr {
        Expr::Assign(assign) if assign.op() == Some(SyntaxKind::EQ) => {
            assign.value().expect("assignment has a value")
        }
        _ => expr,
    }
}

/// Translate a whole file with the default configuration.
pub(crate) fn translate_text(source: &str) -> String {
    translate(source, &TranslateConfig::default())
        .expect("source parses")
        .to_text()
}

/// Translate `body` as the statements of `void m()` inside `class T`.
///
/// Only the lines of the body are returned, so the class and method
/// wrapper lines do not clutter the expectation.
pub(crate) fn translate_body(body: &str) -> Vec<String> {
    let source = format!("class T {{\n  void m() {{\n{body}\n  }}\n}}\n");
    let text = translate_text(&source);
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    // Header lines: `クラス T`, `　関数 mとは`; footer: `　ここまで。`, `ここまで。`.
    lines[2..lines.len() - 2].to_vec()
}
