//! Package, imports and `throw`.

use jnade_parser::ast::expr::Expr;
use jnade_parser::ast::item::{ImportDecl, PackageDecl};
use jnade_parser::ast::stmt::ThrowStmt;
use jnade_parser::ast::AstNode;

use super::Walker;
use crate::item::Priority;

impl Walker<'_> {
    pub(super) fn convert_package(&mut self, package: &PackageDecl) {
        let line = self.begin_line(package.syntax());
        self.emit(line, format!("「{}」に所属。", package.name()), Priority::PACKAGE);
    }

    /// Single-type imports name only the simple type; static imports are
    /// treated the same.
    pub(super) fn convert_import(&mut self, import: &ImportDecl) {
        let line = self.begin_line(import.syntax());
        let name = import.name();
        let text = if import.is_wildcard() {
            format!("「{name}.*」を取り込む。")
        } else {
            let simple = name.rsplit('.').next().unwrap_or(&name);
            format!("「{simple}」を取り込む。")
        };
        self.emit(line, text, Priority::IMPORT);
    }

    pub(super) fn convert_throw(&mut self, stmt: &ThrowStmt) {
        let line = self.begin_line(stmt.syntax());
        let indent = self.indent.get(line).to_string();
        let message = match stmt.expr() {
            Some(Expr::New(new)) => new
                .args()
                .first()
                .and_then(|arg| self.expr.translate(arg))
                .filter(|m| !m.is_empty()),
            _ => None,
        };
        let text = match message {
            Some(message) => format!("{indent}{message}とエラー発生。"),
            None => format!("{indent}エラー発生。"),
        };
        self.emit(line, text, Priority::STATEMENT);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{translate_body, translate_text};

    #[test]
    fn package_and_imports() {
        let source = "package com.example.app;\n\nimport java.util.List;\nimport java.io.*;\nimport static java.lang.Math.max;\n\nclass A {\n}\n";
        assert_eq!(
            translate_text(source),
            "「com.example.app」に所属。\n\n「List」を取り込む。\n「java.io.*」を取り込む。\n「max」を取り込む。\n\nクラス A\nここまで。\n"
        );
    }

    #[test]
    fn throw_messages() {
        assert_eq!(
            translate_body("    throw new IllegalArgumentException(\"bad \" + n);"),
            vec!["　　「bad {n}」とエラー発生。"]
        );
        assert_eq!(
            translate_body("    throw new IllegalStateException();"),
            vec!["　　エラー発生。"]
        );
        assert_eq!(translate_body("    throw e;"), vec!["　　エラー発生。"]);
    }
}
