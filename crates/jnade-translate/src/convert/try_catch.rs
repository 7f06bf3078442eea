//! `try` / `catch` / `finally`, including try-with-resources.

use jnade_parser::ast::stmt::{CatchClause, Resource, TryStmt};
use jnade_parser::ast::AstNode;

use super::Walker;
use crate::item::Priority;

/// Exception types with a Nadeshiko name. Others keep their own name.
const ERROR_NAMES: &[(&str, &str)] = &[
    ("IOException", "ファイルエラー"),
    ("IllegalArgumentException", "不正な引数エラー"),
    ("Exception", "基本エラー"),
];

impl Walker<'_> {
    pub(super) fn convert_try(&mut self, stmt: &TryStmt) {
        let node = stmt.syntax();
        let outer = self.outer_indent(node);
        let inner = self.nest(&outer);

        if let Some(block) = stmt.block() {
            let line = self.begin_line(block.syntax());
            self.emit(line, format!("{outer}エラー監視"), Priority::STATEMENT);
            for resource in stmt.resources() {
                self.convert_resource(&resource, &inner);
            }
            self.process_block(&block, &inner);
        }

        for clause in stmt.catches() {
            self.convert_catch(&clause, &outer, &inner);
        }

        if let Some(block) = stmt.finally().and_then(|f| f.block()) {
            let line = self.begin_line(block.syntax());
            self.emit(line, format!("{outer}後処理"), Priority::STATEMENT);
            self.process_block(&block, &inner);
        }

        let end = self.end_line(node);
        self.emit(end, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE);
    }

    /// `name は value。` for a declared resource whose initializer translates.
    fn convert_resource(&mut self, resource: &Resource, indent: &str) {
        let Some(declarator) = resource.declarator() else {
            return;
        };
        let Some(value) = declarator.init().and_then(|e| self.expr.translate(&e)) else {
            return;
        };
        let line = self.begin_line(resource.syntax());
        self.emit(
            line,
            format!("{indent}{} は {value}。", declarator.name()),
            Priority::STATEMENT,
        );
    }

    fn convert_catch(&mut self, clause: &CatchClause, outer: &str, inner: &str) {
        let line = self.begin_line(clause.syntax());
        let (var, error) = clause
            .param()
            .map(|p| {
                let first = p.types().next().map(|t| t.text()).unwrap_or_default();
                (p.name(), error_name(&first))
            })
            .unwrap_or_default();
        self.emit(
            line,
            format!("{outer}エラー {var} が {error} ならば"),
            Priority::STATEMENT,
        );
        if let Some(block) = clause.block() {
            self.process_block(&block, inner);
        }
    }
}

fn error_name(java: &str) -> String {
    ERROR_NAMES
        .iter()
        .find(|(from, _)| *from == java)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| java.to_string())
}

#[cfg(test)]
mod tests {
    use super::error_name;
    use crate::test_support::translate_body;

    #[test]
    fn try_catch_finally() {
        let body = "    try {\n      f();\n    } catch (IOException e) {\n      e.printStackTrace();\n    } catch (RuntimeException | Error e) {\n      g();\n    } finally {\n      h();\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　エラー監視",
                "　　　f。",
                "　　エラー e が ファイルエラー ならば",
                "　　　エラー詳細出力。",
                "　　エラー e が RuntimeException ならば",
                "　　　g。",
                "　　後処理",
                "　　　h。",
                "　　ここまで。",
            ]
        );
    }

    #[test]
    fn resources_are_declared_inside_the_watch() {
        let body = "    try (Scanner in = new Scanner(System.in)) {\n      f();\n    } catch (Exception e) {\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　エラー監視",
                "　　　in は 入力器。",
                "　　　f。",
                "　　エラー e が 基本エラー ならば",
                "　　ここまで。",
            ]
        );
    }

    #[test]
    fn known_error_names() {
        assert_eq!(error_name("IllegalArgumentException"), "不正な引数エラー");
        assert_eq!(error_name("SQLException"), "SQLException");
    }
}
