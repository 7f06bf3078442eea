//! `switch` statements, both colon groups and arrow rules.

use jnade_parser::ast::stmt::{Stmt, Switch, SwitchEntry};
use jnade_parser::ast::{raw_text, AstNode};

use super::Walker;
use crate::item::Priority;

impl Walker<'_> {
    pub(super) fn convert_switch(&mut self, switch: &Switch) {
        let node = switch.syntax();
        let line = self.begin_line(node);
        let outer = self.indent.get(line).to_string();
        let selector = switch
            .selector()
            .map(|s| raw_text(s.syntax()))
            .unwrap_or_default();
        self.emit(line, format!("{outer}{selector}で条件分岐："), Priority::STATEMENT);

        let case_indent = self.nest(&outer);
        let stmt_indent = self.nest(&case_indent);
        let end = self.end_line(node);

        let mut last = line;
        for entry in switch.entries() {
            let entry_line = self.begin_line(entry.syntax());
            self.indent
                .stamp_range(last + 1, entry_line.saturating_sub(1), &case_indent);
            self.indent.set(entry_line, &case_indent);
            self.convert_case_labels(&entry, entry_line, &case_indent);
            last = self.convert_entry_body(&entry, entry_line, &stmt_indent);
        }
        self.indent
            .stamp_range(last + 1, end.saturating_sub(1), &case_indent);

        self.emit(end, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE);
    }

    /// `それ以外ならば：` for `default`, otherwise one line per label.
    fn convert_case_labels(&mut self, entry: &SwitchEntry, line: u32, case_indent: &str) {
        if entry.is_default() {
            self.emit(line, format!("{case_indent}それ以外ならば："), Priority::STATEMENT);
            return;
        }
        for label in entry.labels() {
            let text = label
                .expr()
                .map(|e| raw_text(e.syntax()))
                .unwrap_or_default();
            self.emit(line, format!("{case_indent}{text}ならば："), Priority::STATEMENT);
        }
    }

    /// Walk the statements under one label and return the last line used.
    fn convert_entry_body(&mut self, entry: &SwitchEntry, entry_line: u32, indent: &str) -> u32 {
        let mut last = entry_line;
        for stmt in entry.statements() {
            let begin = self.begin_line(stmt.syntax());
            if begin > last {
                self.indent.stamp_range(last + 1, begin - 1, indent);
            }
            match &stmt {
                Stmt::Break(_) => {
                    self.emit(begin, format!("{indent}抜ける。"), Priority::STATEMENT);
                }
                Stmt::Block(block) => self.process_block(block, indent),
                other => {
                    self.indent.set(begin, indent);
                    self.convert_stmt(other);
                }
            }
            last = last.max(self.end_line(stmt.syntax()));
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::translate_body;

    #[test]
    fn colon_groups() {
        let body = "    switch (day) {\n      case 1:\n      case 7:\n        rest();\n        break;\n\n      default:\n        work();\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　dayで条件分岐：",
                "　　　1ならば：",
                "　　　7ならば：",
                "　　　　rest。",
                "　　　　抜ける。",
                "",
                "　　　それ以外ならば：",
                "　　　　work。",
                "　　ここまで。",
            ]
        );
    }

    #[test]
    fn arrow_rules_with_several_labels() {
        let body = "    switch (c) {\n      case 'a', 'b' -> f();\n      default -> {\n        g();\n      }\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　cで条件分岐：",
                "　　　'a'ならば：",
                "　　　'b'ならば：",
                "　　　　f。",
                "　　　それ以外ならば：",
                "　　　　g。",
                "　　ここまで。",
            ]
        );
    }

    #[test]
    fn statements_on_the_label_line() {
        let body = "    switch (op) {\n      case \"+\": n++; break;\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　opで条件分岐：",
                "　　　\"+\"ならば：",
                "　　　　n は (n + 1)。",
                "　　　　抜ける。",
                "　　ここまで。",
            ]
        );
    }
}
