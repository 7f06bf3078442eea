//! Statement and declaration conversion.
//!
//! A single depth-first walk over the syntax tree turns every declaration
//! and statement into [`Item`]s. Constructs that own a block stamp the
//! indentation of every line they own, gaps and blank lines included,
//! before the statements inside are converted; each converter then reads
//! its own indentation back from the [`IndentTable`]. Comments only read
//! indentation, so they are converted once the walk is complete.

mod call;
mod class;
mod comment;
mod control;
mod decl;
mod leaf;
mod method;
mod switch;
mod try_catch;

use jnade_common::span::LineIndex;
use jnade_parser::ast::item::SourceFile;
use jnade_parser::ast::stmt::{Block, Stmt};
use jnade_parser::ast::AstNode;
use jnade_parser::{SyntaxNode, SyntaxToken};
use rowan::{TextRange, TextSize};
use rustc_hash::FxHashSet;

use crate::config::TranslateConfig;
use crate::expr::ExprTranslator;
use crate::indent::IndentTable;
use crate::item::{Item, Priority};

/// Convert a parsed file into unsorted items.
pub fn convert_file(file: &SourceFile, source: &str, config: &TranslateConfig) -> Vec<Item> {
    let mut walker = Walker::new(source, config);
    walker.convert_source_file(file);
    if config.comments {
        walker.convert_comments(file.syntax());
    }
    tracing::debug!(items = walker.items.len(), "conversion finished");
    walker.items
}

// ── Walker ───────────────────────────────────────────────────────────

/// State of one conversion run.
struct Walker<'a> {
    lines: LineIndex,
    config: &'a TranslateConfig,
    expr: ExprTranslator,
    /// Indentation prefix of every line converted so far.
    indent: IndentTable,
    items: Vec<Item>,
    /// Return statements already rendered by their enclosing `if`.
    owned_returns: FxHashSet<TextRange>,
}

impl<'a> Walker<'a> {
    fn new(source: &str, config: &'a TranslateConfig) -> Self {
        Walker {
            lines: LineIndex::new(source),
            config,
            expr: ExprTranslator::new(config.max_depth),
            indent: IndentTable::new(),
            items: Vec::new(),
            owned_returns: FxHashSet::default(),
        }
    }

    // ── Positions ────────────────────────────────────────────────────

    fn line_at(&self, offset: TextSize) -> u32 {
        self.lines.line(offset.into())
    }

    /// Line of the first token of `node`.
    fn begin_line(&self, node: &SyntaxNode) -> u32 {
        self.line_at(node.text_range().start())
    }

    /// Line of the last token of `node`.
    fn end_line(&self, node: &SyntaxNode) -> u32 {
        let range = node.text_range();
        if range.is_empty() {
            return self.line_at(range.start());
        }
        self.line_at(range.end() - TextSize::from(1))
    }

    fn token_line(&self, token: &SyntaxToken) -> u32 {
        self.line_at(token.text_range().start())
    }

    // ── Output ───────────────────────────────────────────────────────

    fn emit(&mut self, line: u32, text: String, priority: Priority) {
        tracing::trace!(line, priority = priority.0, text = %text, "item");
        self.items.push(Item::new(line, text, priority));
    }

    /// Indentation recorded for the first line of `node`.
    fn outer_indent(&self, node: &SyntaxNode) -> String {
        self.indent.get(self.begin_line(node)).to_string()
    }

    /// `indent` one unit deeper.
    fn nest(&self, indent: &str) -> String {
        format!("{indent}{}", self.config.indent_unit)
    }

    // ── Blocks ───────────────────────────────────────────────────────

    /// Stamp `indent` on every line inside `block` and convert its
    /// statements in order.
    ///
    /// Lines between statements (blank or comment-only) and the lines
    /// after the last statement up to the closing brace get `indent` too.
    fn process_block(&mut self, block: &Block, indent: &str) {
        let mut last = self.begin_line(block.syntax());
        for stmt in block.statements() {
            let begin = self.begin_line(stmt.syntax());
            self.indent.stamp_range(last + 1, begin.saturating_sub(1), indent);
            self.indent.set(begin, indent);
            last = self.end_line(stmt.syntax());
            self.convert_stmt(&stmt);
        }
        let end = self.end_line(block.syntax());
        self.indent.stamp_range(last + 1, end.saturating_sub(1), indent);
    }

    /// The body of a loop or branch: a block is processed at `indent`, a
    /// single statement has its lines stamped and is converted in place.
    fn process_body(&mut self, body: &Stmt, indent: &str) {
        match body {
            Stmt::Block(block) => self.process_block(block, indent),
            other => {
                let node = other.syntax();
                self.indent
                    .stamp_range(self.begin_line(node), self.end_line(node), indent);
                self.convert_stmt(other);
            }
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn convert_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                let indent = self.outer_indent(block.syntax());
                self.process_block(block, &indent);
            }
            Stmt::LocalVar(decl) => self.convert_local_var(decl),
            Stmt::LocalType(decl) => {
                let indent = self.outer_indent(decl.syntax());
                self.convert_type(decl, &indent);
            }
            Stmt::Expr(stmt) => self.convert_expr_stmt(stmt),
            Stmt::If(stmt) => self.convert_if(stmt),
            Stmt::For(stmt) => self.convert_for(stmt),
            Stmt::Foreach(stmt) => self.convert_foreach(stmt),
            Stmt::While(stmt) => self.convert_while(stmt),
            Stmt::DoWhile(stmt) => self.convert_do_while(stmt),
            Stmt::Switch(switch) => self.convert_switch(switch),
            Stmt::Try(stmt) => self.convert_try(stmt),
            Stmt::Return(stmt) => self.convert_return(stmt),
            Stmt::Break(stmt) => self.convert_jump(stmt.syntax(), "抜ける。"),
            Stmt::Continue(stmt) => self.convert_jump(stmt.syntax(), "続ける。"),
            Stmt::Throw(stmt) => self.convert_throw(stmt),
            Stmt::Labeled(stmt) => {
                if let Some(body) = stmt.body() {
                    let indent = self.outer_indent(stmt.syntax());
                    self.process_body(&body, &indent);
                }
            }
            Stmt::Synchronized(stmt) => {
                if let Some(block) = stmt.block() {
                    let indent = self.outer_indent(stmt.syntax());
                    self.process_block(&block, &indent);
                }
            }
            Stmt::ExplicitCtorCall(call) => self.convert_ctor_call(call),
            Stmt::Yield(_) | Stmt::Assert(_) | Stmt::Empty(_) => {
                tracing::trace!(kind = ?stmt.syntax().kind(), "statement has no rendering");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{translate_body, translate_text};

    #[test]
    fn blank_lines_are_kept_and_code_lines_are_replaced() {
        let out = translate_text("class A {\n\n  int x = 1;\n}\n");
        assert_eq!(out, "クラス A\n\n　x は 1。\nここまで。\n");
    }

    #[test]
    fn nested_blocks_indent_one_unit_per_level() {
        let body = "    while (a) {\n      for (int i = 0; i < n; i++) {\n        f(i);\n      }\n    }";
        assert_eq!(
            translate_body(body),
            vec![
                "　　(aが真)の間",
                "　　　iを0から(i < n)まで(i + 1)を繰り返す",
                "　　　　f(i)。",
                "　　　ここまで。",
                "　　ここまで。",
            ]
        );
    }

    #[test]
    fn plain_block_keeps_its_indentation() {
        let body = "    {\n      f();\n    }";
        assert_eq!(translate_body(body), vec!["　　f。"]);
    }

    #[test]
    fn labeled_loop_is_walked() {
        let body = "    outer:\n    while (a) {\n      break outer;\n    }";
        assert_eq!(
            translate_body(body),
            vec!["　　(aが真)の間", "　　　抜ける。", "　　ここまで。"]
        );
    }

    #[test]
    fn configured_indent_unit_is_used_everywhere() {
        let config = crate::TranslateConfig {
            indent_unit: "  ".to_string(),
            ..Default::default()
        };
        let out = crate::translate("class A {\n  void m() {\n    f();\n  }\n}\n", &config)
            .unwrap()
            .to_text();
        assert_eq!(out, "クラス A\n  関数 mとは\n    f。\n  ここまで。\nここまで。\n");
    }
}
