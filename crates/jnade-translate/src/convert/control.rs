//! `if` chains and loops.

use jnade_parser::ast::expr::Expr;
use jnade_parser::ast::stmt::{
    DoWhileStmt, ForStmt, ForeachStmt, IfStmt, ReturnStmt, Stmt, WhileStmt,
};
use jnade_parser::ast::{raw_text, AstNode};
use jnade_parser::SyntaxNode;

use super::Walker;
use crate::item::Priority;

impl Walker<'_> {
    // ── if / else if / else ──────────────────────────────────────────

    pub(super) fn convert_if(&mut self, stmt: &IfStmt) {
        let node = stmt.syntax();
        let line = self.begin_line(node);
        let outer = self.indent.get(line).to_string();

        let condition = self.if_condition(stmt);
        self.emit(line, format!("{outer}もし、({condition})ならば"), Priority::BRANCH);
        self.convert_branches(stmt, &outer);

        // One close for the whole chain, after anything else on its line.
        let end = self.end_line(node);
        self.emit(end, format!("{outer}ここまで。"), Priority::END_OF_CONSTRUCT);
    }

    /// Then-branch and else part of `stmt`, recursing through `else if`.
    fn convert_branches(&mut self, stmt: &IfStmt, outer: &str) {
        let inner = self.nest(outer);
        if let Some(then) = stmt.then_branch() {
            self.claim_sole_return(&then, &inner);
            self.process_body(&then, &inner);
        }

        let Some(else_branch) = stmt.else_branch() else {
            return;
        };
        if let Some(else_if) = else_branch.else_if() {
            let line = self.begin_line(else_if.syntax());
            let condition = self.if_condition(&else_if);
            self.emit(
                line,
                format!("{outer}違えば、もし、({condition})ならば"),
                Priority::BRANCH,
            );
            self.convert_branches(&else_if, outer);
        } else if let Some(body) = else_branch.body() {
            let line = self.begin_line(body.syntax());
            self.emit(line, format!("{outer}違えば"), Priority::BRANCH);
            self.process_body(&body, &inner);
        }
    }

    fn if_condition(&self, stmt: &IfStmt) -> String {
        stmt.condition()
            .map(|c| self.expr.condition(&c, true, true))
            .unwrap_or_default()
    }

    /// A then-branch that is only a `return` is rendered here, with the
    /// condition-side operand text, and skipped by the generic path.
    fn claim_sole_return(&mut self, then: &Stmt, inner: &str) {
        let Some(ret) = sole_return(then) else {
            return;
        };
        self.owned_returns.insert(ret.syntax().text_range());
        let line = self.begin_line(ret.syntax());
        let text = match ret.expr() {
            Some(value) => format!("{inner}{}を戻す。", self.expr.cond_operand(&value)),
            None => format!("{inner}戻す。"),
        };
        self.emit(line, text, Priority::RETURN);
    }

    // ── Loops ────────────────────────────────────────────────────────

    pub(super) fn convert_for(&mut self, stmt: &ForStmt) {
        let line = self.begin_line(stmt.syntax());
        let outer = self.indent.get(line).to_string();

        let (var, start) = stmt.init().map(|init| for_init(&init)).unwrap_or_default();
        let condition = stmt
            .condition()
            .map(|c| self.expr.condition(&c, true, true))
            .unwrap_or_default();
        let update = stmt
            .update()
            .map(|u| {
                u.exprs()
                    .map(|e| self.expr.translate_or_raw(&e))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        self.emit(
            line,
            format!("{outer}{var}を{start}から({condition})まで{update}を繰り返す"),
            Priority::STATEMENT,
        );
        self.loop_body(stmt.body(), line, &outer);
    }

    pub(super) fn convert_foreach(&mut self, stmt: &ForeachStmt) {
        let line = self.begin_line(stmt.syntax());
        let outer = self.indent.get(line).to_string();

        let var = stmt.param().map(|p| p.name()).unwrap_or_default();
        let collection = stmt
            .iterable()
            .map(|e| self.expr.translate_or_raw(&e))
            .unwrap_or_default();
        self.emit(
            line,
            format!("{outer}{collection}の各要素を{var}へ取り出して繰り返す"),
            Priority::STATEMENT,
        );
        self.loop_body(stmt.body(), line, &outer);
    }

    pub(super) fn convert_while(&mut self, stmt: &WhileStmt) {
        let line = self.begin_line(stmt.syntax());
        let outer = self.indent.get(line).to_string();

        let condition = stmt.condition();
        let text = condition
            .as_ref()
            .map(|c| self.expr.condition(c, true, true))
            .unwrap_or_default();
        // A call reads as a predicate: `(sの次の要素がある)間`.
        let suffix = match condition {
            Some(Expr::MethodCall(_)) => "間",
            _ => "の間",
        };
        self.emit(line, format!("{outer}({text}){suffix}"), Priority::STATEMENT);
        self.loop_body(stmt.body(), line, &outer);
    }

    /// `do { } while (c);` closes with its condition on the `while` line.
    pub(super) fn convert_do_while(&mut self, stmt: &DoWhileStmt) {
        let line = self.begin_line(stmt.syntax());
        let outer = self.indent.get(line).to_string();
        self.emit(line, format!("{outer}繰り返す"), Priority::STATEMENT);

        if let Some(body) = stmt.body() {
            let inner = self.nest(&outer);
            self.process_body(&body, &inner);
        }

        let condition = stmt
            .condition()
            .map(|c| self.expr.condition(&c, true, true))
            .unwrap_or_default();
        let close_line = stmt
            .while_token()
            .map(|t| self.token_line(&t))
            .unwrap_or_else(|| self.end_line(stmt.syntax()));
        self.emit(
            close_line,
            format!("{outer}({condition})の間ここまで。"),
            Priority::BLOCK_CLOSE,
        );
    }

    /// Walk a loop body one unit deeper and close the loop on the line
    /// after its last statement.
    fn loop_body(&mut self, body: Option<Stmt>, header_line: u32, outer: &str) {
        let inner = self.nest(outer);
        if let Some(body) = &body {
            self.process_body(body, &inner);
        }
        let close = self.loop_close_line(body.as_ref(), header_line);
        self.emit(close, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE);
    }

    fn loop_close_line(&self, body: Option<&Stmt>, header_line: u32) -> u32 {
        let last: Option<SyntaxNode> = match body {
            Some(Stmt::Block(block)) => block.statements().last().map(|s| s.syntax().clone()),
            Some(other) => Some(other.syntax().clone()),
            None => None,
        };
        match last {
            Some(node) => self.end_line(&node) + 1,
            None => header_line + 1,
        }
    }

    // ── Jumps ────────────────────────────────────────────────────────

    pub(super) fn convert_jump(&mut self, node: &SyntaxNode, text: &str) {
        let line = self.begin_line(node);
        let indent = self.indent.get(line).to_string();
        self.emit(line, format!("{indent}{text}"), Priority::STATEMENT);
    }
}

/// The `return` that is a branch by itself or the only statement of it.
fn sole_return(branch: &Stmt) -> Option<ReturnStmt> {
    match branch {
        Stmt::Return(ret) => Some(ret.clone()),
        Stmt::Block(block) => {
            let mut statements = block.statements();
            match (statements.next(), statements.next()) {
                (Some(Stmt::Return(ret)), None) => Some(ret),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Loop variable and start value of the first initializer, as written.
fn for_init(init: &jnade_parser::ast::stmt::ForInit) -> (String, String) {
    if let Some(decl) = init.local_var() {
        if let Some(first) = decl.declarators().next() {
            let start = first
                .init()
                .map(|e| raw_text(e.syntax()))
                .or_else(|| first.array_init().map(|a| raw_text(a.syntax())))
                .unwrap_or_default();
            return (first.name(), start);
        }
        return Default::default();
    }
    match init.exprs().next() {
        Some(Expr::Assign(assign)) => (
            assign.target().map(|t| raw_text(t.syntax())).unwrap_or_default(),
            assign.value().map(|v| raw_text(v.syntax())).unwrap_or_default(),
        ),
        _ => Default::default(),
    }
}
