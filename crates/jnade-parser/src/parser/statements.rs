//! Statement parsers for the Java subset.
//!
//! Blocks, local declarations, and every statement form the translator
//! understands: if/else chains, counted and iterate-over `for`, `while`,
//! `do`/`while`, `switch` (colon and arrow forms), `try` with resources,
//! catch and finally, jumps, labels and explicit constructor calls.

use crate::syntax_kind::SyntaxKind;

use super::items::{self, at_local_var_decl};
use super::{expressions, MarkClosed, Parser};

// ── Blocks ───────────────────────────────────────────────────────────────

/// Parse `{ statements }`.
pub(crate) fn parse_block(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::BLOCK);
        return;
    }

    while !p.has_error() && !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        parse_statement(p);
    }

    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related("expected `}` to close block", open_span, "block opened here");
    }
    p.close(m, SyntaxKind::BLOCK);
}

// ── Statement dispatch ───────────────────────────────────────────────────

/// Parse a single statement.
pub(crate) fn parse_statement(p: &mut Parser) {
    match p.current() {
        SyntaxKind::L_BRACE => parse_block(p),
        SyntaxKind::SEMICOLON => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::EMPTY_STMT);
        }
        SyntaxKind::IF_KW => parse_if_stmt(p),
        SyntaxKind::FOR_KW => parse_for_stmt(p),
        SyntaxKind::WHILE_KW => parse_while_stmt(p),
        SyntaxKind::DO_KW => parse_do_while_stmt(p),
        SyntaxKind::SWITCH_KW => {
            parse_switch(p, SyntaxKind::SWITCH_STMT);
        }
        SyntaxKind::TRY_KW => parse_try_stmt(p),
        SyntaxKind::RETURN_KW => parse_return_stmt(p),
        SyntaxKind::BREAK_KW => parse_jump_stmt(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CONTINUE_KW => parse_jump_stmt(p, SyntaxKind::CONTINUE_STMT),
        SyntaxKind::THROW_KW => parse_throw_stmt(p),
        SyntaxKind::ASSERT_KW => parse_assert_stmt(p),
        SyntaxKind::SYNCHRONIZED_KW if p.nth(1) == SyntaxKind::L_PAREN => {
            parse_synchronized_stmt(p)
        }
        SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW if p.nth(1) == SyntaxKind::L_PAREN => {
            parse_explicit_ctor_call(p)
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::COLON => parse_labeled_stmt(p),
        SyntaxKind::IDENT if p.current_text() == "yield" && at_yield_value(p) => {
            parse_yield_stmt(p)
        }
        _ if items::at_type_decl_keyword(p) => items::parse_type_decl(p),
        _ if items::at_modifier(p) => parse_modified_local(p),
        _ if at_local_var_decl(p) => parse_local_var_decl(p, true),
        _ => parse_expr_stmt(p),
    }
}

/// `yield` is a statement when followed by something that cannot continue
/// an expression named `yield`.
fn at_yield_value(p: &Parser) -> bool {
    let next = p.nth(1);
    !next.is_assign_op()
        && !matches!(
            next,
            SyntaxKind::DOT
                | SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACKET
                | SyntaxKind::PLUS_PLUS
                | SyntaxKind::MINUS_MINUS
                | SyntaxKind::SEMICOLON
                | SyntaxKind::ARROW
                | SyntaxKind::COLON_COLON
        )
}

/// A statement starting with modifiers or annotations: a local class or a
/// local variable declaration.
fn parse_modified_local(p: &mut Parser) {
    let mut i = 0;
    while matches!(
        p.nth(i),
        SyntaxKind::FINAL_KW | SyntaxKind::ABSTRACT_KW | SyntaxKind::STATIC_KW
    ) {
        i += 1;
    }
    if matches!(
        p.nth(i),
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW
    ) {
        items::parse_type_decl(p);
    } else {
        parse_local_var_decl(p, true);
    }
}

// ── Declarations and expression statements ───────────────────────────────

/// Parse `[final] Type a = 1, b;`. The semicolon is left to the caller
/// when `with_semicolon` is false (the initializer of a counted `for`).
pub(crate) fn parse_local_var_decl(p: &mut Parser, with_semicolon: bool) {
    let m = p.open();
    items::parse_modifiers(p);
    items::parse_type(p);
    if !p.has_error() {
        items::parse_var_declarators(p);
    }
    if with_semicolon {
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.close(m, SyntaxKind::LOCAL_VAR_DECL);
}

fn parse_expr_stmt(p: &mut Parser) {
    let m = p.open();
    expressions::expr(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::EXPR_STMT);
}

/// `this(args);` / `super(args);` inside a constructor body.
fn parse_explicit_ctor_call(p: &mut Parser) {
    let m = p.open();
    p.advance(); // this / super
    expressions::parse_arg_list(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::EXPLICIT_CTOR_CALL);
}

// ── Control flow ─────────────────────────────────────────────────────────

/// Parse `(expr)` as used by if, while, switch and synchronized.
fn parse_paren_condition(p: &mut Parser) {
    p.expect(SyntaxKind::L_PAREN);
    if !p.has_error() {
        expressions::expr(p);
    }
    p.expect(SyntaxKind::R_PAREN);
}

/// Parse `if (cond) stmt [else stmt]`. An `else if` nests another IF_STMT
/// inside the ELSE_BRANCH.
fn parse_if_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // if
    parse_paren_condition(p);
    if !p.has_error() {
        parse_statement(p);
    }
    if !p.has_error() && p.at(SyntaxKind::ELSE_KW) {
        let else_m = p.open();
        p.advance(); // else
        parse_statement(p);
        p.close(else_m, SyntaxKind::ELSE_BRANCH);
    }
    p.close(m, SyntaxKind::IF_STMT);
}

/// Parse a counted `for` or an iterate-over `for (T x : xs)`.
fn parse_for_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // for
    p.expect(SyntaxKind::L_PAREN);
    if p.has_error() {
        p.close(m, SyntaxKind::FOR_STMT);
        return;
    }

    if at_foreach_header(p) {
        items::parse_param(p);
        p.expect(SyntaxKind::COLON);
        if !p.has_error() {
            expressions::expr(p);
        }
        p.expect(SyntaxKind::R_PAREN);
        if !p.has_error() {
            parse_statement(p);
        }
        p.close(m, SyntaxKind::FOREACH_STMT);
        return;
    }

    if !p.at(SyntaxKind::SEMICOLON) {
        let init = p.open();
        if items::at_modifier(p) || at_local_var_decl(p) {
            parse_local_var_decl(p, false);
        } else {
            parse_expr_list(p);
        }
        p.close(init, SyntaxKind::FOR_INIT);
    }
    p.expect(SyntaxKind::SEMICOLON);

    if !p.has_error() && !p.at(SyntaxKind::SEMICOLON) {
        expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);

    if !p.has_error() && !p.at(SyntaxKind::R_PAREN) {
        let update = p.open();
        parse_expr_list(p);
        p.close(update, SyntaxKind::FOR_UPDATE);
    }
    p.expect(SyntaxKind::R_PAREN);

    if !p.has_error() {
        parse_statement(p);
    }
    p.close(m, SyntaxKind::FOR_STMT);
}

/// Whether the `for` header (just after `(`) contains a `:` before any
/// `;` at the top nesting level.
fn at_foreach_header(p: &Parser) -> bool {
    let mut depth = 0u32;
    let mut i = 0;
    loop {
        match p.nth(i) {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            SyntaxKind::COLON if depth == 0 => return true,
            SyntaxKind::SEMICOLON | SyntaxKind::EOF => return false,
            _ => {}
        }
        i += 1;
    }
}

fn parse_expr_list(p: &mut Parser) {
    expressions::expr(p);
    while !p.has_error() && p.eat(SyntaxKind::COMMA) {
        expressions::expr(p);
    }
}

fn parse_while_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // while
    parse_paren_condition(p);
    if !p.has_error() {
        parse_statement(p);
    }
    p.close(m, SyntaxKind::WHILE_STMT);
}

fn parse_do_while_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // do
    parse_statement(p);
    p.expect(SyntaxKind::WHILE_KW);
    parse_paren_condition(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::DO_WHILE_STMT);
}

/// Parse `switch (x) { entries }` as a statement or, with `kind` set to
/// SWITCH_EXPR, as an expression.
pub(crate) fn parse_switch(p: &mut Parser, kind: SyntaxKind) -> MarkClosed {
    let m = p.open();
    p.advance(); // switch
    parse_paren_condition(p);

    let open_span = p.current_span();
    p.expect(SyntaxKind::L_BRACE);
    while !p.has_error() && !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        parse_switch_entry(p);
    }
    if !p.has_error() && !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related(
            "expected `}` to close switch body",
            open_span,
            "switch body opened here",
        );
    }
    p.close(m, kind)
}

/// Parse one `case A, B:` group with its statements, or one arrow rule
/// `case A -> body`.
fn parse_switch_entry(p: &mut Parser) {
    let m = p.open();
    if p.eat(SyntaxKind::DEFAULT_KW) {
        // `default` has no label expression.
    } else if p.eat(SyntaxKind::CASE_KW) {
        loop {
            parse_switch_label(p);
            if p.has_error() || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    } else {
        p.error("expected `case` or `default`");
        p.close(m, SyntaxKind::SWITCH_ENTRY);
        return;
    }

    if p.eat(SyntaxKind::ARROW) {
        match p.current() {
            SyntaxKind::L_BRACE => parse_block(p),
            SyntaxKind::THROW_KW => parse_throw_stmt(p),
            _ => parse_expr_stmt(p),
        }
    } else {
        p.expect(SyntaxKind::COLON);
        while !p.has_error()
            && !p.at_any(&[
                SyntaxKind::CASE_KW,
                SyntaxKind::DEFAULT_KW,
                SyntaxKind::R_BRACE,
                SyntaxKind::EOF,
            ])
        {
            parse_statement(p);
        }
    }
    p.close(m, SyntaxKind::SWITCH_ENTRY);
}

fn parse_switch_label(p: &mut Parser) {
    let m = p.open();
    if p.eat(SyntaxKind::DEFAULT_KW) {
        // `case null, default`
    } else if p.at(SyntaxKind::IDENT)
        && matches!(
            p.nth(1),
            SyntaxKind::ARROW | SyntaxKind::COLON | SyntaxKind::COMMA
        )
    {
        // A bare enum constant. Parsed directly so `A ->` is not taken
        // for a lambda.
        let name = p.open();
        p.advance();
        p.close(name, SyntaxKind::NAME_REF);
    } else {
        expressions::expr(p);
    }
    p.close(m, SyntaxKind::SWITCH_LABEL);
}

/// Parse `try [(resources)] { } catch (...) { } [finally { }]`.
fn parse_try_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // try

    if p.at(SyntaxKind::L_PAREN) {
        parse_resource_list(p);
    }
    parse_block(p);

    while !p.has_error() && p.at(SyntaxKind::CATCH_KW) {
        let c = p.open();
        p.advance(); // catch
        p.expect(SyntaxKind::L_PAREN);
        let param = p.open();
        items::parse_modifiers(p);
        items::parse_type(p);
        while !p.has_error() && p.eat(SyntaxKind::PIPE) {
            items::parse_type(p);
        }
        items::parse_name(p);
        p.close(param, SyntaxKind::CATCH_PARAM);
        p.expect(SyntaxKind::R_PAREN);
        if !p.has_error() {
            parse_block(p);
        }
        p.close(c, SyntaxKind::CATCH_CLAUSE);
    }

    if !p.has_error() && p.at(SyntaxKind::FINALLY_KW) {
        let f = p.open();
        p.advance(); // finally
        parse_block(p);
        p.close(f, SyntaxKind::FINALLY_CLAUSE);
    }
    p.close(m, SyntaxKind::TRY_STMT);
}

fn parse_resource_list(p: &mut Parser) {
    let m = p.open();
    p.advance(); // (
    while !p.has_error() && !p.at(SyntaxKind::R_PAREN) && !p.at(SyntaxKind::EOF) {
        let r = p.open();
        if items::at_modifier(p) || at_local_var_decl(p) {
            items::parse_modifiers(p);
            items::parse_type(p);
            if !p.has_error() {
                items::parse_var_declarators(p);
            }
        } else {
            expressions::expr(p);
        }
        p.close(r, SyntaxKind::RESOURCE);
        if !p.eat(SyntaxKind::SEMICOLON) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::RESOURCE_LIST);
}

fn parse_synchronized_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // synchronized
    parse_paren_condition(p);
    if !p.has_error() {
        parse_block(p);
    }
    p.close(m, SyntaxKind::SYNCHRONIZED_STMT);
}

fn parse_labeled_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // label
    p.advance(); // :
    parse_statement(p);
    p.close(m, SyntaxKind::LABELED_STMT);
}

// ── Simple statements ────────────────────────────────────────────────────

fn parse_return_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // return
    if !p.at(SyntaxKind::SEMICOLON) {
        expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::RETURN_STMT);
}

/// `break [label];` or `continue [label];`
fn parse_jump_stmt(p: &mut Parser, kind: SyntaxKind) {
    let m = p.open();
    p.advance(); // break / continue
    p.eat(SyntaxKind::IDENT);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, kind);
}

fn parse_throw_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // throw
    expressions::expr(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::THROW_STMT);
}

fn parse_yield_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // yield
    expressions::expr(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::YIELD_STMT);
}

fn parse_assert_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // assert
    expressions::expr(p);
    if !p.has_error() && p.eat(SyntaxKind::COLON) {
        expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::ASSERT_STMT);
}
