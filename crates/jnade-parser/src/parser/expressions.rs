//! Pratt expression parser for the Java subset.
//!
//! Implements operator precedence parsing using binding power tables.
//! Handles literals, names, `this`/`super`, parenthesized expressions,
//! casts, unary/binary/ternary operators, assignment, `instanceof`, method
//! calls, field access, indexing, object and array creation, lambdas,
//! method references, class literals and switch expressions.

use crate::syntax_kind::SyntaxKind;

use super::items;
use super::statements;
use super::{MarkClosed, Parser};

// ── Binding Power Tables ───────────────────────────────────────────────

/// Returns (left_bp, right_bp) for plain binary operators.
///
/// Left < right means left-associative. Shifts, assignment, `?:` and
/// `instanceof` are handled separately in [`expr_bp`].
fn infix_binding_power(op: SyntaxKind) -> Option<(u8, u8)> {
    match op {
        SyntaxKind::PIPE_PIPE => Some((5, 6)),
        SyntaxKind::AMP_AMP => Some((7, 8)),
        SyntaxKind::PIPE => Some((9, 10)),
        SyntaxKind::CARET => Some((11, 12)),
        SyntaxKind::AMP => Some((13, 14)),
        SyntaxKind::EQ_EQ | SyntaxKind::NOT_EQ => Some((15, 16)),
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => Some((17, 18)),
        SyntaxKind::SHL => Some((19, 20)),
        SyntaxKind::PLUS | SyntaxKind::MINUS => Some((21, 22)),
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => Some((23, 24)),
        _ => None,
    }
}

/// Assignment is right-associative and binds loosest.
const ASSIGN_BP: (u8, u8) = (2, 1);
/// `c ? a : b`; the else-branch is parsed at `TERNARY_BP.1` so chains nest
/// to the right.
const TERNARY_BP: (u8, u8) = (4, 3);
/// `instanceof` sits with the relational operators.
const INSTANCEOF_BP: u8 = 17;
/// `>>` and `>>>`, built from adjacent `>` tokens.
const SHIFT_BP: (u8, u8) = (19, 20);

/// Returns ((), right_bp) for prefix operators.
fn prefix_binding_power(op: SyntaxKind) -> Option<((), u8)> {
    match op {
        SyntaxKind::MINUS
        | SyntaxKind::PLUS
        | SyntaxKind::BANG
        | SyntaxKind::TILDE
        | SyntaxKind::PLUS_PLUS
        | SyntaxKind::MINUS_MINUS => Some(((), 25)),
        _ => None,
    }
}

/// Postfix operations (call, member access, indexing, `++`/`--`) bind
/// tighter than all prefix and infix operators.
const POSTFIX_BP: u8 = 27;

/// Primitive type names. A parenthesized primitive is always a cast.
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

// ── Expression Entry Point ─────────────────────────────────────────────

/// Parse an expression at the default (lowest) binding power.
pub(crate) fn expr(p: &mut Parser) {
    expr_bp(p, 0);
}

/// Parse an expression with the given minimum binding power.
fn expr_bp(p: &mut Parser, min_bp: u8) -> Option<MarkClosed> {
    let mut lhs = lhs(p)?;

    loop {
        if p.has_error() {
            break;
        }

        let current = p.current();

        // ── Postfix: member access, call, class literal ──
        if current == SyntaxKind::DOT && POSTFIX_BP >= min_bp {
            lhs = parse_member_suffix(p, lhs);
            continue;
        }

        // ── Postfix: index access, or `T[].class` ──
        if current == SyntaxKind::L_BRACKET && POSTFIX_BP >= min_bp {
            let m = p.open_before(lhs);
            if p.nth(1) == SyntaxKind::R_BRACKET {
                while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
                    p.advance(); // [
                    p.advance(); // ]
                }
                p.expect(SyntaxKind::DOT);
                p.expect(SyntaxKind::CLASS_KW);
                lhs = p.close(m, SyntaxKind::CLASS_LITERAL);
            } else {
                p.advance(); // [
                expr_bp(p, 0);
                p.expect(SyntaxKind::R_BRACKET);
                lhs = p.close(m, SyntaxKind::INDEX_EXPR);
            }
            continue;
        }

        // ── Postfix: method reference ──
        if current == SyntaxKind::COLON_COLON && POSTFIX_BP >= min_bp {
            let m = p.open_before(lhs);
            p.advance(); // ::
            if !p.eat(SyntaxKind::NEW_KW) {
                p.expect(SyntaxKind::IDENT);
            }
            lhs = p.close(m, SyntaxKind::METHOD_REF);
            continue;
        }

        // ── Postfix: increment / decrement ──
        if matches!(current, SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS)
            && POSTFIX_BP >= min_bp
        {
            let m = p.open_before(lhs);
            p.advance();
            lhs = p.close(m, SyntaxKind::POSTFIX_EXPR);
            continue;
        }

        // ── Assignment ──
        if current.is_assign_op() {
            let (l_bp, r_bp) = ASSIGN_BP;
            if l_bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // operator
            if p.at(SyntaxKind::L_BRACE) {
                parse_array_init(p);
            } else {
                expr_bp(p, r_bp);
            }
            lhs = p.close(m, SyntaxKind::ASSIGN_EXPR);
            continue;
        }

        // ── Conditional ──
        if current == SyntaxKind::QUESTION {
            let (l_bp, r_bp) = TERNARY_BP;
            if l_bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // ?
            expr_bp(p, 0);
            p.expect(SyntaxKind::COLON);
            if !p.has_error() {
                expr_bp(p, r_bp);
            }
            lhs = p.close(m, SyntaxKind::CONDITIONAL_EXPR);
            continue;
        }

        // ── instanceof ──
        if current == SyntaxKind::INSTANCEOF_KW {
            if INSTANCEOF_BP < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // instanceof
            p.eat(SyntaxKind::FINAL_KW);
            items::parse_type(p);
            if p.at(SyntaxKind::IDENT) {
                items::parse_name(p);
            }
            lhs = p.close(m, SyntaxKind::INSTANCEOF_EXPR);
            continue;
        }

        // ── Shifts: `>` `>` and `>` `>` `>` written without spaces ──
        if current == SyntaxKind::GT && p.nth(1) == SyntaxKind::GT && p.nth_joined(0) {
            let (l_bp, r_bp) = SHIFT_BP;
            if l_bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            let unsigned = p.nth(2) == SyntaxKind::GT && p.nth_joined(1);
            p.advance(); // >
            p.advance(); // >
            if unsigned {
                p.advance(); // >
            }
            expr_bp(p, r_bp);
            lhs = p.close(m, SyntaxKind::BINARY_EXPR);
            continue;
        }

        // ── Binary operators ──
        if let Some((l_bp, r_bp)) = infix_binding_power(current) {
            if l_bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // operator
            expr_bp(p, r_bp);
            lhs = p.close(m, SyntaxKind::BINARY_EXPR);
            continue;
        }

        break;
    }

    Some(lhs)
}

/// Parse `.name`, `.name(args)`, `.<T>name(args)`, `.class`, `.this`,
/// `.super` or `.new Inner()` after a completed expression.
fn parse_member_suffix(p: &mut Parser, lhs: MarkClosed) -> MarkClosed {
    let m = p.open_before(lhs);
    match p.nth(1) {
        SyntaxKind::IDENT if p.nth(2) == SyntaxKind::L_PAREN => {
            p.advance(); // .
            p.advance(); // name
            parse_arg_list(p);
            p.close(m, SyntaxKind::METHOD_CALL)
        }
        SyntaxKind::LT => {
            p.advance(); // .
            items::parse_type_args(p);
            p.expect(SyntaxKind::IDENT);
            parse_arg_list(p);
            p.close(m, SyntaxKind::METHOD_CALL)
        }
        SyntaxKind::IDENT => {
            p.advance(); // .
            p.advance(); // name
            p.close(m, SyntaxKind::FIELD_ACCESS)
        }
        SyntaxKind::CLASS_KW => {
            p.advance(); // .
            p.advance(); // class
            p.close(m, SyntaxKind::CLASS_LITERAL)
        }
        SyntaxKind::THIS_KW => {
            p.advance(); // .
            p.advance(); // this
            p.close(m, SyntaxKind::THIS_EXPR)
        }
        SyntaxKind::SUPER_KW => {
            p.advance(); // .
            p.advance(); // super
            p.close(m, SyntaxKind::SUPER_EXPR)
        }
        SyntaxKind::NEW_KW => {
            p.advance(); // .
            let kind = parse_new_rest(p);
            p.close(m, kind)
        }
        _ => {
            p.advance(); // .
            p.error("expected member name after `.`");
            p.close(m, SyntaxKind::FIELD_ACCESS)
        }
    }
}

// ── Atom / Prefix Parsing (LHS) ───────────────────────────────────────

/// Parse the left-hand side of an expression: an atom or a prefix operator.
fn lhs(p: &mut Parser) -> Option<MarkClosed> {
    let current = p.current();

    // ── Prefix operators ──
    if let Some(((), r_bp)) = prefix_binding_power(current) {
        let m = p.open();
        p.advance(); // operator
        expr_bp(p, r_bp);
        return Some(p.close(m, SyntaxKind::PREFIX_EXPR));
    }

    match current {
        SyntaxKind::INT_LITERAL
        | SyntaxKind::FLOAT_LITERAL
        | SyntaxKind::STRING_LITERAL
        | SyntaxKind::TEXT_BLOCK
        | SyntaxKind::CHAR_LITERAL
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::LITERAL))
        }

        // Single-parameter lambda: `x -> body`
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::ARROW => Some(parse_lambda(p)),

        // Unqualified call: `name(args)`
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => {
            let m = p.open();
            p.advance(); // name
            parse_arg_list(p);
            Some(p.close(m, SyntaxKind::METHOD_CALL))
        }

        SyntaxKind::IDENT => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::NAME_REF))
        }

        SyntaxKind::THIS_KW => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::THIS_EXPR))
        }

        SyntaxKind::SUPER_KW => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::SUPER_EXPR))
        }

        SyntaxKind::L_PAREN if at_paren_lambda(p) => Some(parse_lambda(p)),

        SyntaxKind::L_PAREN if at_cast(p) => {
            let m = p.open();
            p.advance(); // (
            items::parse_type(p);
            p.expect(SyntaxKind::R_PAREN);
            if !p.has_error() {
                expr_bp(p, 25);
            }
            Some(p.close(m, SyntaxKind::CAST_EXPR))
        }

        SyntaxKind::L_PAREN => {
            let m = p.open();
            let open_span = p.current_span();
            p.advance(); // (
            expr_bp(p, 0);
            if !p.has_error() && !p.eat(SyntaxKind::R_PAREN) {
                p.error_with_related(
                    "expected `)` to close parenthesized expression",
                    open_span,
                    "opened here",
                );
            }
            Some(p.close(m, SyntaxKind::PAREN_EXPR))
        }

        SyntaxKind::NEW_KW => {
            let m = p.open();
            let kind = parse_new_rest(p);
            Some(p.close(m, kind))
        }

        SyntaxKind::SWITCH_KW => Some(statements::parse_switch(p, SyntaxKind::SWITCH_EXPR)),

        _ => {
            p.error("expected expression");
            None
        }
    }
}

/// Whether `(` starts a cast: `(Type)` followed by something that can only
/// be an operand. After a primitive type any expression start counts.
fn at_cast(p: &Parser) -> bool {
    let Some(end) = items::scan_type(p, 1) else {
        return false;
    };
    if p.nth(end) != SyntaxKind::R_PAREN {
        return false;
    }
    let next = p.nth(end + 1);
    let primitive = end == 2 && PRIMITIVES.contains(&p.nth_text(1));
    if primitive {
        return next == SyntaxKind::L_PAREN
            || prefix_binding_power(next).is_some()
            || at_operand_start(next);
    }
    next == SyntaxKind::L_PAREN
        || matches!(next, SyntaxKind::BANG | SyntaxKind::TILDE)
        || at_operand_start(next)
}

fn at_operand_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::INT_LITERAL
            | SyntaxKind::FLOAT_LITERAL
            | SyntaxKind::STRING_LITERAL
            | SyntaxKind::TEXT_BLOCK
            | SyntaxKind::CHAR_LITERAL
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::THIS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::SWITCH_KW
    )
}

/// Whether `(` opens a lambda parameter list: the matching `)` is
/// followed by `->`.
fn at_paren_lambda(p: &Parser) -> bool {
    let mut depth = 0u32;
    let mut i = 0;
    loop {
        match p.nth(i) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return p.nth(i + 1) == SyntaxKind::ARROW;
                }
            }
            SyntaxKind::EOF | SyntaxKind::SEMICOLON | SyntaxKind::L_BRACE => return false,
            _ => {}
        }
        i += 1;
    }
}

// ── Compound atoms ─────────────────────────────────────────────────────

/// Parse `x -> body`, `(a, b) -> body` or `(int a, int b) -> { ... }`.
fn parse_lambda(p: &mut Parser) -> MarkClosed {
    let m = p.open();

    let params = p.open();
    if p.at(SyntaxKind::IDENT) {
        parse_bare_lambda_param(p);
    } else {
        p.advance(); // (
        if !p.at(SyntaxKind::R_PAREN) {
            loop {
                if p.at(SyntaxKind::IDENT)
                    && matches!(p.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
                {
                    parse_bare_lambda_param(p);
                } else {
                    items::parse_param(p);
                }
                if p.has_error() || !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.close(params, SyntaxKind::LAMBDA_PARAMS);

    p.expect(SyntaxKind::ARROW);
    if !p.has_error() {
        if p.at(SyntaxKind::L_BRACE) {
            statements::parse_block(p);
        } else {
            expr_bp(p, 0);
        }
    }
    p.close(m, SyntaxKind::LAMBDA_EXPR)
}

fn parse_bare_lambda_param(p: &mut Parser) {
    let m = p.open();
    items::parse_name(p);
    p.close(m, SyntaxKind::PARAM);
}

/// Parse the rest of an object or array creation starting at `new` and
/// return the kind of node it forms.
fn parse_new_rest(p: &mut Parser) -> SyntaxKind {
    p.advance(); // new
    if p.at(SyntaxKind::LT) {
        items::parse_type_args(p);
    }

    let ty = p.open();
    while p.at(SyntaxKind::AT) {
        items::parse_annotation(p);
    }
    items::parse_type_name(p);
    p.close(ty, SyntaxKind::TYPE);

    if p.at(SyntaxKind::L_BRACKET) {
        while !p.has_error() && p.at(SyntaxKind::L_BRACKET) {
            if p.nth(1) == SyntaxKind::R_BRACKET {
                p.advance(); // [
                p.advance(); // ]
            } else {
                let dim = p.open();
                p.advance(); // [
                expr_bp(p, 0);
                p.expect(SyntaxKind::R_BRACKET);
                p.close(dim, SyntaxKind::DIM_EXPR);
            }
        }
        if p.at(SyntaxKind::L_BRACE) {
            parse_array_init(p);
        }
        return SyntaxKind::ARRAY_CREATION;
    }

    parse_arg_list(p);
    if !p.has_error() && p.at(SyntaxKind::L_BRACE) {
        items::parse_class_body(p, false);
    }
    SyntaxKind::NEW_EXPR
}

// ── Argument List ──────────────────────────────────────────────────────

/// Parse an argument list: `(expr, expr, ...)`.
pub(crate) fn parse_arg_list(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_PAREN) {
        p.close(m, SyntaxKind::ARG_LIST);
        return;
    }

    if !p.at(SyntaxKind::R_PAREN) {
        expr_bp(p, 0);
        while !p.has_error() && p.eat(SyntaxKind::COMMA) {
            expr_bp(p, 0);
        }
    }

    if !p.has_error() && !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_related(
            "expected `)` to close argument list",
            open_span,
            "argument list opened here",
        );
    }
    p.close(m, SyntaxKind::ARG_LIST);
}

// ── Array Initializer ──────────────────────────────────────────────────

/// Parse `{a, b, {c, d},}`.
pub(crate) fn parse_array_init(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    p.advance(); // {

    while !p.has_error() && !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        if p.at(SyntaxKind::L_BRACE) {
            parse_array_init(p);
        } else {
            expr_bp(p, 0);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }

    if !p.has_error() && !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related(
            "expected `}` to close array initializer",
            open_span,
            "initializer opened here",
        );
    }
    p.close(m, SyntaxKind::ARRAY_INIT);
}
