//! Declaration parsers for the Java subset.
//!
//! Parses package and import declarations, type declarations (class,
//! interface, enum, record, annotation interface) and their members, plus
//! the shared pieces they are built from: modifiers, annotations, types,
//! parameter lists and variable declarators.

use crate::syntax_kind::SyntaxKind;

use super::{expressions, statements, MarkOpened, Parser};

// ── Package / Import ─────────────────────────────────────────────────────

pub(crate) fn at_package_decl(p: &Parser) -> bool {
    p.at(SyntaxKind::PACKAGE_KW)
}

/// Parse `package a.b.c;`
pub(crate) fn parse_package_decl(p: &mut Parser) {
    let m = p.open();
    p.advance(); // package
    parse_qualified_name(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::PACKAGE_DECL);
}

/// Parse `import [static] a.b.C;` or `import [static] a.b.*;`
pub(crate) fn parse_import_decl(p: &mut Parser) {
    let m = p.open();
    p.advance(); // import
    p.eat(SyntaxKind::STATIC_KW);
    parse_qualified_name(p);
    if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::STAR {
        p.advance(); // .
        p.advance(); // *
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::IMPORT_DECL);
}

/// Parse a dotted name, stopping before a `.*` wildcard.
fn parse_qualified_name(p: &mut Parser) {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance(); // .
        p.advance(); // IDENT
    }
    p.close(m, SyntaxKind::QUALIFIED_NAME);
}

// ── Modifiers and annotations ────────────────────────────────────────────

/// Whether the current token starts a modifier or an annotation.
pub(crate) fn at_modifier(p: &Parser) -> bool {
    match p.current() {
        SyntaxKind::PUBLIC_KW
        | SyntaxKind::PRIVATE_KW
        | SyntaxKind::PROTECTED_KW
        | SyntaxKind::STATIC_KW
        | SyntaxKind::FINAL_KW
        | SyntaxKind::ABSTRACT_KW
        | SyntaxKind::NATIVE_KW
        | SyntaxKind::TRANSIENT_KW
        | SyntaxKind::VOLATILE_KW => true,
        SyntaxKind::SYNCHRONIZED_KW => p.nth(1) != SyntaxKind::L_PAREN,
        SyntaxKind::DEFAULT_KW => !matches!(p.nth(1), SyntaxKind::COLON | SyntaxKind::ARROW),
        SyntaxKind::AT => p.nth(1) != SyntaxKind::INTERFACE_KW,
        SyntaxKind::IDENT => {
            matches!(p.current_text(), "sealed" | "strictfp")
                && matches!(
                    p.nth(1),
                    SyntaxKind::CLASS_KW
                        | SyntaxKind::INTERFACE_KW
                        | SyntaxKind::ABSTRACT_KW
                        | SyntaxKind::PUBLIC_KW
                        | SyntaxKind::STATIC_KW
                )
        }
        _ => false,
    }
}

/// Parse a (possibly empty) MODIFIERS node.
pub(crate) fn parse_modifiers(p: &mut Parser) {
    let m = p.open();
    while !p.has_error() && at_modifier(p) {
        if p.at(SyntaxKind::AT) {
            parse_annotation(p);
        } else {
            p.advance();
        }
    }
    p.close(m, SyntaxKind::MODIFIERS);
}

/// Parse `@Name`, `@a.b.Name` or `@Name(...)`.
///
/// Annotation arguments are kept as raw tokens; nothing downstream looks
/// inside them.
pub(crate) fn parse_annotation(p: &mut Parser) {
    let m = p.open();
    p.advance(); // @
    p.expect(SyntaxKind::IDENT);
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance(); // .
        p.advance(); // IDENT
    }
    if p.at(SyntaxKind::L_PAREN) {
        skip_balanced_parens(p);
    }
    p.close(m, SyntaxKind::ANNOTATION);
}

/// Consume a parenthesized token run, including nested parentheses.
fn skip_balanced_parens(p: &mut Parser) {
    let open_span = p.current_span();
    let mut depth = 0u32;
    loop {
        match p.current() {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => depth -= 1,
            SyntaxKind::EOF => {
                p.error_with_related("expected `)`", open_span, "parenthesis opened here");
                return;
            }
            _ => {}
        }
        p.advance();
        if depth == 0 {
            return;
        }
    }
}

// ── Type declarations ────────────────────────────────────────────────────

/// Whether the current token (after modifiers) starts a type declaration.
pub(crate) fn at_type_decl_keyword(p: &Parser) -> bool {
    match p.current() {
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => true,
        SyntaxKind::AT => p.nth(1) == SyntaxKind::INTERFACE_KW,
        SyntaxKind::IDENT => p.current_text() == "record" && p.nth(1) == SyntaxKind::IDENT,
        _ => false,
    }
}

/// Parse a type declaration with its leading modifiers.
pub(crate) fn parse_type_decl(p: &mut Parser) {
    let m = p.open();
    parse_modifiers(p);
    parse_type_decl_rest(p, m);
}

/// Parse the part of a type declaration after its modifiers and close `m`
/// with the matching kind.
fn parse_type_decl_rest(p: &mut Parser, m: MarkOpened) {
    match p.current() {
        SyntaxKind::CLASS_KW => {
            p.advance(); // class
            parse_name(p);
            if p.at(SyntaxKind::LT) {
                parse_type_params(p);
            }
            if p.at(SyntaxKind::EXTENDS_KW) {
                parse_type_list_clause(p, SyntaxKind::EXTENDS_CLAUSE);
            }
            if p.at(SyntaxKind::IMPLEMENTS_KW) {
                parse_type_list_clause(p, SyntaxKind::IMPLEMENTS_CLAUSE);
            }
            skip_permits(p);
            parse_class_body(p, false);
            p.close(m, SyntaxKind::CLASS_DECL);
        }
        SyntaxKind::INTERFACE_KW | SyntaxKind::AT => {
            p.eat(SyntaxKind::AT);
            p.advance(); // interface
            parse_name(p);
            if p.at(SyntaxKind::LT) {
                parse_type_params(p);
            }
            if p.at(SyntaxKind::EXTENDS_KW) {
                parse_type_list_clause(p, SyntaxKind::EXTENDS_CLAUSE);
            }
            skip_permits(p);
            parse_class_body(p, false);
            p.close(m, SyntaxKind::INTERFACE_DECL);
        }
        SyntaxKind::ENUM_KW => {
            p.advance(); // enum
            parse_name(p);
            if p.at(SyntaxKind::IMPLEMENTS_KW) {
                parse_type_list_clause(p, SyntaxKind::IMPLEMENTS_CLAUSE);
            }
            parse_class_body(p, true);
            p.close(m, SyntaxKind::ENUM_DECL);
        }
        SyntaxKind::IDENT if p.current_text() == "record" => {
            p.advance(); // record
            parse_name(p);
            if p.at(SyntaxKind::LT) {
                parse_type_params(p);
            }
            parse_param_list(p);
            if p.at(SyntaxKind::IMPLEMENTS_KW) {
                parse_type_list_clause(p, SyntaxKind::IMPLEMENTS_CLAUSE);
            }
            parse_class_body(p, false);
            p.close(m, SyntaxKind::RECORD_DECL);
        }
        _ => {
            p.error("expected `class`, `interface`, `enum` or `record`");
            p.close(m, SyntaxKind::ERROR_NODE);
        }
    }
}

/// Parse a NAME node around the current identifier.
pub(crate) fn parse_name(p: &mut Parser) {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    p.close(m, SyntaxKind::NAME);
}

/// Parse `extends A, B` or `implements A, B` into a clause node.
fn parse_type_list_clause(p: &mut Parser, kind: SyntaxKind) {
    let m = p.open();
    p.advance(); // extends / implements
    parse_type(p);
    while !p.has_error() && p.eat(SyntaxKind::COMMA) {
        parse_type(p);
    }
    p.close(m, kind);
}

/// `permits A, B` on a sealed type carries nothing we render.
fn skip_permits(p: &mut Parser) {
    if p.at_contextual("permits") {
        p.advance();
        parse_type(p);
        while !p.has_error() && p.eat(SyntaxKind::COMMA) {
            parse_type(p);
        }
    }
}

/// Parse `<T, U extends Comparable<U>>` on a declaration.
fn parse_type_params(p: &mut Parser) {
    let m = p.open();
    p.advance(); // <
    loop {
        while p.at(SyntaxKind::AT) {
            parse_annotation(p);
        }
        p.expect(SyntaxKind::IDENT);
        if p.eat(SyntaxKind::EXTENDS_KW) {
            parse_type(p);
            while !p.has_error() && p.eat(SyntaxKind::AMP) {
                parse_type(p);
            }
        }
        if p.has_error() || !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT);
    p.close(m, SyntaxKind::TYPE_PARAMS);
}

// ── Class bodies and members ─────────────────────────────────────────────

/// Parse `{ members }`. Enum bodies start with their constant list.
pub(crate) fn parse_class_body(p: &mut Parser, is_enum: bool) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::CLASS_BODY);
        return;
    }

    if is_enum {
        parse_enum_constants(p);
    }

    while !p.has_error() && !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        parse_member(p);
    }

    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related(
            "expected `}` to close class body",
            open_span,
            "class body opened here",
        );
    }
    p.close(m, SyntaxKind::CLASS_BODY);
}

/// Parse `A, B(1), C { ... };` at the start of an enum body.
fn parse_enum_constants(p: &mut Parser) {
    while !p.has_error() && (p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::AT)) {
        let m = p.open();
        parse_modifiers(p);
        parse_name(p);
        if p.at(SyntaxKind::L_PAREN) {
            expressions::parse_arg_list(p);
        }
        if p.at(SyntaxKind::L_BRACE) {
            parse_class_body(p, false);
        }
        p.close(m, SyntaxKind::ENUM_CONSTANT);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.eat(SyntaxKind::SEMICOLON);
}

/// Parse one member of a class body.
fn parse_member(p: &mut Parser) {
    match p.current() {
        SyntaxKind::SEMICOLON => {
            p.advance();
            return;
        }
        SyntaxKind::L_BRACE => {
            let m = p.open();
            statements::parse_block(p);
            p.close(m, SyntaxKind::INITIALIZER_BLOCK);
            return;
        }
        SyntaxKind::STATIC_KW if p.nth(1) == SyntaxKind::L_BRACE => {
            let m = p.open();
            p.advance(); // static
            statements::parse_block(p);
            p.close(m, SyntaxKind::INITIALIZER_BLOCK);
            return;
        }
        _ => {}
    }

    let m = p.open();
    parse_modifiers(p);

    if at_type_decl_keyword(p) {
        parse_type_decl_rest(p, m);
        return;
    }

    if p.at(SyntaxKind::LT) {
        parse_type_params(p);
    }

    // Constructor: `Name(params)`, or the compact record form `Name {`.
    if p.at(SyntaxKind::IDENT) && matches!(p.nth(1), SyntaxKind::L_PAREN | SyntaxKind::L_BRACE) {
        parse_name(p);
        if p.at(SyntaxKind::L_PAREN) {
            parse_param_list(p);
        }
        if p.at(SyntaxKind::THROWS_KW) {
            parse_throws(p);
        }
        statements::parse_block(p);
        p.close(m, SyntaxKind::CONSTRUCTOR_DECL);
        return;
    }

    if !parse_type(p) {
        p.close(m, SyntaxKind::ERROR_NODE);
        return;
    }

    if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
        parse_name(p);
        parse_param_list(p);
        parse_dims(p);
        if p.at(SyntaxKind::THROWS_KW) {
            parse_throws(p);
        }
        // Annotation interface element default: `String value() default "";`
        if p.eat(SyntaxKind::DEFAULT_KW) {
            if p.at(SyntaxKind::AT) {
                parse_annotation(p);
            } else if p.at(SyntaxKind::L_BRACE) {
                expressions::parse_array_init(p);
            } else {
                expressions::expr(p);
            }
        }
        if p.at(SyntaxKind::L_BRACE) {
            statements::parse_block(p);
        } else {
            p.expect(SyntaxKind::SEMICOLON);
        }
        p.close(m, SyntaxKind::METHOD_DECL);
        return;
    }

    parse_var_declarators(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::FIELD_DECL);
}

/// Parse `throws A, B`.
fn parse_throws(p: &mut Parser) {
    parse_type_list_clause(p, SyntaxKind::THROWS_CLAUSE);
}

// ── Parameters ───────────────────────────────────────────────────────────

/// Parse `(params)` of a method, constructor or record header.
pub(crate) fn parse_param_list(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_PAREN) {
        p.close(m, SyntaxKind::PARAM_LIST);
        return;
    }

    if !p.at(SyntaxKind::R_PAREN) {
        parse_param(p);
        while !p.has_error() && p.eat(SyntaxKind::COMMA) {
            parse_param(p);
        }
    }

    if !p.eat(SyntaxKind::R_PAREN) {
        p.error_with_related(
            "expected `)` to close parameter list",
            open_span,
            "parameter list opened here",
        );
    }
    p.close(m, SyntaxKind::PARAM_LIST);
}

/// Parse one formal parameter: `[final] Type [...] name [[]]`.
pub(crate) fn parse_param(p: &mut Parser) {
    let m = p.open();
    parse_modifiers(p);
    parse_type(p);
    p.eat(SyntaxKind::ELLIPSIS);
    // Receiver parameter: `Foo this`
    if !p.eat(SyntaxKind::THIS_KW) {
        parse_name(p);
        parse_dims(p);
    }
    p.close(m, SyntaxKind::PARAM);
}

// ── Types ────────────────────────────────────────────────────────────────

/// Parse a type reference into a TYPE node. Returns false (with an error
/// recorded) when the current token cannot start a type.
pub(crate) fn parse_type(p: &mut Parser) -> bool {
    let m = p.open();
    while p.at(SyntaxKind::AT) {
        parse_annotation(p);
    }
    if p.eat(SyntaxKind::VOID_KW) {
        p.close(m, SyntaxKind::TYPE);
        return true;
    }
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected type");
        p.close(m, SyntaxKind::TYPE);
        return false;
    }
    parse_type_name(p);
    parse_dims(p);
    p.close(m, SyntaxKind::TYPE);
    !p.has_error()
}

/// Parse `Name<Args>.Inner<Args>` without array dimensions. Shared with
/// object and array creation, whose dimensions carry expressions.
pub(crate) fn parse_type_name(p: &mut Parser) {
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::LT) {
        parse_type_args(p);
    }
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance(); // .
        p.advance(); // IDENT
        if p.at(SyntaxKind::LT) {
            parse_type_args(p);
        }
    }
}

/// Parse `<A, ? extends B>`, including the diamond `<>`.
pub(crate) fn parse_type_args(p: &mut Parser) {
    let m = p.open();
    p.advance(); // <
    if !p.at(SyntaxKind::GT) {
        loop {
            if p.eat(SyntaxKind::QUESTION) {
                if p.eat(SyntaxKind::EXTENDS_KW) || p.eat(SyntaxKind::SUPER_KW) {
                    parse_type(p);
                }
            } else {
                parse_type(p);
            }
            if p.has_error() || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::GT);
    p.close(m, SyntaxKind::TYPE_ARGS);
}

/// Consume `[]` pairs after a type or a declarator name.
fn parse_dims(p: &mut Parser) {
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        p.advance(); // [
        p.advance(); // ]
    }
}

// ── Variable declarators ─────────────────────────────────────────────────

/// Parse `a = 1, b[], c = {1, 2}`.
pub(crate) fn parse_var_declarators(p: &mut Parser) {
    parse_var_declarator(p);
    while !p.has_error() && p.eat(SyntaxKind::COMMA) {
        parse_var_declarator(p);
    }
}

fn parse_var_declarator(p: &mut Parser) {
    let m = p.open();
    parse_name(p);
    parse_dims(p);
    if p.eat(SyntaxKind::EQ) {
        if p.at(SyntaxKind::L_BRACE) {
            expressions::parse_array_init(p);
        } else {
            expressions::expr(p);
        }
    }
    p.close(m, SyntaxKind::VAR_DECLARATOR);
}

// ── Lookahead scanning ───────────────────────────────────────────────────

/// Scan a type starting at significant token `start` without consuming
/// anything. Returns the index just past the type.
pub(crate) fn scan_type(p: &Parser, start: usize) -> Option<usize> {
    let mut i = start;
    if p.nth(i) != SyntaxKind::IDENT {
        return None;
    }
    i += 1;
    loop {
        if p.nth(i) == SyntaxKind::LT {
            i = scan_type_args(p, i)?;
        }
        if p.nth(i) == SyntaxKind::DOT && p.nth(i + 1) == SyntaxKind::IDENT {
            i += 2;
            continue;
        }
        break;
    }
    while p.nth(i) == SyntaxKind::L_BRACKET && p.nth(i + 1) == SyntaxKind::R_BRACKET {
        i += 2;
    }
    Some(i)
}

/// Scan a balanced `<...>` whose contents can only belong to a type.
fn scan_type_args(p: &Parser, start: usize) -> Option<usize> {
    let mut depth = 0u32;
    let mut i = start;
    loop {
        match p.nth(i) {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            SyntaxKind::IDENT
            | SyntaxKind::COMMA
            | SyntaxKind::DOT
            | SyntaxKind::QUESTION
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::L_BRACKET
            | SyntaxKind::R_BRACKET
            | SyntaxKind::AMP => {}
            _ => return None,
        }
        i += 1;
    }
}

/// Whether the tokens at the current position form a local variable
/// declaration: `Type name` followed by `=`, `;`, `,`, `[` or `:`.
pub(crate) fn at_local_var_decl(p: &Parser) -> bool {
    let Some(i) = scan_type(p, 0) else {
        return false;
    };
    p.nth(i) == SyntaxKind::IDENT
        && matches!(
            p.nth(i + 1),
            SyntaxKind::EQ
                | SyntaxKind::SEMICOLON
                | SyntaxKind::COMMA
                | SyntaxKind::L_BRACKET
                | SyntaxKind::COLON
        )
}
