//! Parser integration tests.
//!
//! Each test parses a small compilation unit and checks the shape of the
//! tree through the typed AST, or snapshots the debug outline where the
//! exact tree layout matters.

use insta::assert_snapshot;
use jnade_parser::ast::expr::{BinaryOp, Expr, LiteralKind};
use jnade_parser::ast::item::{ArrayElement, Member, TypeDeclKind};
use jnade_parser::ast::stmt::Stmt;
use jnade_parser::ast::AstNode;
use jnade_parser::{debug_tree, parse, SyntaxKind, SyntaxNode};

/// Wrap `body` in a method of a class and return the method body's
/// statements.
fn statements(body: &str) -> Vec<Stmt> {
    let source = format!("class T {{\n void m() {{\n{body}\n }}\n}}\n");
    let parse = parse(&source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors());
    let class = parse.tree().types().next().expect("class");
    let method = class
        .body()
        .expect("body")
        .members()
        .find_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
        .expect("method");
    method.body().expect("block").statements().collect()
}

/// The expression of a single expression statement.
fn expr(text: &str) -> Expr {
    match statements(&format!("{text};")).remove(0) {
        Stmt::Expr(stmt) => stmt.expr().expect("expr"),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn find(node: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    node.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} node"))
}

// ── Compilation unit ───────────────────────────────────────────────────

#[test]
fn package_and_imports() {
    let parse = parse(
        "package com.example.app;\n\nimport java.util.List;\nimport static java.lang.Math.*;\n\nclass A {}\n",
    );
    assert!(parse.ok());
    let file = parse.tree();
    assert_eq!(file.package().expect("package").name(), "com.example.app");
    let imports: Vec<_> = file.imports().collect();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].name(), "java.util.List");
    assert!(!imports[0].is_static());
    assert_eq!(imports[1].name(), "java.lang.Math");
    assert!(imports[1].is_static());
    assert!(imports[1].is_wildcard());
}

#[test]
fn type_declaration_kinds() {
    let parse = parse(
        "public abstract class A extends B implements C, D {}\ninterface I extends J {}\nenum E { X, Y }\nrecord R(int a, String b) {}\n",
    );
    assert!(parse.ok(), "{:?}", parse.errors());
    let types: Vec<_> = parse.tree().types().collect();
    let kinds: Vec<_> = types.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TypeDeclKind::Class,
            TypeDeclKind::Interface,
            TypeDeclKind::Enum,
            TypeDeclKind::Record
        ]
    );
    assert_eq!(types[0].name(), "A");
    assert!(types[0]
        .modifiers()
        .expect("modifiers")
        .has(SyntaxKind::ABSTRACT_KW));
    assert_eq!(types[0].extended_types()[0].simple_name(), "B");
    assert_eq!(types[0].implemented_types().len(), 2);
    assert_eq!(types[1].extended_types()[0].simple_name(), "J");
    assert_eq!(types[3].name(), "R");
    let components: Vec<_> = types[3]
        .record_params()
        .expect("components")
        .params()
        .map(|p| p.name())
        .collect();
    assert_eq!(components, vec!["a", "b"]);
}

#[test]
fn enum_constants_and_members() {
    let parse = parse("enum Color {\n  RED(1), GREEN(2);\n  private final int v;\n  Color(int v) { this.v = v; }\n}\n");
    assert!(parse.ok(), "{:?}", parse.errors());
    let members: Vec<_> = parse
        .tree()
        .types()
        .next()
        .and_then(|t| t.body())
        .expect("body")
        .members()
        .collect();
    assert!(matches!(&members[0], Member::EnumConstant(c) if c.name() == "RED"));
    assert!(matches!(&members[1], Member::EnumConstant(c) if c.name() == "GREEN"));
    assert!(matches!(&members[2], Member::Field(_)));
    assert!(matches!(&members[3], Member::Constructor(c) if c.name() == "Color"));
}

#[test]
fn annotations_belong_to_modifiers() {
    let parse = parse("@Service\npublic class A {\n  @Override\n  public String toString() { return \"a\"; }\n}\n");
    assert!(parse.ok());
    let class = parse.tree().types().next().expect("class");
    let names: Vec<_> = class
        .modifiers()
        .expect("modifiers")
        .annotations()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["Service"]);
    // The declaration starts at its annotation.
    assert_eq!(u32::from(class.syntax().text_range().start()), 0);
}

#[test]
fn generic_types_and_arrays() {
    let parse = parse("class A { java.util.Map<String, List<Integer>> m; int[][] grid; }");
    assert!(parse.ok(), "{:?}", parse.errors());
    let fields: Vec<_> = parse
        .tree()
        .types()
        .next()
        .and_then(|t| t.body())
        .expect("body")
        .members()
        .filter_map(|m| match m {
            Member::Field(f) => f.ty(),
            _ => None,
        })
        .collect();
    assert_eq!(fields[0].simple_name(), "Map");
    assert!(fields[0].type_args().is_some());
    assert_eq!(fields[1].simple_name(), "int");
    assert_eq!(fields[1].array_dims(), 2);
}

// ── Statements ─────────────────────────────────────────────────────────

#[test]
fn local_variable_declarations() {
    let stmts = statements("int a = 1, b;\nfinal var list = new ArrayList<String>();\nint[] xs = {1, 2, 3};");
    let Stmt::LocalVar(first) = &stmts[0] else {
        panic!("expected local var");
    };
    let names: Vec<_> = first.declarators().map(|d| d.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
    let Stmt::LocalVar(third) = &stmts[2] else {
        panic!("expected local var");
    };
    let init = third
        .declarators()
        .next()
        .and_then(|d| d.array_init())
        .expect("array init");
    assert_eq!(init.elements().count(), 3);
    assert!(matches!(init.elements().next(), Some(ArrayElement::Expr(_))));
}

#[test]
fn if_else_if_chain_nests() {
    let stmts = statements("if (a) { x(); } else if (b) { y(); } else { z(); }");
    let Stmt::If(outer) = &stmts[0] else {
        panic!("expected if");
    };
    let inner = outer
        .else_branch()
        .and_then(|e| e.else_if())
        .expect("else if");
    assert!(inner.else_branch().and_then(|e| e.else_if()).is_none());
    assert!(matches!(
        inner.else_branch().and_then(|e| e.body()),
        Some(Stmt::Block(_))
    ));
}

#[test]
fn counted_and_foreach_loops() {
    let stmts = statements("for (int i = 0; i < n; i++) {}\nfor (String s : names) {}\nfor (;;) {}");
    let Stmt::For(counted) = &stmts[0] else {
        panic!("expected for");
    };
    assert!(counted.init().and_then(|i| i.local_var()).is_some());
    assert!(matches!(counted.condition(), Some(Expr::Binary(_))));
    assert_eq!(counted.update().expect("update").exprs().count(), 1);

    let Stmt::Foreach(each) = &stmts[1] else {
        panic!("expected foreach");
    };
    assert_eq!(each.param().expect("param").name(), "s");
    assert!(matches!(each.iterable(), Some(Expr::NameRef(_))));

    let Stmt::For(forever) = &stmts[2] else {
        panic!("expected for");
    };
    assert!(forever.init().is_none());
    assert!(forever.condition().is_none());
    assert!(forever.update().is_none());
}

#[test]
fn switch_colon_and_arrow_forms() {
    let stmts = statements(
        "switch (c) {\n case A, B:\n  x();\n  break;\n default:\n  y();\n}\nswitch (d) {\n case ONE -> a();\n default -> { b(); }\n}",
    );
    let Stmt::Switch(colon) = &stmts[0] else {
        panic!("expected switch");
    };
    let entries: Vec<_> = colon.entries().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].labels().count(), 2);
    assert_eq!(entries[0].statements().count(), 2);
    assert!(entries[1].is_default());
    assert!(!entries[0].is_arrow());

    let Stmt::Switch(arrow) = &stmts[1] else {
        panic!("expected switch");
    };
    let entries: Vec<_> = arrow.entries().collect();
    assert!(entries.iter().all(|e| e.is_arrow()));
    assert!(matches!(
        entries[0].labels().next().and_then(|l| l.expr()),
        Some(Expr::NameRef(n)) if n.text() == "ONE"
    ));
    assert!(matches!(entries[1].statements().next(), Some(Stmt::Block(_))));
}

#[test]
fn try_with_resources_catch_finally() {
    let stmts = statements(
        "try (var in = open()) {\n read(in);\n} catch (IOException | RuntimeException e) {\n log(e);\n} finally {\n close();\n}",
    );
    let Stmt::Try(stmt) = &stmts[0] else {
        panic!("expected try");
    };
    assert_eq!(stmt.resources().len(), 1);
    let catch = stmt.catches().next().expect("catch");
    let param = catch.param().expect("param");
    let types: Vec<_> = param.types().map(|t| t.simple_name()).collect();
    assert_eq!(types, vec!["IOException", "RuntimeException"]);
    assert_eq!(param.name(), "e");
    assert!(stmt.finally().and_then(|f| f.block()).is_some());
}

#[test]
fn jumps_labels_and_misc() {
    let stmts = statements(
        "outer: while (true) { break outer; }\ndo { i--; } while (i > 0);\nreturn;\nthrow new IllegalStateException(\"x\");\nassert x > 0 : \"neg\";\n;",
    );
    let Stmt::Labeled(labeled) = &stmts[0] else {
        panic!("expected labeled");
    };
    assert_eq!(labeled.label(), "outer");
    assert!(matches!(labeled.body(), Some(Stmt::While(_))));
    assert!(matches!(stmts[1], Stmt::DoWhile(_)));
    assert!(matches!(&stmts[2], Stmt::Return(r) if r.expr().is_none()));
    assert!(matches!(&stmts[3], Stmt::Throw(t) if matches!(t.expr(), Some(Expr::New(_)))));
    assert!(matches!(&stmts[4], Stmt::Assert(a) if a.message().is_some()));
    assert!(matches!(stmts[5], Stmt::Empty(_)));
}

// ── Expressions ────────────────────────────────────────────────────────

#[test]
fn precedence_of_arithmetic_and_logic() {
    let Expr::Binary(or) = expr("a || b && c == 1 + 2 * 3") else {
        panic!("expected binary");
    };
    assert_eq!(or.op(), Some(BinaryOp::Or));
    let Some(Expr::Binary(and)) = or.rhs() else {
        panic!("expected &&");
    };
    assert_eq!(and.op(), Some(BinaryOp::And));
    let Some(Expr::Binary(eq)) = and.rhs() else {
        panic!("expected ==");
    };
    assert_eq!(eq.op(), Some(BinaryOp::Eq));
    let Some(Expr::Binary(add)) = eq.rhs() else {
        panic!("expected +");
    };
    assert_eq!(add.op(), Some(BinaryOp::Add));
    assert!(matches!(add.rhs(), Some(Expr::Binary(mul)) if mul.op() == Some(BinaryOp::Mul)));
}

#[test]
fn shifts_are_joined_from_angle_brackets() {
    let Expr::Assign(assign) = expr("x = a >>> 2") else {
        panic!("expected assignment");
    };
    assert!(matches!(
        assign.value(),
        Some(Expr::Binary(b)) if b.op() == Some(BinaryOp::UShr)
    ));
    let Expr::Binary(shr) = expr("a >> b") else {
        panic!("expected binary");
    };
    assert_eq!(shr.op(), Some(BinaryOp::Shr));

    // Separated `>` tokens are not a shift.
    let parse = parse("class T { void m() { x = a > > b; } }");
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn compound_assignment_operator() {
    let Expr::Assign(assign) = expr("total += price * qty") else {
        panic!("expected assignment");
    };
    assert_eq!(assign.compound_op(), Some("+"));
}

#[test]
fn method_calls_and_field_access() {
    let Expr::MethodCall(call) = expr("this.items.get(0).trim()") else {
        panic!("expected call");
    };
    assert_eq!(call.name(), "trim");
    assert!(call.args().is_empty());
    let Some(Expr::MethodCall(get)) = call.receiver() else {
        panic!("expected receiver call");
    };
    assert_eq!(get.name(), "get");
    assert!(matches!(
        get.receiver(),
        Some(Expr::FieldAccess(f)) if f.name() == "items"
    ));

    let Expr::MethodCall(plain) = expr("print(\"hi\", 2)") else {
        panic!("expected call");
    };
    assert!(plain.receiver().is_none());
    assert_eq!(plain.args().len(), 2);
}

#[test]
fn casts_lambdas_and_method_refs() {
    assert!(matches!(expr("x = (int) y"), Expr::Assign(a) if matches!(a.value(), Some(Expr::Cast(_)))));
    assert!(matches!(expr("x = (a) + b"), Expr::Assign(a) if matches!(a.value(), Some(Expr::Binary(_)))));
    assert!(matches!(expr("list.forEach(s -> print(s))"), Expr::MethodCall(c) if matches!(c.args()[0], Expr::Lambda(_))));
    assert!(matches!(expr("run((a, b) -> { go(); })"), Expr::MethodCall(c) if matches!(&c.args()[0], Expr::Lambda(l) if l.block_body().is_some())));
    assert!(matches!(expr("names.forEach(System.out::println)"), Expr::MethodCall(c) if matches!(c.args()[0], Expr::MethodRef(_))));
}

#[test]
fn ternary_instanceof_and_creation() {
    assert!(matches!(expr("x = a ? b : c"), Expr::Assign(a) if matches!(a.value(), Some(Expr::Conditional(_)))));
    let Expr::Assign(assign) = expr("ok = o instanceof String s") else {
        panic!("expected assignment");
    };
    let Some(Expr::Instanceof(inst)) = assign.value() else {
        panic!("expected instanceof");
    };
    assert_eq!(inst.ty().expect("type").simple_name(), "String");
    assert_eq!(inst.binding().expect("binding").text(), "s");

    let Expr::Assign(assign) = expr("grid = new int[3][4]") else {
        panic!("expected assignment");
    };
    let Some(Expr::ArrayCreation(arr)) = assign.value() else {
        panic!("expected array creation");
    };
    assert_eq!(arr.dims().len(), 2);
}

#[test]
fn literal_kinds() {
    let Expr::MethodCall(call) = expr("f(1, 2.5, \"s\", 'c', true, null)") else {
        panic!("expected call");
    };
    let kinds: Vec<_> = call
        .args()
        .into_iter()
        .map(|a| match a {
            Expr::Literal(l) => l.kind(),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(LiteralKind::Int),
            Some(LiteralKind::Float),
            Some(LiteralKind::String),
            Some(LiteralKind::Char),
            Some(LiteralKind::True),
            Some(LiteralKind::Null)
        ]
    );
}

#[test]
fn switch_expression_with_yield() {
    let stmts = statements("int n = switch (k) {\n case 1 -> 10;\n default -> {\n  yield 0;\n }\n};");
    let Stmt::LocalVar(decl) = &stmts[0] else {
        panic!("expected local var");
    };
    let init = decl.declarators().next().and_then(|d| d.init());
    let Some(Expr::Switch(switch)) = init else {
        panic!("expected switch expression");
    };
    assert!(switch.is_expr());
    assert_eq!(switch.entries().count(), 2);
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn only_first_error_is_reported() {
    let parse = parse("class A {\n void f() {\n  int x = ;\n  y = ;\n }\n}\n");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message, "expected expression");
    // The tree still covers the whole input.
    assert_eq!(
        parse.syntax().text().to_string(),
        "class A {\n void f() {\n  int x = ;\n  y = ;\n }\n}\n"
    );
}

#[test]
fn missing_closing_brace_points_at_opener() {
    let parse = parse("class A {\n void f() {\n  x();\n");
    assert_eq!(parse.errors().len(), 1);
    assert!(parse.errors()[0].related.is_some());
}

// ── Tree layout ────────────────────────────────────────────────────────

#[test]
fn node_ranges_exclude_surrounding_trivia() {
    let parse = parse("class A {\n  // lead\n  int x;\n}\n");
    let field = find(&parse.syntax(), SyntaxKind::FIELD_DECL);
    assert_eq!(field.text().to_string(), "int x;");
}

#[test]
fn return_statement_tree() {
    let parse = parse("class A{int f(){return a+1;}}");
    let ret = find(&parse.syntax(), SyntaxKind::RETURN_STMT);
    assert_snapshot!(debug_tree(&ret), @r#"
    RETURN_STMT@16..27
      RETURN_KW@16..22 "return"
      WHITESPACE@22..23 " "
      BINARY_EXPR@23..26
        NAME_REF@23..24
          IDENT@23..24 "a"
        PLUS@24..25 "+"
        LITERAL@25..26
          INT_LITERAL@25..26 "1"
      SEMICOLON@26..27 ";"
    "#);
}
