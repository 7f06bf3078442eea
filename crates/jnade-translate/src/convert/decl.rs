//! Field and local variable declarations, and array values.

use jnade_parser::ast::expr::{ArrayCreation, Expr};
use jnade_parser::ast::item::{
    ArrayElement, ArrayInit, FieldDecl, Modifiers, TypeRef, VarDeclarator,
};
use jnade_parser::ast::stmt::LocalVarDecl;
use jnade_parser::ast::{raw_text, AstNode};
use jnade_parser::SyntaxKind;

use super::Walker;
use crate::expr::literal::type_name;
use crate::item::Priority;

/// Where a declarator lives; uninitialized locals read `型。`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclSite {
    Local,
    Field,
}

impl Walker<'_> {
    pub(super) fn convert_local_var(&mut self, decl: &LocalVarDecl) {
        let is_final = is_final(decl.modifiers());
        let ty = decl.ty();
        for declarator in decl.declarators() {
            self.convert_declarator(&declarator, ty.as_ref(), is_final, DeclSite::Local);
        }
    }

    pub(super) fn convert_field(&mut self, field: &FieldDecl) {
        let is_final = is_final(field.modifiers());
        let ty = field.ty();
        for declarator in field.declarators() {
            self.convert_declarator(&declarator, ty.as_ref(), is_final, DeclSite::Field);
        }
    }

    fn convert_declarator(
        &mut self,
        declarator: &VarDeclarator,
        ty: Option<&TypeRef>,
        is_final: bool,
        site: DeclSite,
    ) {
        let line = self.begin_line(declarator.syntax());
        let indent = self.indent.get(line).to_string();
        let name = declarator.name();

        if let Some(init) = declarator.array_init() {
            self.emit(line, format!("{indent}{name}は{}。", array_literal(&init)), Priority::STATEMENT);
            return;
        }

        let Some(value) = declarator.init() else {
            if declarator.has_initializer() {
                return;
            }
            let mut java = ty.map(|t| t.text()).unwrap_or_default();
            java.push_str(&"[]".repeat(declarator.extra_dims()));
            let ty = type_name(&java);
            let text = match site {
                DeclSite::Local => format!("{indent}{name}とは{ty}型。"),
                DeclSite::Field => format!("{indent}{name}とは{ty}。"),
            };
            self.emit(line, text, Priority::STATEMENT);
            return;
        };

        if let Expr::ArrayCreation(creation) = &value {
            if let Some(content) = array_creation(creation) {
                self.emit(line, format!("{indent}{name}は{content}。"), Priority::STATEMENT);
            }
            return;
        }

        let Some(rendered) = self.expr.translate(&value) else {
            tracing::debug!(name = %name, line, "initializer has no rendering");
            return;
        };
        let text = if is_final {
            format!("{indent}{name}は{rendered}と定める。")
        } else {
            format!("{indent}{name} は {rendered}。")
        };
        self.emit(line, text, Priority::STATEMENT);
    }
}

fn is_final(modifiers: Option<Modifiers>) -> bool {
    modifiers.is_some_and(|m| m.has(SyntaxKind::FINAL_KW))
}

/// `[a,b]` with elements as written; nested initializers recurse.
pub(super) fn array_literal(init: &ArrayInit) -> String {
    let elements = init
        .elements()
        .map(|element| match element {
            ArrayElement::Expr(e) => raw_text(e.syntax()),
            ArrayElement::Nested(nested) => array_literal(&nested),
        })
        .collect::<Vec<_>>();
    format!("[{}]", elements.join(","))
}

/// `new T[n]` and friends. An explicit initializer wins over the sizes;
/// `None` when neither is given.
pub(super) fn array_creation(creation: &ArrayCreation) -> Option<String> {
    if let Some(init) = creation.init() {
        return Some(array_literal(&init));
    }
    let ty = type_name(&creation.ty().map(|t| t.text()).unwrap_or_default());
    let dims: Vec<String> = creation.dims().iter().map(|d| raw_text(d.syntax())).collect();
    let size = match dims.as_slice() {
        [] => return None,
        [length] => format!("長さ{length}"),
        [rows, cols] => format!("行{rows},列{cols}"),
        _ => dims.join("×"),
    };
    Some(format!("{ty}配列({size})生成"))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{translate_body, translate_text};

    #[test]
    fn initialized_locals() {
        let body = "    int x = 1, y = x + 2;\n    final double RATE = 0.5;\n    String s = \"hi\";\n    Object o = null;";
        assert_eq!(
            translate_body(body),
            vec![
                "　　x は 1。",
                "　　y は (x + 2)。",
                "　　RATEは0.5と定める。",
                "　　s は 「hi」。",
                "　　o は null。",
            ]
        );
    }

    #[test]
    fn uninitialized_locals_and_fields() {
        let source = "class A {\n  String name;\n  int[] scores;\n  void m() {\n    Hero h;\n    int grid[][];\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス A\n　nameとは文字列。\n　scoresとは整数配列。\n　関数 mとは\n　　hとはHero型。\n　　gridとは整数配列配列型。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn arrays() {
        let body = "    int[] a = {1, 2, 3};\n    int[][] m = {{1, 2}, {3}};\n    int[] b = new int[5];\n    int[][] c = new int[3][4];\n    int[][][] d = new int[2][3][4];\n    String[] e = new String[] {\"x\"};\n    int[][] f = new int[3][];";
        assert_eq!(
            translate_body(body),
            vec![
                "　　aは[1,2,3]。",
                "　　mは[[1,2],[3]]。",
                "　　bは整数配列(長さ5)生成。",
                "　　cは整数配列(行3,列4)生成。",
                "　　dは整数配列(2×3×4)生成。",
                "　　eは[\"x\"]。",
                "　　fは整数配列(長さ3)生成。",
            ]
        );
    }

    #[test]
    fn final_field() {
        let source = "class A {\n  static final int MAX = 10;\n}\n";
        assert_eq!(translate_text(source), "クラス A\n　MAXは10と定める。\nここまで。\n");
    }
}
