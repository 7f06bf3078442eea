//! Compilation unit and type declarations.

use jnade_parser::ast::item::{ClassBody, Member, SourceFile, TypeDecl, TypeDeclKind};
use jnade_parser::ast::AstNode;

use super::Walker;
use crate::item::Priority;

/// Annotation that marks a type as a web endpoint.
const WEB_MARKER: &str = "RestController";

impl Walker<'_> {
    pub(super) fn convert_source_file(&mut self, file: &SourceFile) {
        if let Some(package) = file.package() {
            self.convert_package(&package);
        }
        for import in file.imports() {
            self.convert_import(&import);
        }
        for decl in file.types() {
            self.convert_type(&decl, "");
        }
    }

    /// Header, marker line and close of a type; members are walked one
    /// unit deeper than `class_indent`.
    pub(super) fn convert_type(&mut self, decl: &TypeDecl, class_indent: &str) {
        let node = decl.syntax();
        let begin = self.begin_line(node);
        let end = self.end_line(node);
        tracing::debug!(name = %decl.name(), line = begin, "type declaration");

        if let Some(modifiers) = decl.modifiers() {
            for annotation in modifiers.annotations() {
                if annotation.name() == WEB_MARKER {
                    let line = self.begin_line(annotation.syntax());
                    self.emit(line, format!("{class_indent}Web応答用。"), Priority::MARKER);
                }
            }
        }

        self.emit(
            begin,
            format!("{class_indent}{}", type_header(decl)),
            Priority::TYPE_HEADER,
        );

        let member_indent = self.nest(class_indent);
        self.indent.stamp_range(begin + 1, end.saturating_sub(1), &member_indent);
        let mut member_on_close_line = false;
        if let Some(body) = decl.body() {
            // Members sharing the header or closing line still sit one unit in.
            for member in body.members() {
                let line = self.begin_line(member.syntax());
                if line == begin || line == end {
                    self.indent.set(line, &member_indent);
                }
                member_on_close_line |= self.end_line(member.syntax()) == end;
            }
            self.convert_members(&body, &member_indent);
        }

        // A member closing on this line prints its own close first.
        let close = if member_on_close_line {
            Priority::END_OF_CONSTRUCT
        } else {
            Priority::TYPE_CLOSE
        };
        self.emit(end, format!("{class_indent}ここまで。"), close);
    }

    fn convert_members(&mut self, body: &ClassBody, member_indent: &str) {
        for member in body.members() {
            match &member {
                Member::Field(field) => self.convert_field(field),
                Member::Method(method) => self.convert_method(method),
                Member::Constructor(ctor) => self.convert_constructor(ctor),
                Member::Type(nested) => self.convert_type(nested, member_indent),
                Member::Initializer(init) => {
                    if let Some(block) = init.body() {
                        self.process_block(&block, member_indent);
                    }
                }
                Member::EnumConstant(_) => {}
            }
        }
    }
}

/// `クラス N`, `抽象クラス N` and their inheritance clauses. Only the first
/// extended and the first implemented type are named.
fn type_header(decl: &TypeDecl) -> String {
    let name = decl.name();
    let extended = decl.extended_types().first().map(|t| t.simple_name());
    if decl.kind() == TypeDeclKind::Interface {
        return match extended {
            Some(parent) => format!("抽象クラス {name}は {parent}を継承"),
            None => format!("抽象クラス {name}"),
        };
    }
    let implemented = decl.implemented_types().first().map(|t| t.simple_name());
    match (extended, implemented) {
        (Some(parent), Some(iface)) => format!("クラス {name}は {parent}を継承、{iface}を実装"),
        (Some(parent), None) => format!("クラス {name}は {parent}を継承"),
        (None, Some(iface)) => format!("クラス {name}は {iface}を実装"),
        (None, None) => format!("クラス {name}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::translate_text;

    #[test]
    fn headers() {
        assert_eq!(
            translate_text("class A extends B<T> {\n}"),
            "クラス Aは Bを継承\nここまで。\n"
        );
        assert_eq!(
            translate_text("class A implements I, J {\n}"),
            "クラス Aは Iを実装\nここまで。\n"
        );
        assert_eq!(
            translate_text("class Foo extends Bar implements Baz {\n}"),
            "クラス Fooは Barを継承、Bazを実装\nここまで。\n"
        );
        assert_eq!(
            translate_text("interface S extends Comparable<S> {\n}"),
            "抽象クラス Sは Comparableを継承\nここまで。\n"
        );
    }

    #[test]
    fn single_line_class_puts_header_before_close() {
        assert_eq!(translate_text("class A { }\n"), "クラス A\nここまで。\n");
    }

    #[test]
    fn single_line_enum_with_constructor() {
        assert_eq!(
            translate_text("enum Color { RED; Color() {} }\n"),
            "クラス Color\n　Color生成時\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn members_on_the_closing_line_are_nested() {
        let source = "class A {\n  void m() {\n    f(); } }\n";
        assert_eq!(
            translate_text(source),
            "クラス A\n　関数 mとは\n　　f。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn marker_annotation_precedes_header() {
        let out = translate_text("@RestController\npublic class Api {\n}\n");
        assert_eq!(out, "Web応答用。\nクラス Api\nここまで。\n");
        let out = translate_text("@Deprecated class Old {\n}\n");
        assert_eq!(out, "クラス Old\nここまで。\n");
    }

    #[test]
    fn nested_types_indent_by_depth() {
        let source = "class Outer {\n  static class Inner {\n    int n;\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス Outer\n　クラス Inner\n　　nとは整数。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn static_initializer_is_walked_at_member_indent() {
        let source = "class A {\n  static {\n    f();\n  }\n}\n";
        assert_eq!(translate_text(source), "クラス A\n　f。\nここまで。\n");
    }
}
