//! Methods, constructors, explicit constructor calls and `return`.

use jnade_parser::ast::expr::Expr;
use jnade_parser::ast::item::{ConstructorDecl, MethodDecl, ParamList};
use jnade_parser::ast::stmt::{ExplicitCtorCall, ReturnStmt};
use jnade_parser::ast::AstNode;

use super::Walker;
use crate::expr::argument;
use crate::item::Priority;

/// The program entry point gets a fixed header.
const ENTRY_POINT: &str = "main";

impl Walker<'_> {
    pub(super) fn convert_method(&mut self, method: &MethodDecl) {
        let node = method.syntax();
        let line = self.begin_line(node);
        let outer = self.indent.get(line).to_string();
        let name = method.name();
        tracing::debug!(name = %name, line, "method");

        // Annotation and signature lines down to the opening brace.
        let body_line = method
            .body()
            .map(|body| self.begin_line(body.syntax()))
            .unwrap_or(line);
        self.indent.stamp_range(line, body_line.saturating_sub(1), &outer);

        if name == ENTRY_POINT {
            self.emit(line, format!("{outer}関数　メイン関数とは"), Priority::TYPE_HEADER);
        } else {
            let header = match param_names(method.param_list()) {
                params if params.is_empty() => format!("関数 {name}とは"),
                params => format!("関数 {name}({params})とは"),
            };
            self.emit(line, format!("{outer}{header}"), Priority::METHOD_HEADER);
        }

        match method.body() {
            Some(body) => {
                let inner = self.nest(&outer);
                self.process_block(&body, &inner);
                let end = self.end_line(node);
                self.emit(end, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE);
            }
            None => self.emit(line, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE),
        }
    }

    pub(super) fn convert_constructor(&mut self, ctor: &ConstructorDecl) {
        let line = self.begin_line(ctor.syntax());
        let outer = self.indent.get(line).to_string();
        let name = ctor.name();
        tracing::debug!(name = %name, line, "constructor");

        let header = match param_names(ctor.param_list()) {
            params if params.is_empty() => format!("{name}生成時"),
            params => format!("{name}({params})生成時"),
        };
        self.emit(line, format!("{outer}{header}"), Priority::TYPE_HEADER);

        if let Some(body) = ctor.body() {
            let inner = self.nest(&outer);
            self.process_block(&body, &inner);
            let end = self.end_line(body.syntax());
            self.emit(end, format!("{outer}ここまで。"), Priority::BLOCK_CLOSE);
        }
    }

    /// `this(...)` / `super(...)` as the first statement of a constructor.
    pub(super) fn convert_ctor_call(&mut self, call: &ExplicitCtorCall) {
        let line = self.begin_line(call.syntax());
        let indent = self.indent.get(line).to_string();
        let target = if call.is_super() {
            "親のコンストラクタ"
        } else {
            "自身のコンストラクタ"
        };
        let args = call
            .arg_list()
            .map(|list| list.args().map(|a| argument(&a)).collect::<Vec<_>>())
            .unwrap_or_default();
        let text = if args.is_empty() {
            format!("{indent}{target}。")
        } else {
            format!("{indent}{target}({})。", args.join(", "))
        };
        self.emit(line, text, Priority::STATEMENT);
    }

    /// A return the enclosing `if` has not already rendered. A bare
    /// `return;` has no rendering here.
    pub(super) fn convert_return(&mut self, ret: &ReturnStmt) {
        if self.owned_returns.contains(&ret.syntax().text_range()) {
            return;
        }
        let Some(value) = ret.expr() else {
            return;
        };
        let line = self.begin_line(ret.syntax());
        let indent = self.indent.get(line).to_string();

        let mut text = self.expr.translate_or_raw(&value);
        // `return new X()` hands back the object, not the act of creating it.
        if matches!(value, Expr::New(_)) {
            if let Some(stripped) = text.strip_suffix("生成") {
                text = stripped.to_string();
            }
        }
        self.emit(line, format!("{indent}{text}を戻す。"), Priority::RETURN);
    }
}

/// Parameter names joined with `, `.
fn param_names(list: Option<ParamList>) -> String {
    list.map(|l| l.params().map(|p| p.name()).collect::<Vec<_>>().join(", "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::test_support::{translate_body, translate_text};

    #[test]
    fn method_headers() {
        let source = "class A {\n  int add(int a, int b) {\n    return a + b;\n  }\n  void run() {\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス A\n　関数 add(a, b)とは\n　　(a + b)を戻す。\n　ここまで。\n　関数 runとは\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn entry_point() {
        let source = "public class Main {\n  public static void main(String[] args) {\n    System.out.println(\"hi\");\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス Main\n　関数　メイン関数とは\n　　「hi」と表示。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn abstract_method_closes_on_its_own_line() {
        let source = "interface Shape {\n  double area();\n}\n";
        assert_eq!(
            translate_text(source),
            "抽象クラス Shape\n　関数 areaとは\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn annotation_lines_share_the_header_line() {
        let source = "class A {\n  @Override\n  public String toString() {\n    return name;\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス A\n　関数 toStringとは\n　　nameを戻す。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn constructors_and_explicit_calls() {
        let source = "class Hero extends Unit {\n  Hero(String name) {\n    super(name, \"x\");\n    this.name = name;\n  }\n  Hero() {\n    this(\"anon\");\n  }\n}\n";
        assert_eq!(
            translate_text(source),
            "クラス Heroは Unitを継承\n　Hero(name)生成時\n　　親のコンストラクタ(name, 「x」)。\n　　自身のname は name。\n　ここまで。\n　Hero生成時\n　　自身のコンストラクタ(「anon」)。\n　ここまで。\nここまで。\n"
        );
    }

    #[test]
    fn returning_a_new_object_drops_the_creation_verb() {
        assert_eq!(translate_body("    return new Point(1, 2);"), vec!["　　Point(1, 2)を戻す。"]);
        assert_eq!(translate_body("    return;"), Vec::<String>::new());
    }
}
