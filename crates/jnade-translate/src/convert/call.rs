//! Expression statements: printing, calls, assignments and increments.

use jnade_parser::ast::expr::{AssignExpr, Expr, MethodCall};
use jnade_parser::ast::stmt::ExprStmt;
use jnade_parser::ast::{raw_text, AstNode};
use jnade_parser::SyntaxKind;

use super::decl::{array_creation, array_literal};
use super::Walker;
use crate::expr::idioms::{calendar_field, CallView};
use crate::expr::{argument, assign_target};
use crate::item::Priority;

/// `System.out.println` (also matched misspelled as `pritnln`) and
/// `System.out.print`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Print {
    Line,
    Inline,
}

impl Walker<'_> {
    pub(super) fn convert_expr_stmt(&mut self, stmt: &ExprStmt) {
        let Some(expr) = stmt.expr() else {
            return;
        };
        let line = self.begin_line(stmt.syntax());
        let indent = self.indent.get(line).to_string();

        let text = match &expr {
            Expr::MethodCall(call) => match print_kind(call) {
                Some(kind) => self.print(call, kind),
                None => Some(self.call_statement(call)),
            },
            Expr::Assign(assign) => self.assignment(assign),
            Expr::Prefix(_) | Expr::Postfix(_) => self.increment(&expr),
            other => self.expr.translate(other).map(|t| format!("{t}。")),
        };
        match text {
            Some(text) => self.emit(line, format!("{indent}{text}"), Priority::STATEMENT),
            None => tracing::debug!(line, "expression statement has no rendering"),
        }
    }

    fn print(&self, call: &MethodCall, kind: Print) -> Option<String> {
        let Some(first) = call.args().into_iter().next() else {
            return match kind {
                Print::Line => Some("改行。".to_string()),
                Print::Inline => None,
            };
        };
        let content = self
            .expr
            .translate(&first)
            .unwrap_or_else(|| format!("({})", raw_text(first.syntax())));
        Some(match kind {
            Print::Line => format!("{content}と表示。"),
            Print::Inline => format!("{content}と無改行表示。"),
        })
    }

    /// Statement-only phrases first, then the expression idiom table.
    fn call_statement(&self, call: &MethodCall) -> String {
        let view = CallView::new(call);
        if let Some(text) = self.statement_idiom(&view) {
            return text;
        }
        format!("{}。", self.expr.call_view_idiom(&view))
    }

    fn statement_idiom(&self, c: &CallView) -> Option<String> {
        let scope = c.receiver_text();
        let args = &c.args;
        match (c.name.as_str(), args.as_slice()) {
            ("forName", [class]) if scope == "Class" => {
                return Some(format!("{}を登録。", argument(class)));
            }
            ("executeUpdate", _) if matches!(c.receiver, Some(Expr::MethodCall(_))) => {
                return Some("connを使用して sql を実行。".to_string());
            }
            ("sort", [array]) if scope.ends_with("Arrays") => {
                return Some(format!("{}を配列ソート。", argument(array)));
            }
            ("getInstance", _) if scope.contains("Calendar") => {
                return Some("カレンダー生成。".to_string());
            }
            _ => {}
        }

        // The rest act on a receiver.
        c.receiver.as_ref()?;
        let operand = |e: &Expr| self.expr.idiom_operand(e);
        let text = match (c.name.as_str(), args.as_slice()) {
            ("set", [y, mo, d, h, mi, s]) => format!(
                "{scope}に {}年{}月{}日{}時{}分{}秒 を設定。",
                operand(y),
                operand(mo),
                operand(d),
                operand(h),
                operand(mi),
                operand(s)
            ),
            ("set", [Expr::FieldAccess(field), value]) => {
                let name = field.name();
                let field = calendar_field(&name).map(str::to_string).unwrap_or(name);
                format!("{scope}の{field}を{}に設定。", operand(value))
            }
            ("setTime", [date]) => format!("{scope}の日時を {} に設定。", operand(date)),
            ("put", [key, value]) => {
                format!("{scope}に({}, {})格納。", argument(key), argument(value))
            }
            ("remove", [key]) => format!("{scope}の{}削除。", argument(key)),
            ("add", [item]) => {
                let target = content_pane_owner(c).unwrap_or(scope);
                format!("{target}に{}追加。", argument(item))
            }
            ("setLayout", [Expr::New(layout)]) => {
                let frame = content_pane_owner(c)?;
                let class = layout.ty().map(|t| t.simple_name()).unwrap_or_default();
                format!("{frame}のレイアウトを {class} に設定。")
            }
            ("setDefaultCloseOperation", [operation]) => {
                let operation = raw_text(operation.syntax());
                if operation.ends_with("EXIT_ON_CLOSE") {
                    format!("{scope} を 閉じるボタンで終了するように設定。")
                } else {
                    let operation = operation.replace("JLabel.", "JFrame.");
                    format!("{scope}の終了操作を ({operation}) に設定。")
                }
            }
            ("setSize", [_] | [_, _]) => {
                let size = args.iter().map(argument).collect::<Vec<_>>().join(", ");
                format!("{scope}のサイズを({size})に設定。")
            }
            ("setVisible", [Expr::Literal(flag)]) if flag.text() == "true" => {
                format!("{scope}を表示。")
            }
            ("write", [content]) => {
                format!("{scope}に{}書込。", self.expr.translate_or_raw(content))
            }
            ("close", []) => format!("{scope}を閉じる。"),
            _ => return None,
        };
        Some(text)
    }

    fn assignment(&self, assign: &AssignExpr) -> Option<String> {
        let target = assign.target()?;
        if assign.op() != Some(SyntaxKind::EQ) {
            let value = self.expr.translate(&Expr::Assign(assign.clone()))?;
            return Some(format!("{} は {value}。", assign_target(&target)));
        }

        if let Some(init) = assign.array_init() {
            return Some(format!("{}は{}。", raw_text(target.syntax()), array_literal(&init)));
        }
        let value = assign.value()?;
        if let Expr::ArrayCreation(creation) = &value {
            let content = array_creation(creation)?;
            return Some(format!("{}は{content}。", raw_text(target.syntax())));
        }
        let value = self.expr.translate(&value)?;
        Some(format!("{} は {value}。", assign_target(&target)))
    }

    /// `x++;` as `x は (x + 1)。`.
    fn increment(&self, expr: &Expr) -> Option<String> {
        let operand = match expr {
            Expr::Prefix(p) => p.operand()?,
            Expr::Postfix(p) => p.operand()?,
            _ => return None,
        };
        let value = self.expr.translate(expr)?;
        Some(format!("{} は {value}。", raw_text(operand.syntax())))
    }
}

/// `System.out.println` / `print`.
fn print_kind(call: &MethodCall) -> Option<Print> {
    let kind = match call.name().as_str() {
        "println" | "pritnln" => Print::Line,
        "print" => Print::Inline,
        _ => return None,
    };
    let Some(Expr::FieldAccess(out)) = call.receiver() else {
        return None;
    };
    match out.receiver() {
        Some(Expr::NameRef(system)) if out.name() == "out" && system.text() == "System" => {
            Some(kind)
        }
        _ => None,
    }
}

/// `frame` in `frame.getContentPane().method(..)`.
fn content_pane_owner(c: &CallView) -> Option<String> {
    match &c.receiver {
        Some(Expr::MethodCall(pane)) if pane.name() == "getContentPane" => {
            pane.receiver().map(|frame| raw_text(frame.syntax()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::translate_body;

    fn one(statement: &str) -> String {
        let lines = translate_body(&format!("    {statement}"));
        assert_eq!(lines.len(), 1, "{statement} gave {lines:?}");
        lines[0].trim_start_matches('　').to_string()
    }

    #[test]
    fn printing() {
        assert_eq!(one("System.out.println(\"hello\");"), "「hello」と表示。");
        assert_eq!(one("System.out.println();"), "改行。");
        assert_eq!(one("System.out.print(x);"), "xと無改行表示。");
        assert_eq!(one("System.out.pritnln(\"a\" + n);"), "「a{n}」と表示。");
        assert_eq!(translate_body("    System.out.print();"), Vec::<String>::new());
    }

    #[test]
    fn other_print_receivers_are_plain_calls() {
        assert_eq!(one("System.err.println(\"x\");"), "System.errのprintln(「x」)。");
    }

    #[test]
    fn statement_idioms() {
        assert_eq!(one("Class.forName(\"org.h2.Driver\");"), "「org.h2.Driver」を登録。");
        assert_eq!(
            one("conn.prepareStatement(sql).executeUpdate();"),
            "connを使用して sql を実行。"
        );
        assert_eq!(one("Arrays.sort(a);"), "aを配列ソート。");
        assert_eq!(one("map.put(\"k\", 1);"), "mapに(「k」, 1)格納。");
        assert_eq!(one("map.remove(key);"), "mapのkey削除。");
        assert_eq!(one("list.add(x);"), "listにx追加。");
        assert_eq!(one("w.close();"), "wを閉じる。");
        assert_eq!(one("w.write(\"a\");"), "wに「a」書込。");
    }

    #[test]
    fn calendar_statements() {
        assert_eq!(one("c.set(2024, 1, 2, 3, 4, 5);"), "cに 2024年1月2日3時4分5秒 を設定。");
        assert_eq!(one("c.set(Calendar.YEAR, y);"), "cの年をyに設定。");
        assert_eq!(one("c.setTime(d);"), "cの日時を d に設定。");
        assert_eq!(one("Calendar.getInstance();"), "カレンダー生成。");
    }

    #[test]
    fn gui_statements() {
        assert_eq!(
            one("frame.getContentPane().setLayout(new FlowLayout());"),
            "frameのレイアウトを FlowLayout に設定。"
        );
        assert_eq!(one("frame.getContentPane().add(label);"), "frameにlabel追加。");
        assert_eq!(
            one("f.setDefaultCloseOperation(JFrame.EXIT_ON_CLOSE);"),
            "f を 閉じるボタンで終了するように設定。"
        );
        assert_eq!(
            one("f.setDefaultCloseOperation(JLabel.HIDE_ON_CLOSE);"),
            "fの終了操作を (JFrame.HIDE_ON_CLOSE) に設定。"
        );
        assert_eq!(one("f.setSize(300, 200);"), "fのサイズを(300, 200)に設定。");
        assert_eq!(one("f.setVisible(true);"), "fを表示。");
    }

    #[test]
    fn calls_fall_back_to_the_idiom_table() {
        assert_eq!(one("sb.append(\"x\");"), "sbに「x」追加。");
        assert_eq!(one("this.reset();"), "自身のreset。");
        assert_eq!(one("run(a, 2);"), "run(a, 2)。");
    }

    #[test]
    fn assignments() {
        assert_eq!(one("x = 5;"), "x は 5。");
        assert_eq!(one("p.hp = 10;"), "pのhp は 10。");
        assert_eq!(one("total += price * 2;"), "total は (total + (price * 2))。");
        assert_eq!(one("a = new int[3];"), "aは整数配列(長さ3)生成。");
        assert_eq!(one("i++;"), "i は (i + 1)。");
        assert_eq!(one("--i;"), "i は (i - 1)。");
    }

    #[test]
    fn object_creation_statement() {
        assert_eq!(one("new Thread(r);"), "Thread(r)生成。");
    }
}
