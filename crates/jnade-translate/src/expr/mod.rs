//! Expression and condition translation.
//!
//! [`ExprTranslator::translate`] renders an expression as notation text or
//! gives up with `None`, in which case callers copy the raw source text.
//! [`ExprTranslator::condition`] renders a boolean context and never fails.
//! The two are mutually recursive; both draw on one recursion budget so a
//! pathological input cannot overflow the stack.
//!
//! Dispatch in `translate` is ordered from most to least specific:
//!
//! 1. assignment nested in an expression: `(t は V)`
//! 2. boolean-shaped expressions via the condition renderer, as `<C>`
//! 3. `instanceof`
//! 4. compound assignment
//! 5. `++` / `--`
//! 6. `+` chains containing a string literal, flattened into one literal
//! 7. other binary operators
//! 8. object creation
//! 9. method calls through the idiom table ([`idioms`])
//! 10. field access
//! 11. `this`
//! 12. string, text block and char literals
//! 13. plain values (numbers, booleans, names, raw text)

pub mod cond;
pub mod idioms;
pub mod literal;

use std::cell::Cell;

use jnade_parser::ast::expr::{
    AssignExpr, BinaryExpr, BinaryOp, Expr, FieldAccess, LiteralKind, MethodCall, NewExpr,
};
use jnade_parser::ast::{raw_text, AstNode};
use jnade_parser::SyntaxKind;

use self::literal::{quoted, unwrap, value_string};

/// Stateless apart from its recursion budget; one per translation.
#[derive(Debug)]
pub struct ExprTranslator {
    max_depth: usize,
    depth: Cell<usize>,
}

/// Releases one unit of recursion budget when dropped.
pub(crate) struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl ExprTranslator {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: Cell::new(0),
        }
    }

    /// Take one unit of budget, or `None` when it is exhausted.
    pub(crate) fn enter(&self) -> Option<DepthGuard<'_>> {
        if self.depth.get() >= self.max_depth {
            tracing::debug!(max_depth = self.max_depth, "expression too deep, using raw text");
            return None;
        }
        self.depth.set(self.depth.get() + 1);
        Some(DepthGuard { depth: &self.depth })
    }

    /// Translate `expr`, or `None` when no rendering applies.
    pub fn translate(&self, expr: &Expr) -> Option<String> {
        let _guard = self.enter()?;
        let nested = !is_statement_expr(expr);
        let e = unwrap(expr.clone());

        if let Expr::Assign(assign) = &e {
            if assign.op() == Some(SyntaxKind::EQ) && nested {
                let target = assign.target().map(|t| raw_text(t.syntax())).unwrap_or_default();
                let value = self.assigned_value(assign);
                return Some(format!("({target} は {value})"));
            }
        }

        if is_boolean_shaped(&e) {
            let rendered = self.condition(&e, true, true);
            if !rendered.ends_with("が真") {
                return Some(format!("<{rendered}>"));
            }
        }

        match &e {
            Expr::Instanceof(test) => {
                let object = test
                    .expr()
                    .map(|o| self.translate_or_raw(&o))
                    .unwrap_or_default();
                let ty = test.ty().map(|t| t.text()).unwrap_or_default();
                return Some(match test.binding() {
                    Some(var) => format!("({object}が{ty}型で{}に代入できる)", var.text()),
                    None => format!("{object}が{ty}型"),
                });
            }
            Expr::Assign(assign) if assign.op() != Some(SyntaxKind::EQ) => {
                if let Some(text) = self.compound_assign(assign) {
                    return Some(text);
                }
            }
            Expr::Prefix(_) | Expr::Postfix(_) => {
                if let Some(text) = increment(&e) {
                    return Some(text);
                }
            }
            Expr::Binary(binary) => {
                if binary.op() == Some(BinaryOp::Add) && contains_string_literal(&e) {
                    return Some(self.concatenation(binary));
                }
                if let Some(text) = self.binary(expr, binary) {
                    return Some(text);
                }
            }
            Expr::New(new) => return Some(self.object_creation(new)),
            Expr::MethodCall(call) => return Some(self.call_idiom(call)),
            Expr::FieldAccess(field) => return Some(self.field_access(field)),
            Expr::This(_) => return Some("自身".to_string()),
            Expr::Literal(lit) if lit.is_textual() => return quoted(lit),
            _ => {}
        }

        value_string(&e)
    }

    /// [`translate`](Self::translate) with the raw source text as fallback.
    pub fn translate_or_raw(&self, expr: &Expr) -> String {
        self.translate(expr)
            .unwrap_or_else(|| raw_text(expr.syntax()))
    }

    /// Right-hand side of an assignment: array initializers are copied raw.
    fn assigned_value(&self, assign: &AssignExpr) -> String {
        match (assign.value(), assign.array_init()) {
            (Some(value), _) => self.translate_or_raw(&value),
            (None, Some(init)) => raw_text(init.syntax()),
            (None, None) => String::new(),
        }
    }

    /// `(t op v)`, with a nested assignment on the right rendered inline.
    fn compound_assign(&self, assign: &AssignExpr) -> Option<String> {
        let op = arithmetic(assign.compound_op()?)?;
        let target = assign_target(&assign.target()?);
        let value = assign.value()?;
        if let Expr::Assign(inner) = unwrap(value.clone()) {
            let inner_target = inner.target().map(|t| raw_text(t.syntax())).unwrap_or_default();
            let inner_value = self.assigned_value(&inner);
            let inner_text = match inner.op() {
                Some(SyntaxKind::EQ) => format!("{inner_target} は {inner_value}"),
                _ => {
                    let inner_op = inner.compound_op().unwrap_or("");
                    format!("{inner_target} は {inner_target} {inner_op} {inner_value}")
                }
            };
            return Some(format!("({target} {op} ({inner_text}))"));
        }
        Some(format!("({target} {op} {})", self.translate_or_raw(&value)))
    }

    /// One literal for a whole `+` chain. The chain is walked with an
    /// explicit stack, so its length is not limited by the call stack.
    fn concatenation(&self, binary: &BinaryExpr) -> String {
        let mut out = String::from("「");
        for part in additions(&Expr::Binary(binary.clone())) {
            self.concatenation_part(&part, &mut out);
        }
        out.push('」');
        out
    }

    fn concatenation_part(&self, expr: &Expr, out: &mut String) {
        let part = match expr {
            Expr::Literal(lit) if lit.kind() == Some(LiteralKind::String) => {
                let content = lit.quoted_content().unwrap_or_default();
                out.push_str(&literal::convert_escapes(&content));
                return;
            }
            Expr::Literal(lit) if matches!(lit.kind(), Some(LiteralKind::Int | LiteralKind::Float)) => {
                value_string(expr).unwrap_or_else(|| lit.text())
            }
            Expr::NameRef(name) => name.text(),
            Expr::FieldAccess(_) => self.translate_or_raw(expr),
            Expr::MethodCall(call) => self.call_idiom(call),
            other => raw_text(other.syntax()),
        };
        out.push('{');
        out.push_str(&part);
        out.push('}');
    }

    /// Binary operators other than string concatenation. `original` is the
    /// expression before parentheses were stripped; its parent decides
    /// whether the rendering needs parentheses.
    ///
    /// `+`/`-` directly under `+`/`-` drops its parentheses, except as the
    /// right operand of `-`: `a - (b + c)` keeps them.
    fn binary(&self, original: &Expr, binary: &BinaryExpr) -> Option<String> {
        let op = binary.op()?;
        let lhs = binary.lhs()?;
        let rhs = binary.rhs()?;
        let symbol = arithmetic(op.as_str());

        let has_assign = matches!(unwrap(lhs.clone()), Expr::Assign(_))
            || matches!(unwrap(rhs.clone()), Expr::Assign(_));
        if has_assign {
            if let Some(symbol) = symbol {
                return Some(format!(
                    "({} {symbol} {})",
                    self.translate_or_raw(&lhs),
                    self.translate_or_raw(&rhs)
                ));
            }
        }

        if op == BinaryOp::Mul {
            if is_math_random(&unwrap(lhs.clone())) {
                return Some(format!("1の実数乱数 * {}", self.translate_or_raw(&rhs)));
            }
            if is_math_random(&unwrap(rhs.clone())) {
                return Some(format!("{} * 1の実数乱数", self.translate_or_raw(&lhs)));
            }
        }

        if op == BinaryOp::Add {
            if let Expr::MethodCall(call) = &lhs {
                if let Some(text) = random_offset(call, &rhs) {
                    return Some(text);
                }
            }
        }

        let symbol = symbol?;
        let left = self.translate_or_raw(&lhs);
        let right = self.translate_or_raw(&rhs);
        let additive = |op: Option<BinaryOp>| matches!(op, Some(BinaryOp::Add | BinaryOp::Sub));
        let redundant = additive(Some(op))
            && !matches!(original, Expr::Cast(_))
            && original
                .syntax()
                .parent()
                .and_then(BinaryExpr::cast)
                .is_some_and(|parent| {
                    let subtrahend = parent.op() == Some(BinaryOp::Sub)
                        && parent.rhs().is_some_and(|r| r.syntax() == original.syntax());
                    additive(parent.op()) && !subtrahend
                });
        if redundant {
            Some(format!("{left} {symbol} {right}"))
        } else {
            Some(format!("({left} {symbol} {right})"))
        }
    }

    fn object_creation(&self, new: &NewExpr) -> String {
        let class = new.ty().map(|t| t.simple_name()).unwrap_or_default();
        let args = new.args();

        match (class.as_str(), args.as_slice()) {
            ("Date", []) => return "現在日時".to_string(),
            ("Date", [millis]) => {
                let millis = value_string(millis).unwrap_or_else(|| raw_text(millis.syntax()));
                return format!("{millis}ミリ秒日時");
            }
            ("FileReader", [path]) => return format!("ファイル{}生成", argument(path)),
            _ => {}
        }

        let args = args.iter().map(argument).collect::<Vec<_>>().join(", ");
        if class.contains("Random") {
            return "乱数生成器".to_string();
        }
        if class.contains("Scanner") {
            return "入力器".to_string();
        }
        if class.contains("Calendar") {
            return "カレンダー生成".to_string();
        }
        let name = match class.as_str() {
            "JFrame" => "フレーム",
            "JLabel" => "ラベル",
            "JButton" => "ボタン",
            "FlowLayout" if args.is_empty() => return "FlowLayout".to_string(),
            "String" => "文字列",
            other => other,
        };
        if args.is_empty() {
            format!("{name}生成")
        } else {
            format!("{name}({args})生成")
        }
    }

    fn field_access(&self, field: &FieldAccess) -> String {
        let name = field.name();
        let Some(receiver) = field.receiver() else {
            return name;
        };
        if name == "length" {
            return format!("{}の配列要素数", self.translate_or_raw(&receiver));
        }
        if let Expr::This(_) = receiver {
            return format!("自身の{name}");
        }
        format!("{}の{name}", self.translate_or_raw(&receiver))
    }
}

/// Whether `expr` is the whole expression of an expression statement.
fn is_statement_expr(expr: &Expr) -> bool {
    expr.syntax()
        .parent()
        .is_some_and(|p| p.kind() == SyntaxKind::EXPR_STMT)
}

/// Comparisons, `&&`, `||`, `!` and method calls.
fn is_boolean_shaped(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(b) => b
            .op()
            .is_some_and(|op| op.is_comparison() || op.is_logical()),
        Expr::Prefix(p) => p.op() == Some(SyntaxKind::BANG),
        Expr::MethodCall(_) => true,
        _ => false,
    }
}

/// The arithmetic operators the notation shares with Java.
fn arithmetic(op: &str) -> Option<&'static str> {
    match op {
        "+" => Some("+"),
        "-" => Some("-"),
        "*" => Some("*"),
        "/" => Some("/"),
        "%" => Some("%"),
        _ => None,
    }
}

/// `this.f` is `自身のf`, `o.f` is `oのf`, anything else raw.
pub(crate) fn assign_target(target: &Expr) -> String {
    if let Expr::FieldAccess(field) = target {
        if let Some(receiver) = field.receiver() {
            return match receiver {
                Expr::This(_) => format!("自身の{}", field.name()),
                other => format!("{}の{}", raw_text(other.syntax()), field.name()),
            };
        }
    }
    raw_text(target.syntax())
}

/// `(x + 1)` / `(x - 1)` for increments and decrements in either position.
fn increment(expr: &Expr) -> Option<String> {
    let (op, operand) = match expr {
        Expr::Prefix(p) => (p.op()?, p.operand()?),
        Expr::Postfix(p) => (p.op()?, p.operand()?),
        _ => return None,
    };
    let name = raw_text(operand.syntax());
    match op {
        SyntaxKind::PLUS_PLUS => Some(format!("({name} + 1)")),
        SyntaxKind::MINUS_MINUS => Some(format!("({name} - 1)")),
        _ => None,
    }
}

/// The operands of a `+` chain, left to right. Parenthesized sums are
/// operands, not part of the chain.
fn additions(expr: &Expr) -> Vec<Expr> {
    let mut operands = Vec::new();
    let mut stack = vec![expr.clone()];
    while let Some(next) = stack.pop() {
        match &next {
            Expr::Binary(b) if b.op() == Some(BinaryOp::Add) => {
                stack.extend(b.rhs());
                stack.extend(b.lhs());
            }
            _ => operands.push(next),
        }
    }
    operands
}

fn contains_string_literal(expr: &Expr) -> bool {
    additions(expr)
        .iter()
        .any(|e| matches!(e, Expr::Literal(lit) if lit.kind() == Some(LiteralKind::String)))
}

/// `Math.random()`, alone or somewhere inside a binary expression.
fn is_math_random(expr: &Expr) -> bool {
    let mut stack = vec![expr.clone()];
    while let Some(next) = stack.pop() {
        match unwrap(next) {
            Expr::MethodCall(call) => {
                let is_random = call.name() == "random"
                    && call
                        .receiver()
                        .is_some_and(|r| raw_text(r.syntax()) == "Math");
                if is_random {
                    return true;
                }
            }
            Expr::Binary(b) => {
                stack.extend(b.lhs());
                stack.extend(b.rhs());
            }
            _ => {}
        }
    }
    false
}

/// `rand.nextInt(n) + k` as `nの乱数+k`.
fn random_offset(call: &MethodCall, rhs: &Expr) -> Option<String> {
    if call.name() != "nextInt" {
        return None;
    }
    let receiver = raw_text(call.receiver()?.syntax());
    if !receiver.contains("Random") {
        return None;
    }
    let [max] = call.args().try_into().ok()?;
    let offset = value_string(rhs)?;
    Some(format!("{}の乱数+{offset}", raw_text(max.syntax())))
}

/// Constructor and explicit-constructor arguments: strings and chars in
/// `「」`, anything else raw.
pub(crate) fn argument(expr: &Expr) -> String {
    if let Expr::Literal(lit) = expr {
        if matches!(lit.kind(), Some(LiteralKind::String | LiteralKind::Char)) {
            return format!("「{}」", lit.quoted_content().unwrap_or_default());
        }
    }
    raw_text(expr.syntax())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::first_expr;
    use insta::assert_snapshot;

    fn tr(source_expr: &str) -> Option<String> {
        let expr = first_expr(source_expr);
        ExprTranslator::new(256).translate(&expr)
    }

    #[test]
    fn nested_assignment() {
        assert_eq!(tr("c = (a = 20)").as_deref(), Some("(a は 20)"));
    }

    #[test]
    fn comparison_is_bracketed() {
        assert_eq!(tr("x = a > b").as_deref(), Some("<a > b>"));
        assert_eq!(tr("x = a && b").as_deref(), Some("<((aが真) かつ (bが真))>"));
    }

    #[test]
    fn compound_assignment() {
        assert_eq!(tr("x += 3").as_deref(), Some("(x + 3)"));
        assert_eq!(tr("this.total -= d").as_deref(), Some("(自身のtotal - d)"));
        assert_eq!(tr("y += (x += 3)").as_deref(), Some("(y + (x は x + 3))"));
        assert_eq!(tr("y *= (x = 4)").as_deref(), Some("(y * (x は 4))"));
    }

    #[test]
    fn increments() {
        assert_eq!(tr("i++").as_deref(), Some("(i + 1)"));
        assert_eq!(tr("--i").as_deref(), Some("(i - 1)"));
    }

    #[test]
    fn concatenation_with_parenthesized_sum() {
        assert_snapshot!(
            tr(r#"x = "a=" + x + "," + (y+1)"#).unwrap(),
            @"「a={x},{(y+1)}」"
        );
    }

    #[test]
    fn long_concatenation_uses_no_budget_per_term() {
        let chain = " + a".repeat(1000);
        let expr = first_expr(&format!("x = \"s\"{chain}"));
        let out = ExprTranslator::new(8).translate(&expr).unwrap();
        assert!(out.starts_with("「s{a}{a}"));
        assert!(out.ends_with("{a}」"));
        assert_eq!(out.matches("{a}").count(), 1000);
    }

    #[test]
    fn deep_call_chain_falls_back_to_call_syntax() {
        let expr = first_expr("x = s.size().size().size().size().size().size()");
        assert_snapshot!(
            ExprTranslator::new(256).translate(&expr).unwrap(),
            @"sの要素数の要素数の要素数の要素数の要素数の要素数"
        );
        assert_snapshot!(
            ExprTranslator::new(4).translate(&expr).unwrap(),
            @"s.size().size().size()の要素数の要素数の要素数"
        );
    }

    #[test]
    fn long_call_chain_stays_within_budget() {
        let chain = ".size()".repeat(1000);
        let expr = first_expr(&format!("x = s{chain}"));
        let out = ExprTranslator::new(64).translate(&expr).unwrap();
        assert!(out.starts_with("s.size().size()"));
        assert!(out.ends_with("の要素数"));
    }

    #[test]
    fn math_random_inside_a_product() {
        assert_eq!(
            tr("x = (Math.random() + 1) * 6").as_deref(),
            Some("1の実数乱数 * 6")
        );
    }

    #[test]
    fn string_concatenation_flattens() {
        assert_eq!(
            tr("x = \"a\" + n + \"b\\n\" + 3 + p.name + s.length()").as_deref(),
            Some("「a{n}b{改行}{3}{pのname}{sの長さ}」")
        );
    }

    #[test]
    fn binary_parenthesization() {
        assert_eq!(tr("x = a + b - c").as_deref(), Some("(a + b - c)"));
        assert_eq!(tr("x = (a + b) - c").as_deref(), Some("(a + b - c)"));
        assert_eq!(tr("x = a + (b - c)").as_deref(), Some("(a + b - c)"));
        assert_eq!(tr("x = a * (b + c)").as_deref(), Some("(a * (b + c))"));
        assert_eq!(tr("x = a & b"), None);
    }

    #[test]
    fn subtracted_sums_keep_their_parentheses() {
        assert_eq!(tr("x = a - (b + c)").as_deref(), Some("(a - (b + c))"));
        assert_eq!(tr("x = a - (b - c)").as_deref(), Some("(a - (b - c))"));
        assert_eq!(tr("x = a - b - c").as_deref(), Some("(a - b - c)"));
        assert_eq!(tr("x = a - (b * c)").as_deref(), Some("(a - (b * c))"));
        assert_eq!(tr("x = a + (int) (b - c)").as_deref(), Some("(a + (b - c))"));
    }

    #[test]
    fn random_forms() {
        assert_eq!(tr("x = Math.random() * 6").as_deref(), Some("1の実数乱数 * 6"));
        assert_eq!(
            tr("x = new Random().nextInt(6) + 1").as_deref(),
            Some("6の乱数+1")
        );
        assert_eq!(tr("x = Math.random()").as_deref(), Some("1の実数乱数"));
    }

    #[test]
    fn object_creation() {
        assert_eq!(tr("x = new Date()").as_deref(), Some("現在日時"));
        assert_eq!(tr("x = new Date(1000L)").as_deref(), Some("1000ミリ秒日時"));
        assert_eq!(
            tr("x = new FileReader(\"a.txt\")").as_deref(),
            Some("ファイル「a.txt」生成")
        );
        assert_eq!(tr("x = new java.util.Random(42)").as_deref(), Some("乱数生成器"));
        assert_eq!(tr("x = new JFrame(\"t\")").as_deref(), Some("フレーム(「t」)生成"));
        assert_eq!(tr("x = new FlowLayout()").as_deref(), Some("FlowLayout"));
        assert_eq!(tr("x = new ArrayList<String>()").as_deref(), Some("ArrayList生成"));
        assert_eq!(tr("x = new Hero(\"a\", 3)").as_deref(), Some("Hero(「a」, 3)生成"));
    }

    #[test]
    fn field_access() {
        assert_eq!(tr("x = arr.length").as_deref(), Some("arrの配列要素数"));
        assert_eq!(tr("x = this.name").as_deref(), Some("自身のname"));
        assert_eq!(tr("x = h.hp").as_deref(), Some("hのhp"));
    }

    #[test]
    fn literals() {
        assert_eq!(tr("x = \"a\\tb\"").as_deref(), Some("「a{タブ}b」"));
        assert_eq!(tr("x = 'c'").as_deref(), Some("「c」"));
        assert_eq!(tr("x = 10L").as_deref(), Some("10"));
        assert_eq!(tr("x = 2.0f").as_deref(), Some("2.0"));
        assert_eq!(tr("x = true").as_deref(), Some("真"));
        assert_eq!(tr("x = -5").as_deref(), Some("-5"));
        assert_eq!(tr("x = -y"), None);
        assert_eq!(tr("x = null").as_deref(), Some("null"));
        assert_eq!(tr("x = arr[i]").as_deref(), Some("arr[i]"));
        assert_eq!(tr("x = (int) y").as_deref(), Some("y"));
    }

    #[test]
    fn instanceof() {
        assert_eq!(tr("x = o instanceof String").as_deref(), Some("oがString型"));
        assert_eq!(
            tr("x = o instanceof String s").as_deref(),
            Some("(oがString型でsに代入できる)")
        );
    }

    #[test]
    fn budget_exhaustion_gives_up() {
        let expr = first_expr("x = a + b");
        assert_eq!(ExprTranslator::new(0).translate(&expr), None);
        let translator = ExprTranslator::new(1);
        assert_eq!(translator.translate(&expr).as_deref(), Some("(a + b)"));
        // The budget is released after each call.
        assert_eq!(translator.translate(&expr).as_deref(), Some("(a + b)"));
    }
}
