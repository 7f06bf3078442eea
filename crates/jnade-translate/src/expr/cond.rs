//! Boolean contexts: `if`, loop and ternary conditions, and the
//! boolean-shaped expressions [`ExprTranslator::translate`] delegates here.

use jnade_parser::ast::expr::{BinaryExpr, BinaryOp, Expr, LiteralKind, MethodCall};
use jnade_parser::ast::{raw_text, AstNode};
use jnade_parser::SyntaxKind;

use super::ExprTranslator;

impl ExprTranslator {
    /// Render `expr` as a condition.
    ///
    /// `wrap_paren` parenthesizes the whole result where a rule allows it;
    /// `wrap_inner` parenthesizes each operand of `&&` and `||`. Callers
    /// outside this module pass `(true, true)`.
    pub fn condition(&self, expr: &Expr, wrap_paren: bool, wrap_inner: bool) -> String {
        let Some(_guard) = self.enter() else {
            return format!("{}が真", raw_text(expr.syntax()));
        };

        match expr {
            Expr::Paren(paren) => {
                let Some(inner) = paren.inner() else {
                    return format!("{}が真", raw_text(expr.syntax()));
                };
                let inner = self.condition(&inner, wrap_paren, wrap_inner);
                if wrap_paren && !inner.starts_with('(') {
                    format!("({inner})")
                } else {
                    inner
                }
            }
            Expr::Binary(binary) => {
                if let Some(call) = call_compared_to_true(binary) {
                    return format!("{}が真", self.condition(&Expr::MethodCall(call), false, false));
                }
                self.binary_condition(binary, wrap_paren, wrap_inner)
            }
            Expr::MethodCall(call) => self.call_condition(call),
            Expr::Prefix(prefix) if prefix.op() == Some(SyntaxKind::BANG) => {
                let inner = prefix
                    .operand()
                    .map(|operand| self.condition(&operand, false, true))
                    .unwrap_or_default();
                negate(&inner)
            }
            Expr::Literal(lit) if lit.kind() == Some(LiteralKind::True) => "真".to_string(),
            Expr::Literal(lit) if lit.kind() == Some(LiteralKind::False) => "偽".to_string(),
            Expr::NameRef(name) => format!("{}が真", name.text()),
            Expr::Instanceof(test) => {
                let object = test
                    .expr()
                    .map(|o| self.cond_operand(&o))
                    .unwrap_or_default();
                let ty = test.ty().map(|t| t.text()).unwrap_or_default();
                match test.binding() {
                    Some(var) => format!("{object}が{ty}型で{}に代入できる", var.text()),
                    None => format!("{object}が{ty}型"),
                }
            }
            other => format!("{}が真", raw_text(other.syntax())),
        }
    }

    fn binary_condition(&self, binary: &BinaryExpr, wrap_paren: bool, wrap_inner: bool) -> String {
        let (Some(op), Some(lhs), Some(rhs)) = (binary.op(), binary.lhs(), binary.rhs()) else {
            return format!("{}が真", raw_text(binary.syntax()));
        };
        let relation = match op {
            BinaryOp::Eq => Some("="),
            BinaryOp::NotEq => Some("≠"),
            BinaryOp::Lt => Some("<"),
            BinaryOp::LtEq => Some("≤"),
            BinaryOp::Gt => Some(">"),
            BinaryOp::GtEq => Some("≥"),
            _ => None,
        };
        if let Some(relation) = relation {
            return format!(
                "{} {relation} {}",
                self.translate_or_raw(&lhs),
                self.translate_or_raw(&rhs)
            );
        }

        let connective = match op {
            BinaryOp::And => "かつ",
            BinaryOp::Or => "または",
            _ => {
                return format!("{}が{}", self.cond_operand(&lhs), self.cond_operand(&rhs));
            }
        };
        let left = self.condition(&lhs, wrap_inner, wrap_inner);
        let right = self.condition(&rhs, wrap_inner, wrap_inner);
        match (wrap_paren, wrap_inner) {
            (true, true) => format!("(({left}) {connective} ({right}))"),
            (true, false) => format!("({left} {connective} {right})"),
            (false, true) => format!("({left}) {connective} ({right})"),
            (false, false) => format!("{left} {connective} {right}"),
        }
    }

    /// Predicate-style method calls read as sentences; any other call is
    /// tested for truth.
    fn call_condition(&self, call: &MethodCall) -> String {
        let name = call.name();
        let args = call.args();
        let receiver = call.receiver();
        let scope = || {
            receiver
                .as_ref()
                .map(|r| self.cond_operand(r))
                .unwrap_or_default()
        };

        match (name.as_str(), args.as_slice()) {
            ("isEqual", [other]) if receiver.is_some() => {
                format!("{}が{}と等しい", scope(), self.cond_operand(other))
            }
            ("equals" | "equalsIgnoreCase", [other]) => {
                format!("{}と{}が等しい", scope(), self.cond_operand(other))
            }
            ("isAfter", [other]) => format!("{}が{}より未来", scope(), self.cond_operand(other)),
            ("isBefore", [other]) => format!("{}が{}より過去", scope(), self.cond_operand(other)),
            ("hasNext", []) if receiver.is_some() => format!("{}の次の要素がある", scope()),
            ("containsKey", [key]) => format!("{}のキーに{}を含む", scope(), self.cond_operand(key)),
            ("containsValue", [value]) => {
                format!("{}の値に{}を含む", scope(), self.cond_operand(value))
            }
            ("contains", [item]) => format!("{}が{}を含む", scope(), self.cond_operand(item)),
            ("endsWith", [suffix]) => format!("{}が{}で終わる", scope(), self.cond_operand(suffix)),
            ("isEmpty", []) => format!("{}が空", scope()),
            _ => format!("{}が真", self.cond_operand(&Expr::MethodCall(call.clone()))),
        }
    }

    /// Operand text inside conditions. Unlike [`translate`](Self::translate)
    /// this never strips parentheses and keeps unknown calls in call syntax.
    pub fn cond_operand(&self, expr: &Expr) -> String {
        let Some(_guard) = self.enter() else {
            return raw_text(expr.syntax());
        };
        match expr {
            Expr::Literal(lit) => match lit.kind() {
                Some(LiteralKind::True) => "真".to_string(),
                Some(LiteralKind::False) => "偽".to_string(),
                Some(LiteralKind::String) => {
                    format!("「{}」", lit.quoted_content().unwrap_or_default())
                }
                _ => lit.text(),
            },
            Expr::NameRef(name) => name.text(),
            Expr::This(_) => "自身".to_string(),
            Expr::FieldAccess(field) => {
                let scope = field
                    .receiver()
                    .map(|r| self.cond_operand(&r))
                    .unwrap_or_default();
                if scope == "自身" {
                    format!("自身{}", field.name())
                } else {
                    format!("{scope}の{}", field.name())
                }
            }
            Expr::MethodCall(call) => self.call_operand(call),
            other => raw_text(other.syntax()),
        }
    }

    fn call_operand(&self, call: &MethodCall) -> String {
        let name = call.name();
        let args = call.args();
        let scope = || {
            call.receiver()
                .map(|r| self.cond_operand(&r))
                .unwrap_or_default()
        };
        match (name.as_str(), args.as_slice()) {
            ("equals" | "equalsIgnoreCase", [other]) => {
                format!("{}と{}が等しい", scope(), self.cond_operand(other))
            }
            ("contains", [item]) => format!("{}に{}が含まれている", scope(), self.cond_operand(item)),
            ("endsWith", [suffix]) => format!("{}が{}で終わる", scope(), self.cond_operand(suffix)),
            ("isEmpty", []) => format!("{}の長さが0", scope()),
            _ => {
                let prefix = call
                    .receiver()
                    .map(|r| format!("{}の", raw_text(r.syntax())))
                    .unwrap_or_default();
                let args = args
                    .iter()
                    .map(|a| self.cond_operand(a))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{prefix}{name}({args})")
            }
        }
    }
}

/// `call() == true` or `true == call()`.
fn call_compared_to_true(binary: &BinaryExpr) -> Option<MethodCall> {
    if binary.op() != Some(BinaryOp::Eq) {
        return None;
    }
    let is_true = |e: &Expr| matches!(e, Expr::Literal(l) if l.kind() == Some(LiteralKind::True));
    match (binary.lhs()?, binary.rhs()?) {
        (Expr::MethodCall(call), rhs) if is_true(&rhs) => Some(call),
        (lhs, Expr::MethodCall(call)) if is_true(&lhs) => Some(call),
        _ => None,
    }
}

fn negate(inner: &str) -> String {
    if inner.ends_with("の長さが0") {
        return format!("{inner}でない");
    }
    if let Some(base) = inner.strip_suffix("が真") {
        return format!("{base}でない");
    }
    if let Some(base) = inner.strip_suffix("が偽") {
        return format!("{base}が真");
    }
    if inner.contains(" かつ ") || inner.contains(" または ") {
        if wrapped_whole(inner) {
            return format!("{inner}でない");
        }
        return format!("({inner})でない");
    }
    format!("{inner}でない")
}

/// Whether the opening parenthesis of `text` closes at its last character.
/// `(a) かつ (b)` starts and ends with one but is not wrapped.
fn wrapped_whole(text: &str) -> bool {
    if !text.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + c.len_utf8() == text.len();
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::first_expr;

    fn cond(source_expr: &str) -> String {
        let expr = first_expr(source_expr);
        ExprTranslator::new(256).condition(&expr, true, true)
    }

    #[test]
    fn comparisons() {
        assert_eq!(cond("x = a == b"), "a = b");
        assert_eq!(cond("x = a != null"), "a ≠ null");
        assert_eq!(cond("x = i <= n - 1"), "i ≤ (n - 1)");
        assert_eq!(cond("x = s.length() >= 3"), "sの長さ ≥ 3");
    }

    #[test]
    fn connectives() {
        assert_eq!(cond("x = a > 0 && b < 1"), "((a > 0) かつ (b < 1))");
        assert_eq!(cond("x = a || flag"), "((aが真) または (flagが真))");
        assert_eq!(
            cond("x = (a > 0) && (b > 0 || c > 0)"),
            "(((a > 0)) かつ (((b > 0) または (c > 0))))"
        );
    }

    #[test]
    fn negation() {
        assert_eq!(cond("x = !flag"), "flagでない");
        assert_eq!(cond("x = !s.isEmpty()"), "sが空でない");
        assert_eq!(cond("x = !(a > 0 && b > 0)"), "((a > 0) かつ (b > 0))でない");
        assert_eq!(cond("x = !(a || b > 0)"), "((aが真) または (b > 0))でない");
        assert_eq!(cond("x = !false"), "偽でない");
        assert_eq!(cond("x = !(a > 0)"), "a > 0でない");
    }

    #[test]
    fn negated_connective_is_wrapped_once() {
        assert!(wrapped_whole("((a > 0) かつ (b > 0))"));
        assert!(!wrapped_whole("(a > 0) かつ (b > 0)"));
        assert!(wrapped_whole("(a)"));
        assert!(!wrapped_whole("a"));
        assert_eq!(negate("((a > 0) かつ (b > 0))"), "((a > 0) かつ (b > 0))でない");
        assert_eq!(negate("(a > 0) または (b > 0)"), "((a > 0) または (b > 0))でない");
    }

    #[test]
    fn predicate_calls() {
        assert_eq!(cond("x = s.equals(\"y\")"), "sと「y」が等しい");
        assert_eq!(cond("x = a.isAfter(b)"), "aがbより未来");
        assert_eq!(cond("x = it.hasNext()"), "itの次の要素がある");
        assert_eq!(cond("x = m.containsKey(k)"), "mのキーにkを含む");
        assert_eq!(cond("x = list.contains(3)"), "listが3を含む");
        assert_eq!(cond("x = name.endsWith(\".txt\")"), "nameが「.txt」で終わる");
        assert_eq!(cond("x = this.name.isEmpty()"), "自身nameが空");
        assert_eq!(cond("x = h.isAlive()"), "hのisAlive()が真");
        assert_eq!(cond("x = check(a, \"b\")"), "check(a, 「b」)が真");
        assert_eq!(cond("x = h1.equals(h2) == true"), "h1とh2が等しいが真");
    }

    #[test]
    fn other_forms() {
        assert_eq!(cond("x = true"), "真");
        assert_eq!(cond("x = o instanceof Hero h"), "oがHero型でhに代入できる");
        assert_eq!(cond("x = a & b"), "aがb");
        assert_eq!(cond("x = this.ready"), "this.readyが真");
    }

    #[test]
    fn exhausted_budget_falls_back_to_truth_test() {
        let expr = first_expr("x = a > b");
        assert_eq!(ExprTranslator::new(0).condition(&expr, true, true), "a > bが真");
    }
}
