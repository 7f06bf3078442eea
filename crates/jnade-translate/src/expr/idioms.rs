//! The call idiom table: library calls that read as set phrases.
//!
//! Rows are tried in order and the first one that renders wins, so more
//! specific receivers (`Instant.now`) must precede generic names (`get`).
//! A call no row recognizes is rendered generically as
//! `receiverのname(args)`.

use jnade_parser::ast::expr::{Expr, LiteralKind, MethodCall};
use jnade_parser::ast::raw_text;

use super::literal::value_string;
use super::{argument, ExprTranslator};

/// A method call taken apart once for all rows.
pub(crate) struct CallView {
    pub name: String,
    pub receiver: Option<Expr>,
    pub args: Vec<Expr>,
}

impl CallView {
    pub fn new(call: &MethodCall) -> Self {
        Self {
            name: call.name(),
            receiver: call.receiver(),
            args: call.args(),
        }
    }

    /// The receiver as written, or `""`.
    pub fn receiver_text(&self) -> String {
        self.receiver
            .as_ref()
            .map(|r| raw_text(r.syntax()))
            .unwrap_or_default()
    }

    fn receiver_is(&self, name: &str) -> bool {
        self.receiver.is_some() && self.receiver_text() == name
    }

    fn is(&self, name: &str, arity: usize) -> bool {
        self.name == name && self.args.len() == arity
    }

    /// Zero-arg `name()` called on some receiver.
    fn is_accessor(&self, name: &str) -> bool {
        self.is(name, 0) && self.receiver.is_some()
    }
}

type Render = fn(&ExprTranslator, &CallView) -> Option<String>;

/// One row of the table. `label` only shows up in logs.
pub(crate) struct CallIdiom {
    pub label: &'static str,
    pub render: Render,
}

macro_rules! idiom {
    ($label:literal, $render:expr) => {
        CallIdiom {
            label: $label,
            render: $render,
        }
    };
}

pub(crate) static CALL_IDIOMS: &[CallIdiom] = &[
    idiom!("Math.random", |_, c| {
        (c.name == "random" && c.receiver_is("Math")).then(|| "1の実数乱数".to_string())
    }),
    idiom!("System.currentTimeMillis", |_, c| {
        (c.is("currentTimeMillis", 0) && c.receiver_is("System")).then(|| "システム時間".to_string())
    }),
    idiom!("now", |_, c| {
        let clock = ["ZonedDateTime", "LocalDateTime", "LocalDate"]
            .iter()
            .any(|t| c.receiver_is(t));
        (c.is("now", 0) && clock).then(|| "現在日時".to_string())
    }),
    idiom!("DriverManager.getConnection", |t, c| {
        if !(c.is("getConnection", 1) && c.receiver_is("DriverManager")) {
            return None;
        }
        Some(format!("DriverManager から {} で接続取得", t.idiom_operand(&c.args[0])))
    }),
    idiom!("openStream", |t, c| {
        c.is_accessor("openStream").then(|| format!("{} からの通り道", t.scope(c)))
    }),
    idiom!("getWriter", |t, c| {
        c.is_accessor("getWriter").then(|| format!("{} の 書き込み設定", t.scope(c)))
    }),
    idiom!("setContentType", |t, c| {
        if !(c.is("setContentType", 1) && c.receiver.is_some()) {
            return None;
        }
        Some(format!("{} の 形式を {}に設定", t.scope(c), argument(&c.args[0])))
    }),
    idiom!("ZonedDateTime.of", |t, c| {
        if !(c.is("of", 8) && c.receiver_is("ZonedDateTime")) {
            return None;
        }
        let zone = zone_name(&zone_id(&c.args[7]));
        let parts = t.operands(&c.args[..7]);
        Some(format!(
            "{zone}時間{}年{}月{}日{}時{}分{}秒{}ナノ秒",
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6]
        ))
    }),
    idiom!("LocalDateTime.of", |t, c| {
        if !(c.name == "of" && c.receiver_is("LocalDateTime") && c.args.len() >= 5) {
            return None;
        }
        let parts = t.operands(&c.args);
        let date = format!("{}年{}月{}日", parts[0], parts[1], parts[2]);
        let time = if parts.len() == 5 {
            format!("{}時{}分", parts[3], parts[4])
        } else {
            format!("{}時{}分{}秒", parts[3], parts[4], parts[5])
        };
        Some(date + &time)
    }),
    idiom!("LocalDate.of", |t, c| {
        if !(c.is("of", 3) && c.receiver_is("LocalDate")) {
            return None;
        }
        let parts = t.operands(&c.args);
        Some(format!("{}年{}月{}日", parts[0], parts[1], parts[2]))
    }),
    idiom!("toInstant", |t, c| {
        c.is_accessor("toInstant").then(|| format!("{}の時間", t.scope(c)))
    }),
    idiom!("toLocalDateTime", |t, c| {
        c.is_accessor("toLocalDateTime").then(|| format!("{}の日時", t.scope(c)))
    }),
    idiom!("atZone", |t, c| {
        if !(c.is("atZone", 1) && c.receiver.is_some()) {
            return None;
        }
        let zone = zone_name(&zone_id(&c.args[0]));
        Some(format!("{}を「{zone}」に地域変換", t.scope(c)))
    }),
    idiom!("date-time getter", |t, c| {
        if !(c.args.is_empty() && c.receiver.is_some()) {
            return None;
        }
        let property = date_time_property(&c.name)?;
        Some(format!("{}の{property}", t.scope(c)))
    }),
    idiom!("Instant.now", |_, c| {
        (c.is("now", 0) && c.receiver_is("Instant")).then(|| "現在日時".to_string())
    }),
    idiom!("Instant.ofEpochMilli", |_, c| {
        if !(c.is("ofEpochMilli", 1) && c.receiver_is("Instant")) {
            return None;
        }
        let millis = value_string(&c.args[0]).unwrap_or_else(|| raw_text(c.args[0].syntax()));
        Some(format!("{millis}のシステム時間"))
    }),
    idiom!("toEpochMilli", |t, c| {
        c.is_accessor("toEpochMilli").then(|| format!("{}の日時", t.scope(c)))
    }),
    idiom!("getTime", |t, c| {
        if !c.is("getTime", 0) {
            return None;
        }
        Some(match c.receiver {
            Some(_) => format!("{}のシステム時間", t.scope(c)),
            None => "システム時間".to_string(),
        })
    }),
    idiom!("Calendar.getInstance", |_, c| {
        (c.is("getInstance", 0) && c.receiver_is("Calendar")).then(|| "カレンダー生成".to_string())
    }),
    idiom!("get", |t, c| {
        if !(c.is("get", 1) && c.receiver.is_some()) || calendar_field_of(&c.args[0]).is_some() {
            return None;
        }
        let key = t.idiom_operand(&c.args[0]);
        Some(match &c.args[0] {
            Expr::Literal(lit) if lit.kind() == Some(LiteralKind::Int) => {
                format!("{}の{key}番目", t.scope(c))
            }
            _ => format!("{}の{key}のペア", t.scope(c)),
        })
    }),
    idiom!("calendar get", |t, c| {
        if !(c.is("get", 1) && c.receiver.is_some()) {
            return None;
        }
        let field = calendar_field_of(&c.args[0])?;
        Some(format!("{}の{field}", t.scope(c)))
    }),
    idiom!("Period.of", |t, c| {
        let unit = match c.name.as_str() {
            "ofDays" => "日",
            "ofMonths" => "ヶ月",
            "ofYears" => "年",
            _ => return None,
        };
        if !(c.args.len() == 1 && c.receiver_is("Period")) {
            return None;
        }
        Some(format!("{}{unit}の期間", t.idiom_operand(&c.args[0])))
    }),
    idiom!("Period.between", |t, c| {
        if !(c.is("between", 2) && c.receiver_is("Period")) {
            return None;
        }
        let (from, to) = (t.idiom_operand(&c.args[0]), t.idiom_operand(&c.args[1]));
        Some(format!("{from}から{to}までの期間"))
    }),
    idiom!("DateTimeFormatter.ofPattern", |t, c| {
        if !(c.is("ofPattern", 1) && c.receiver_is("DateTimeFormatter")) {
            return None;
        }
        Some(format!("日時フォーマット({})作成", t.idiom_operand(&c.args[0])))
    }),
    idiom!("LocalDate.parse", |t, c| {
        if !(c.is("parse", 2) && c.receiver_is("LocalDate")) {
            return None;
        }
        let (text, format) = (t.idiom_operand(&c.args[0]), t.idiom_operand(&c.args[1]));
        Some(format!("{text}を{format}の形式逆変換"))
    }),
    idiom!("plus/minus", |t, c| {
        if !(c.args.len() == 1 && c.receiver.is_some()) {
            return None;
        }
        let (operation, unit) = if let Some(unit) = c.name.strip_prefix("plus") {
            ("加算", unit)
        } else if let Some(unit) = c.name.strip_prefix("minus") {
            ("減算", unit)
        } else {
            return None;
        };
        let unit = match unit {
            "" => "",
            "Days" => "日",
            "Weeks" => "週間",
            "Months" => "ヶ月",
            "Years" => "年",
            "Hours" => "時間",
            "Minutes" => "分",
            "Seconds" => "秒",
            _ => return None,
        };
        Some(format!("{}に{}{unit}{operation}", t.scope(c), t.idiom_operand(&c.args[0])))
    }),
    idiom!("format", |t, c| {
        if !(c.is("format", 1) && c.receiver.is_some()) {
            return None;
        }
        Some(format!("{}を{}の形式変換", t.scope(c), t.idiom_operand(&c.args[0])))
    }),
    idiom!("iterator", |t, c| {
        c.is_accessor("iterator").then(|| format!("{}のイテレータ", t.scope(c)))
    }),
    idiom!("next", |t, c| {
        c.is_accessor("next").then(|| format!("{}の次の要素", t.scope(c)))
    }),
    idiom!("size", |t, c| {
        c.is_accessor("size").then(|| format!("{}の要素数", t.scope(c)))
    }),
    idiom!("keySet", |t, c| {
        c.is_accessor("keySet").then(|| format!("{}のキー一覧", t.scope(c)))
    }),
    idiom!("setter", |t, c| {
        let property = c.name.strip_prefix("set")?;
        if !property.starts_with(|ch: char| ch.is_uppercase())
            || c.args.len() != 1
            || c.receiver.is_none()
        {
            return None;
        }
        Some(format!(
            "{}の{property}に{}を設定",
            t.scope(c),
            t.idiom_operand(&c.args[0])
        ))
    }),
    idiom!("parse", |t, c| {
        if !(c.is("parse", 1) && c.receiver.is_some()) {
            return None;
        }
        Some(format!("{}を{}の形式逆変換", t.idiom_operand(&c.args[0]), t.scope(c)))
    }),
    idiom!("Math.max/min", |t, c| {
        let which = match c.name.as_str() {
            "max" => "最大値",
            "min" => "最小値",
            _ => return None,
        };
        if !(c.args.len() == 2 && c.receiver_is("Math")) {
            return None;
        }
        let (a, b) = (t.idiom_operand(&c.args[0]), t.idiom_operand(&c.args[1]));
        Some(format!("{a}と{b}の{which}"))
    }),
    idiom!("Integer.parseInt", |t, c| {
        if !(c.is("parseInt", 1) && c.receiver_is("Integer")) {
            return None;
        }
        Some(format!("{}を整数変換", t.idiom_operand(&c.args[0])))
    }),
    idiom!("new Random().nextInt", |t, c| {
        if !(c.is("nextInt", 1) && created_type_contains(c.receiver.as_ref(), "Random")) {
            return None;
        }
        Some(format!("{}の乱数", t.idiom_operand(&c.args[0])))
    }),
    idiom!("new Scanner(System.in)", |_, c| {
        if !c.args.is_empty() || !reads_standard_input(c.receiver.as_ref()) {
            return None;
        }
        let phrase = match c.name.as_str() {
            "nextLine" => "文字列読み込み",
            "nextInt" => "整数読み込み",
            "nextDouble" => "少数読み込み",
            _ => return None,
        };
        Some(phrase.to_string())
    }),
    idiom!("length", |t, c| {
        if !c.is("length", 0) {
            return None;
        }
        Some(match c.receiver {
            Some(_) => format!("{}の長さ", t.scope(c)),
            None => "長さ".to_string(),
        })
    }),
    idiom!("toString", |t, c| {
        if !c.is("toString", 0) {
            return None;
        }
        Some(match c.receiver {
            Some(_) => format!("{}の文字列変換", t.scope(c)),
            None => "文字列変換".to_string(),
        })
    }),
    idiom!("printStackTrace", |_, c| {
        c.is("printStackTrace", 0).then(|| "エラー詳細出力".to_string())
    }),
    idiom!("read", |t, c| {
        c.is_accessor("read").then(|| format!("{}から1文字読込", t.scope(c)))
    }),
    idiom!("matches", |t, c| {
        if !c.is("matches", 1) {
            return None;
        }
        let pattern = string_content(&c.args[0]).unwrap_or_else(|| raw_text(c.args[0].syntax()));
        Some(format!("{}を{pattern}で正規表現マッチ", t.scope(c)))
    }),
    idiom!("equals", |t, c| {
        if !c.is("equals", 1) {
            return None;
        }
        Some(format!("{}が{}と等しい", t.scope(c), t.idiom_operand(&c.args[0])))
    }),
    idiom!("append", |t, c| {
        if !c.is("append", 1) {
            return None;
        }
        let scope = t.scope(c);
        let joint = if scope.is_empty() { "" } else { "に" };
        Some(format!("{scope}{joint}{}追加", argument(&c.args[0])))
    }),
    idiom!("replaceAll", |t, c| {
        if !c.is("replaceAll", 2) {
            return None;
        }
        let (regex, with) = (t.idiom_operand(&c.args[0]), t.idiom_operand(&c.args[1]));
        Some(format!("{}の{regex}を{with}へ正規表現置換", t.scope(c)))
    }),
    idiom!("split", |t, c| {
        if !c.is("split", 1) {
            return None;
        }
        let delimiter = string_content(&c.args[0]).unwrap_or_else(|| t.idiom_operand(&c.args[0]));
        Some(format!("{}を{delimiter}で正規表現区切る", t.scope(c)))
    }),
    idiom!("String.format", |t, c| {
        if !(c.name == "format" && c.receiver_is("String")) {
            return None;
        }
        let (template, rest) = c.args.split_first()?;
        let rest = rest
            .iter()
            .map(|a| raw_text(a.syntax()))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("{}を「{rest}」で形式指定", t.idiom_operand(template)))
    }),
    idiom!("substring", |t, c| {
        if c.name != "substring" {
            return None;
        }
        match c.args.as_slice() {
            [start] => Some(format!(
                "{}の{}文字目以降の文字列",
                t.scope(c),
                t.one_based(start)
            )),
            [start, end] => Some(format!(
                "{}の{}~{}文字目の文字列",
                t.scope(c),
                t.one_based(start),
                t.idiom_operand(end)
            )),
            _ => None,
        }
    }),
    idiom!("indexOf", |t, c| {
        let position = match c.name.as_str() {
            "indexOf" => "最初",
            "lastIndexOf" => "最後",
            _ => return None,
        };
        if c.args.len() != 1 {
            return None;
        }
        let needle = string_content(&c.args[0]).unwrap_or_else(|| t.idiom_operand(&c.args[0]));
        Some(format!("{}で{needle}が{position}に出る位置", t.scope(c)))
    }),
    idiom!("charAt", |t, c| {
        if !c.is("charAt", 1) {
            return None;
        }
        Some(format!("{}の{}文字目", t.scope(c), t.one_based(&c.args[0])))
    }),
];

impl ExprTranslator {
    /// Render a method call through the idiom table.
    pub fn call_idiom(&self, call: &MethodCall) -> String {
        let view = CallView::new(call);
        self.call_view_idiom(&view)
    }

    pub(crate) fn call_view_idiom(&self, view: &CallView) -> String {
        let Some(_guard) = self.enter() else {
            return call_syntax_fallback(view);
        };
        for idiom in CALL_IDIOMS {
            if let Some(text) = (idiom.render)(self, view) {
                tracing::trace!(idiom = idiom.label, method = %view.name, "call idiom");
                return text;
            }
        }
        tracing::debug!(method = %view.name, "no call idiom, rendering generically");
        self.generic_call(view)
    }

    /// `receiverのname(args)`, `自身の` for `this` and `親の` for `super`.
    fn generic_call(&self, view: &CallView) -> String {
        let prefix = match &view.receiver {
            None => String::new(),
            Some(Expr::This(_)) => "自身の".to_string(),
            Some(Expr::Super(_)) => "親の".to_string(),
            Some(receiver) => format!("{}の", self.idiom_operand(receiver)),
        };
        if view.args.is_empty() {
            return format!("{prefix}{}", view.name);
        }
        format!("{prefix}{}({})", view.name, self.operands(&view.args).join(", "))
    }

    /// Operand text inside call idioms.
    pub fn idiom_operand(&self, expr: &Expr) -> String {
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
            Expr::MethodCall(call) => self.call_idiom(call),
            other => raw_text(other.syntax()),
        }
    }

    fn operands(&self, args: &[Expr]) -> Vec<String> {
        args.iter().map(|a| self.idiom_operand(a)).collect()
    }

    /// The receiver as an operand, or `""` without one.
    fn scope(&self, view: &CallView) -> String {
        view.receiver
            .as_ref()
            .map(|r| self.idiom_operand(r))
            .unwrap_or_default()
    }

    /// A zero-based index as a one-based position: literals are computed,
    /// anything else gets `+1` appended.
    fn one_based(&self, index: &Expr) -> String {
        if let Expr::Literal(lit) = index {
            if lit.kind() == Some(LiteralKind::Int) {
                if let Ok(n) = lit.text().parse::<i64>() {
                    return (n + 1).to_string();
                }
            }
        }
        format!("{}+1", self.idiom_operand(index))
    }
}

/// Text of the call as written, used when the recursion budget is spent.
fn call_syntax_fallback(view: &CallView) -> String {
    let args = view
        .args
        .iter()
        .map(|a| raw_text(a.syntax()))
        .collect::<Vec<_>>()
        .join(", ");
    match &view.receiver {
        Some(receiver) => format!("{}.{}({args})", raw_text(receiver.syntax()), view.name),
        None => format!("{}({args})", view.name),
    }
}

/// `「content」` for a plain string literal.
fn string_content(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Literal(lit) if lit.kind() == Some(LiteralKind::String) => {
            Some(format!("「{}」", lit.quoted_content()?))
        }
        _ => None,
    }
}

/// Whether `receiver` is `new T(...)` with `needle` in `T`'s name.
fn created_type_contains(receiver: Option<&Expr>, needle: &str) -> bool {
    match receiver {
        Some(Expr::New(new)) => new
            .ty()
            .is_some_and(|t| t.simple_name().contains(needle)),
        _ => false,
    }
}

/// `new Scanner(System.in)`.
fn reads_standard_input(receiver: Option<&Expr>) -> bool {
    let Some(Expr::New(new)) = receiver else {
        return false;
    };
    let scanner = new.ty().is_some_and(|t| t.simple_name().contains("Scanner"));
    let args = new.args();
    scanner && args.len() == 1 && raw_text(args[0].syntax()) == "System.in"
}

/// The id string of `ZoneId.of("...")`, or the expression as written.
fn zone_id(expr: &Expr) -> String {
    if let Expr::MethodCall(call) = expr {
        let view = CallView::new(call);
        if view.is("of", 1) && view.receiver_is("ZoneId") {
            if let Expr::Literal(lit) = &view.args[0] {
                if lit.kind() == Some(LiteralKind::String) {
                    if let Some(content) = lit.quoted_content() {
                        return content;
                    }
                }
            }
        }
    }
    raw_text(expr.syntax())
}

fn zone_name(id: &str) -> String {
    match id {
        "Asia/Tokyo" => "東京",
        "Europe/London" => "ロンドン",
        other => other,
    }
    .to_string()
}

fn date_time_property(getter: &str) -> Option<&'static str> {
    Some(match getter {
        "getYear" => "年",
        "getMonth" | "getMonthValue" => "月",
        "getDayOfMonth" => "日",
        "getHour" => "時",
        "getMinute" => "分",
        "getSecond" => "秒",
        "getNano" => "ナノ秒",
        _ => return None,
    })
}

/// Japanese name of a `java.util.Calendar` field constant.
pub(crate) fn calendar_field(name: &str) -> Option<&'static str> {
    Some(match name {
        "YEAR" => "年",
        "MONTH" => "月",
        "DAY_OF_MONTH" | "DATE" => "日",
        "HOUR" => "時",
        "HOUR_OF_DAY" => "24時間",
        "MINUTE" => "分",
        "SECOND" => "秒",
        "MILLISECOND" => "ミリ秒",
        "DAY_OF_WEEK" => "曜日",
        "DAY_OF_YEAR" => "年間通算日",
        "WEEK_OF_YEAR" => "年間通算週",
        _ => return None,
    })
}

/// The calendar field named by `Calendar.FIELD`-style access.
fn calendar_field_of(expr: &Expr) -> Option<&'static str> {
    match expr {
        Expr::FieldAccess(field) => calendar_field(&field.name()),
        _ => None,
    }
}
