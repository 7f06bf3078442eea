//! Literal rendering: escape sequences, text blocks, numeric values, and
//! the type-name lexicon shared by declarations and array creation.

use jnade_parser::ast::expr::{Expr, Literal, LiteralKind};
use jnade_parser::ast::raw_text;
use jnade_parser::SyntaxKind;

/// Rewrite Java escape sequences the way the target notation spells them.
///
/// `\n` and `\t` become `{改行}` and `{タブ}`; escaped quotes and
/// backslashes lose their backslash. Other escapes are kept as written.
pub fn convert_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => {
                chars.next();
                out.push_str("{改行}");
            }
            Some('t') => {
                chars.next();
                out.push_str("{タブ}");
            }
            Some(q @ ('"' | '\'' | '\\')) => {
                chars.next();
                out.push(q);
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// The value of a text block: common indentation removed, trailing blank
/// lines dropped, each line right-trimmed, lines joined with `{改行}`.
///
/// `content` is the text between the `"""` delimiters.
pub fn text_block_value(content: &str) -> String {
    // The opening delimiter is followed by a line terminator that is not
    // part of the value.
    let body = match content.find('\n') {
        Some(pos) if content[..pos].trim().is_empty() => &content[pos + 1..],
        _ => content,
    };
    if body.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = body.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| is_layout_space(*c)).count())
        .min()
        .unwrap_or(0);
    let Some(last) = lines.iter().rposition(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    lines[..=last]
        .iter()
        .map(|line| {
            let line: String = if indent > 0 && line.chars().count() >= indent {
                line.chars().skip(indent).collect()
            } else {
                line.to_string()
            };
            line.trim_end_matches(is_layout_space).to_string()
        })
        .collect::<Vec<_>>()
        .join("{改行}")
}

fn is_layout_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{3000}')
}

/// `「…」` rendering of a string, text block or char literal.
pub fn quoted(literal: &Literal) -> Option<String> {
    let content = literal.quoted_content()?;
    let value = match literal.kind()? {
        LiteralKind::TextBlock => text_block_value(&content),
        _ => convert_escapes(&content),
    };
    Some(format!("「{value}」"))
}

/// Plain value text of a simple expression.
///
/// Numbers lose their type suffix, booleans become `真`/`偽`, strings lose
/// their quotes, and a minus sign in front of a number literal is kept.
/// Binary and other unary expressions have no value text. Anything else
/// is copied raw with numeric suffixes removed.
pub fn value_string(expr: &Expr) -> Option<String> {
    match unwrap(expr.clone()) {
        Expr::Literal(lit) => Some(literal_value(&lit)),
        Expr::Prefix(prefix) => {
            if prefix.op() != Some(SyntaxKind::MINUS) {
                return None;
            }
            match prefix.operand()? {
                Expr::Literal(lit)
                    if matches!(lit.kind(), Some(LiteralKind::Int | LiteralKind::Float)) =>
                {
                    Some(format!("-{}", literal_value(&lit)))
                }
                _ => None,
            }
        }
        Expr::Postfix(_) | Expr::Binary(_) => None,
        other => Some(strip_numeric_suffixes(&raw_text(other.syntax()))),
    }
}

fn literal_value(lit: &Literal) -> String {
    let text = lit.text();
    match lit.kind() {
        Some(LiteralKind::Int) => text.trim_end_matches(['L', 'l']).to_string(),
        Some(LiteralKind::Float) => float_value(&text),
        Some(LiteralKind::True) => "真".to_string(),
        Some(LiteralKind::False) => "偽".to_string(),
        Some(LiteralKind::String | LiteralKind::Char | LiteralKind::TextBlock) => {
            lit.quoted_content().unwrap_or(text)
        }
        _ => text,
    }
}

/// Floating literals print like Java's `Double.toString` for the common
/// cases: `2.5f` is `2.5`, `3d` is `3.0`.
fn float_value(text: &str) -> String {
    let digits: String = text
        .trim_end_matches(['F', 'f', 'D', 'd'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e7 => format!("{v:.1}"),
        Ok(v) if v.is_finite() => format!("{v}"),
        _ => digits,
    }
}

/// Remove `L`/`F`/`D` suffixes from number literals inside raw text.
///
/// Only digit runs that start a token count: `12L` loses its suffix,
/// `vec2d` keeps it.
pub fn strip_numeric_suffixes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_number = false;
    let mut prev: Option<char> = None;
    for (i, &c) in chars.iter().enumerate() {
        let starts_token = prev.map_or(true, |p| !(p.is_alphanumeric() || p == '_'));
        if c.is_ascii_digit() && (in_number || starts_token || prev == Some('.')) {
            in_number = true;
        } else if in_number && c == '.' {
            // still inside the number
        } else if in_number && matches!(c, 'L' | 'l' | 'F' | 'f' | 'D' | 'd') {
            let next = chars.get(i + 1).copied();
            if next.map_or(true, |n| !(n.is_alphanumeric() || n == '_')) {
                in_number = false;
                prev = Some(c);
                continue;
            }
            in_number = false;
        } else {
            in_number = false;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Strip parentheses and casts.
pub fn unwrap(expr: Expr) -> Expr {
    let mut expr = expr;
    loop {
        let inner = match &expr {
            Expr::Paren(p) => p.inner(),
            Expr::Cast(c) => c.expr(),
            _ => None,
        };
        match inner {
            Some(inner) => expr = inner,
            None => return expr,
        }
    }
}

/// Japanese name of a Java type used in declarations.
///
/// Array types get `配列` appended to their element name; unknown class
/// names are kept as written.
pub fn type_name(java: &str) -> String {
    if let Some(base) = java.strip_suffix("[]") {
        return format!("{}配列", type_name(base.trim_end()));
    }
    match java {
        "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte" => "整数",
        "double" | "Double" | "float" | "Float" => "小数",
        "boolean" | "Boolean" => "真偽値",
        "char" | "Character" => "文字",
        "String" => "文字列",
        other => other,
    }
    .to_string()
}
