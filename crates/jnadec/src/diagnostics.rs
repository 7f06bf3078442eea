//! Rendering parse errors for the terminal or as JSON lines.

use std::ops::Range;
use std::path::Path;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use jnade_parser::ParseError;

/// Output mode for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    pub color: bool,
    pub json: bool,
}

impl DiagnosticOptions {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self {
            color: !no_color && !json,
            json,
        }
    }
}

/// Write every error to stderr.
pub fn report_parse_errors(source: &str, path: &Path, errors: &[ParseError], opts: DiagnosticOptions) {
    let file_name = path.display().to_string();
    for error in errors {
        if opts.json {
            eprintln!("{}", parse_error_json(source, &file_name, error));
        } else {
            let _ = render_report(source, error, opts.color).eprint(Source::from(source));
        }
    }
}

/// One JSON object per error, in the shape used for every driver diagnostic.
pub fn parse_error_json(source: &str, file_name: &str, error: &ParseError) -> serde_json::Value {
    let mut spans = vec![span_json(source, error.span.start, error.span.end, &error.message)];
    if let Some((message, span)) = &error.related {
        spans.push(span_json(source, span.start, span.end, message));
    }
    serde_json::json!({
        "code": "P0001",
        "severity": "error",
        "message": format!("Parse error: {}", error.message),
        "file": file_name,
        "spans": spans,
        "fix": null
    })
}

/// The JSON form of a driver failure that has no source location.
pub fn failure_json(message: &str) -> serde_json::Value {
    serde_json::json!({
        "code": "C0001",
        "severity": "error",
        "message": message,
        "file": "",
        "spans": [],
        "fix": null
    })
}

fn span_json(source: &str, start: u32, end: u32, label: &str) -> serde_json::Value {
    let range = byte_range(source, start, end);
    serde_json::json!({
        "start": range.start,
        "end": range.end,
        "label": label
    })
}

fn render_report(source: &str, error: &ParseError, color: bool) -> Report<'static, Range<usize>> {
    let config = Config::default()
        .with_index_type(IndexType::Byte)
        .with_color(color);
    let range = byte_range(source, error.span.start, error.span.end);
    let mut report = Report::build(ReportKind::Error, range.clone())
        .with_message("Parse error")
        .with_config(config)
        .with_label(
            Label::new(range)
                .with_message(error.message.clone())
                .with_color(Color::Red),
        );
    if let Some((message, span)) = &error.related {
        report = report.with_label(
            Label::new(byte_range(source, span.start, span.end))
                .with_message(message.clone())
                .with_color(Color::Blue),
        );
    }
    report.finish()
}

/// A non-empty range within the source, so errors at end of input still
/// get a label.
fn byte_range(source: &str, start: u32, end: u32) -> Range<usize> {
    let len = source.len();
    let start = (start as usize).min(len);
    let end = (end as usize).max(start + 1);
    if end > len && len > 0 {
        return len.saturating_sub(1).min(start)..len;
    }
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnade_common::span::Span;

    #[test]
    fn json_carries_primary_and_related_spans() {
        let error = ParseError::with_related(
            "expected `}`",
            Span::new(12, 12),
            "class body opened here",
            Span::new(8, 9),
        );
        let json = parse_error_json("class A {\n  \n", "A.java", &error);
        assert_eq!(json["code"], "P0001");
        assert_eq!(json["message"], "Parse error: expected `}`");
        assert_eq!(json["file"], "A.java");
        assert_eq!(json["spans"][0]["start"], 12);
        assert_eq!(json["spans"][0]["end"], 13);
        assert_eq!(json["spans"][1]["label"], "class body opened here");
        assert!(json["fix"].is_null());
    }

    #[test]
    fn ranges_are_never_empty() {
        assert_eq!(byte_range("abcdef", 2, 2), 2..3);
        assert_eq!(byte_range("abc", 3, 3), 2..3);
        assert_eq!(byte_range("abc", 0, 2), 0..2);
    }

    #[test]
    fn colorless_report_names_the_message() {
        let source = "class A {\n  void m( {\n}\n";
        let error = ParseError::new("expected `)`", Span::new(21, 22));
        let mut out = Vec::new();
        render_report(source, &error, false)
            .write(Source::from(source), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Parse error"));
        assert!(text.contains("expected `)`"));
    }

    #[test]
    fn color_is_off_for_json() {
        assert!(!DiagnosticOptions::new(true, false).color);
        assert!(DiagnosticOptions::new(false, false).color);
        assert!(!DiagnosticOptions::new(false, true).color);
    }
}
