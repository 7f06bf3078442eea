//! Java to Nadeshiko sentence-notation translator.
//!
//! Each line of a Java source file is replaced by zero or more lines of
//! Nadeshiko-style Japanese text, keeping the original line order. It
//! works by:
//!
//! 1. Parsing the source to a CST (via `jnade-parser`)
//! 2. Walking the tree once, turning every construct into [`Item`]s
//!    anchored to a source line with an ordering priority
//! 3. Reassembling the items line by line, keeping blank lines
//!
//! Indentation is one unit (`　` by default) per level of block nesting,
//! recorded per line in an [`IndentTable`] during the walk.

pub mod config;
pub mod convert;
pub mod error;
pub mod expr;
pub mod indent;
pub mod item;
pub mod reassemble;

#[cfg(test)]
mod test_support;

pub use config::TranslateConfig;
pub use error::{ConfigError, TranslateError};
pub use indent::IndentTable;
pub use item::{Item, Priority};

use jnade_parser::Parse;

/// The translated output lines, without line terminators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    pub lines: Vec<String>,
}

impl Translation {
    /// The lines joined with `\n`, with a trailing newline unless empty.
    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Translate Java source code.
///
/// A source with syntax errors is not translated; its errors are returned
/// instead.
///
/// # Example
///
/// ```
/// use jnade_translate::{translate, TranslateConfig};
///
/// let source = "class A {\n  void m() {\n    System.out.println(\"hi\");\n  }\n}\n";
/// let out = translate(source, &TranslateConfig::default()).unwrap();
/// assert_eq!(
///     out.to_text(),
///     "クラス A\n　関数 mとは\n　　「hi」と表示。\n　ここまで。\nここまで。\n"
/// );
/// ```
pub fn translate(source: &str, config: &TranslateConfig) -> Result<Translation, TranslateError> {
    let parse = jnade_parser::parse(source);
    if !parse.ok() {
        tracing::debug!(errors = parse.errors().len(), "not translating: syntax errors");
        return Err(TranslateError::Parse(parse.errors().to_vec()));
    }
    Ok(translate_parse(&parse, source, config))
}

/// Translate an already parsed file. `source` must be the text `parse`
/// was built from.
pub fn translate_parse(parse: &Parse, source: &str, config: &TranslateConfig) -> Translation {
    let items = convert::convert_file(&parse.tree(), source, config);
    let lines = reassemble::reassemble(&items, source);
    tracing::debug!(items = items.len(), lines = lines.len(), "translated");
    Translation { lines }
}
