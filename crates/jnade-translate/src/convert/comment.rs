//! Comments are carried over verbatim at the indentation of their line.

use jnade_parser::{SyntaxKind, SyntaxNode, SyntaxToken};

use super::Walker;
use crate::item::Priority;

impl Walker<'_> {
    pub(super) fn convert_comments(&mut self, root: &SyntaxNode) {
        let comments: Vec<SyntaxToken> = root
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT))
            .collect();
        tracing::debug!(count = comments.len(), "comments");
        for token in comments {
            match token.kind() {
                SyntaxKind::LINE_COMMENT => self.line_comment(&token),
                _ => self.block_comment(&token),
            }
        }
    }

    fn line_comment(&mut self, token: &SyntaxToken) {
        let line = self.token_line(token);
        let indent = self.indent.get(line).to_string();
        let body = token.text().strip_prefix("//").unwrap_or(token.text()).trim();
        self.emit(line, format!("{indent}//{body}"), Priority::COMMENT);
    }

    fn block_comment(&mut self, token: &SyntaxToken) {
        let line = self.token_line(token);
        let indent = self.indent.get(line).to_string();
        let text = token.text();
        let body = text
            .strip_prefix("/*")
            .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
            .unwrap_or(text);

        if !body.contains('\n') {
            self.emit(line, format!("{indent}/*{body}*/"), Priority::COMMENT);
            return;
        }

        let parts: Vec<&str> = body.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        let last = parts.len() - 1;
        for (i, part) in parts.iter().enumerate() {
            let part = if part.trim_start().starts_with('*') {
                part.replacen('*', " ", 1)
            } else {
                part.to_string()
            };
            if i == last && part.trim().is_empty() {
                continue;
            }
            let text = if i == 0 {
                format!("{indent}/*{part}")
            } else {
                format!("{indent}{part}")
            };
            self.emit(line + i as u32, text, Priority::COMMENT);
        }
        self.emit(line + last as u32, format!("{indent}*/"), Priority::COMMENT);
    }
}
