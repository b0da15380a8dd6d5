use crate::parsing::rope::{lines::LineRef, span::Span};

use super::{
    kinds::{SetextUnderline, TableRow, indent_width},
    open::{BlockOpen, try_open_leaf},
};

/// Classification of a single line containing only local facts.
///
/// Each line is classified independently of its neighbours; the
/// [`BlockBuilder`](super::BlockBuilder) supplies context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line, newline included.
    pub line: Span,
    /// Line text without its line ending.
    pub text: String,
    /// Whether the newline has arrived.
    pub terminated: bool,
    /// Whitespace only.
    pub is_blank: bool,
    /// Leading indentation in columns.
    pub indent: usize,
    /// Block opener recognised at the start of the line.
    pub opener: Option<BlockOpen>,
    /// Setext underline level if the line could underline a paragraph.
    pub setext: Option<u8>,
    /// Cell count if the line could be a table row.
    pub row_cells: Option<usize>,
    /// Column count if the line is a table delimiter row.
    pub separator_cells: Option<usize>,
}

/// Classifies individual lines for the block scanning phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.text.trim_end_matches(['\r', '\n']);
        let is_blank = text.trim().is_empty();
        let indent = indent_width(text);

        LineClass {
            line: lr.span,
            text: text.to_string(),
            terminated: lr.is_terminated(),
            is_blank,
            indent,
            opener: if is_blank {
                None
            } else {
                try_open_leaf(text, indent)
            },
            setext: SetextUnderline::level(text),
            row_cells: TableRow::cells(text),
            separator_cells: TableRow::separator_cells(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(s: &str) -> LineClass {
        let lr = LineRef {
            span: Span::new(0, s.len()),
            text: s.to_string(),
        };
        MarkdownLineClassifier.classify(&lr)
    }

    #[test]
    fn blank_line() {
        let c = classify("   \n");
        assert!(c.is_blank);
        assert!(c.terminated);
        assert_eq!(c.opener, None);
    }

    #[test]
    fn heading_line() {
        let c = classify("## Title");
        assert_eq!(c.opener, Some(BlockOpen::Heading { level: 2 }));
        assert!(!c.terminated);
    }

    #[test]
    fn dash_line_is_break_and_underline() {
        let c = classify("---\n");
        assert_eq!(c.opener, Some(BlockOpen::ThematicBreak));
        assert_eq!(c.setext, Some(2));
    }

    #[test]
    fn table_facts() {
        let header = classify("| a | b |\n");
        assert_eq!(header.row_cells, Some(2));
        assert_eq!(header.separator_cells, None);

        let sep = classify("|---|---|\n");
        assert_eq!(sep.separator_cells, Some(2));
    }
}
