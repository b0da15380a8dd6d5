//! Inner-content projection for container blocks.
//!
//! A block quote or list item wraps other markdown behind a per-line prefix.
//! Completion recurses into that inner markdown, so it needs the inner text
//! with prefixes removed and a way to map positions back to the source.

use crate::parsing::rope::span::Span;

use super::{
    kinds::{BlockQuote, strip_columns},
    types::{Block, BlockKind},
};

/// A single line's content projection within a block.
///
/// # Invariants
///
/// - `prefix` and `content` are within `raw_line`
/// - `prefix.end == content.start`
/// - `content.end == raw_line.end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Full physical line span, newline included.
    pub raw_line: Span,
    /// Container prefix region on this line (e.g. `> ` or the list marker).
    pub prefix: Span,
    /// Remainder after stripping the prefix, newline included.
    pub content: Span,
}

/// How a block's meaningful content is laid out in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    /// No per-line prefix semantics.
    Contiguous(Span),
    /// Content is non-contiguous; prefixes differ per line.
    Lines(Vec<ContentLine>),
}

impl ContentView {
    /// Projects `block` (whose spans index `text`) one container level down.
    pub fn of(text: &str, block: &Block) -> Self {
        if !matches!(
            block.kind,
            BlockKind::BlockQuote | BlockKind::ListItem { .. }
        ) {
            return ContentView::Contiguous(block.content);
        }
        let first_prefix = |line: &str| -> usize {
            match block.kind {
                BlockKind::BlockQuote => BlockQuote::strip_one(line).unwrap_or(0),
                BlockKind::ListItem { content_indent, .. } => content_indent.min(line.len()),
                _ => 0,
            }
        };
        let rest_prefix = |line: &str| -> usize {
            match block.kind {
                BlockKind::BlockQuote => BlockQuote::strip_one(line).unwrap_or(0),
                BlockKind::ListItem { content_indent, .. } => {
                    line.len() - strip_columns(line, content_indent).len()
                }
                _ => 0,
            }
        };

        let body = block.content.slice(text);
        let mut lines = vec![];
        let mut at = block.content.start;
        for (i, raw) in body.split_inclusive('\n').enumerate() {
            let n = if i == 0 { first_prefix(raw) } else { rest_prefix(raw) };
            // Never cut into the line ending.
            let n = n.min(raw.trim_end_matches(['\r', '\n']).len());
            let raw_line = Span::new(at, at + raw.len());
            lines.push(ContentLine {
                raw_line,
                prefix: Span::new(at, at + n),
                content: Span::new(at + n, raw_line.end),
            });
            at = raw_line.end;
        }
        ContentView::Lines(lines)
    }

    /// Returns true if this is a contiguous content view.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        matches!(self, ContentView::Contiguous(_))
    }

    /// Concatenates the content of every line.
    pub fn joined(&self, text: &str) -> String {
        match self {
            ContentView::Contiguous(sp) => sp.slice(text).to_string(),
            ContentView::Lines(lines) => lines.iter().map(|l| l.content.slice(text)).collect(),
        }
    }

    /// Maps an offset within [`joined`](Self::joined) back to a source offset.
    pub fn to_source(&self, inner: usize) -> usize {
        match self {
            ContentView::Contiguous(sp) => sp.start + inner,
            ContentView::Lines(lines) => {
                let mut base = 0;
                for l in lines {
                    let len = l.content.len();
                    if inner <= base + len {
                        return l.content.start + (inner - base);
                    }
                    base += len;
                }
                lines.last().map_or(0, |l| l.content.end)
            }
        }
    }

    /// Prefix to repeat after any newline inserted at the end of the block.
    pub fn continuation_prefix(&self, block: &Block) -> String {
        match block.kind {
            BlockKind::BlockQuote => format!("{} ", BlockQuote::PREFIX),
            BlockKind::ListItem { content_indent, .. } => " ".repeat(content_indent),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::kinds::ListMarker;

    fn block(kind: BlockKind, text: &str) -> Block {
        Block {
            kind,
            span: Span::new(0, text.len()),
            content: Span::new(0, text.len()),
            complete: false,
        }
    }

    #[test]
    fn paragraph_is_contiguous() {
        let text = "plain";
        let view = ContentView::of(text, &block(BlockKind::Paragraph, text));
        assert!(view.is_contiguous());
        assert_eq!(view.joined(text), "plain");
    }

    #[test]
    fn quote_strips_one_level() {
        let text = "> a\n> > b\nlazy";
        let view = ContentView::of(text, &block(BlockKind::BlockQuote, text));
        assert_eq!(view.joined(text), "a\n> b\nlazy");
    }

    #[test]
    fn list_item_strips_marker_and_indent() {
        let text = "- a\n  b\n  - c";
        let kind = BlockKind::ListItem {
            marker: ListMarker::Bullet('-'),
            content_indent: 2,
        };
        let view = ContentView::of(text, &block(kind, text));
        assert_eq!(view.joined(text), "a\nb\n- c");
    }

    #[test]
    fn maps_inner_offsets_back() {
        let text = "> ab\n> cd";
        let view = ContentView::of(text, &block(BlockKind::BlockQuote, text));
        // inner "ab\ncd": offset 5 is the end of "cd"
        assert_eq!(view.to_source(5), text.len());
        assert_eq!(view.to_source(1), 3);
    }

    #[test]
    fn empty_quote_marker_line_keeps_newline() {
        let text = ">\n> a";
        let view = ContentView::of(text, &block(BlockKind::BlockQuote, text));
        assert_eq!(view.joined(text), "\na");
    }
}
