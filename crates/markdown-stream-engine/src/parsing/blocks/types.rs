use serde::Serialize;

use crate::parsing::rope::span::Span;

use super::kinds::{Fence, ListMarker};

/// The kind of a top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Default when no other block opener matches.
    Paragraph,
    /// ATX (`# x`) or setext (`x\n===`) heading.
    Heading { level: u8 },
    /// A fenced code block (``` or ~~~).
    FencedCode {
        fence: Fence,
        /// Whether the closing fence has been seen.
        closed: bool,
    },
    /// A `$$` display-math block.
    FencedMath { closed: bool },
    /// Code indented by four or more columns.
    IndentedCode,
    /// One list item with its continuation lines.
    ListItem {
        marker: ListMarker,
        /// Column where the item content starts.
        content_indent: usize,
    },
    /// Header row, separator row, and the body rows that followed.
    Table { columns: usize },
    BlockQuote,
    ThematicBreak,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::FencedCode { .. } => "fenced-code",
            BlockKind::FencedMath { .. } => "fenced-math",
            BlockKind::IndentedCode => "indented-code",
            BlockKind::ListItem { .. } => "list-item",
            BlockKind::Table { .. } => "table",
            BlockKind::BlockQuote => "blockquote",
            BlockKind::ThematicBreak => "thematic-break",
        }
    }
}

impl Serialize for BlockKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A block of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Full byte span, including blank lines that preceded the block.
    /// Consecutive block spans tile the scanned text.
    pub span: Span,
    /// The block's own lines, without the leading blank lines.
    pub content: Span,
    /// The block's terminator has been observed on a complete line, so no
    /// further input can change its shape.
    pub complete: bool,
}
