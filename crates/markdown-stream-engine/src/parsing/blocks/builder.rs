use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    kinds::{BlockQuote, CodeFence, Fence, ListMarker, MathFence, strip_columns},
    open::BlockOpen,
    types::{Block, BlockKind},
};

#[derive(Debug, Clone, Copy)]
enum LeafState {
    None,
    Paragraph {
        content_start: usize,
        end: usize,
        lines: usize,
        last_line: Span,
        last_row_cells: Option<usize>,
    },
    Fence {
        fence: Fence,
        content_start: usize,
        end: usize,
    },
    Math {
        content_start: usize,
        end: usize,
    },
    IndentedCode {
        content_start: usize,
        end: usize,
    },
    Table {
        columns: usize,
        content_start: usize,
        end: usize,
    },
    ListItem {
        marker: ListMarker,
        content_indent: usize,
        content_start: usize,
        end: usize,
        inner_fence: Option<Fence>,
        /// Blank lines followed the item's last content line.
        after_blank: bool,
    },
    BlockQuote {
        content_start: usize,
        end: usize,
    },
}

/// Turns classified lines into [`Block`]s.
///
/// Every emitted block starts where the previous one ended, so blank lines
/// between blocks land in the span of the block after them. A block is marked
/// complete only when the line that closed it was itself terminated.
pub struct BlockBuilder {
    cursor: usize,
    leaf: LeafState,
    out: Vec<Block>,
}

impl BlockBuilder {
    /// Starts a builder at `start`, which must be a block boundary.
    pub fn new(start: usize) -> Self {
        Self {
            cursor: start,
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if self.absorb(c) {
            return;
        }

        if c.is_blank {
            self.close_leaf(c.terminated);
            return;
        }

        if let LeafState::Paragraph { last_row_cells, .. } = self.leaf {
            if let Some(level) = c.setext {
                self.extend(c.line.end);
                self.close_as(BlockKind::Heading { level }, c.terminated);
                return;
            }
            if let (Some(columns), Some(header)) = (c.separator_cells, last_row_cells)
                && columns == header
            {
                self.open_table(columns, c);
                return;
            }
            match c.opener {
                Some(open) if open.interrupts_paragraph() => {
                    self.close_leaf(c.terminated);
                    self.open_leaf(open, c);
                }
                _ => self.extend_paragraph(c),
            }
            return;
        }

        match c.opener {
            Some(open) => self.open_leaf(open, c),
            None => self.extend_paragraph(c),
        }
    }

    /// Flushes the open block and any blank tail, up to `text_end`.
    pub fn finish(mut self, text_end: usize) -> Vec<Block> {
        // EOF flush
        self.close_leaf(false);
        if self.cursor < text_end {
            // A blank-only tail is an empty paragraph waiting for content.
            self.out.push(Block {
                kind: BlockKind::Paragraph,
                span: Span::new(self.cursor, text_end),
                content: Span::at(text_end),
                complete: false,
            });
        }
        self.out
    }

    /// Offers the line to an open non-paragraph block. Returns true when the
    /// line was consumed; otherwise the block has been closed if the line ends it.
    fn absorb(&mut self, c: &LineClass) -> bool {
        match self.leaf {
            LeafState::None | LeafState::Paragraph { .. } => false,
            LeafState::Fence { fence, .. } => {
                self.extend(c.line.end);
                if CodeFence::closes(fence, &c.text) {
                    self.close_as(
                        BlockKind::FencedCode {
                            fence,
                            closed: true,
                        },
                        c.terminated,
                    );
                }
                true
            }
            LeafState::Math { .. } => {
                self.extend(c.line.end);
                if MathFence::closes(&c.text) {
                    self.close_as(BlockKind::FencedMath { closed: true }, c.terminated);
                }
                true
            }
            LeafState::IndentedCode { .. } => {
                if !c.is_blank && c.indent > 3 {
                    self.extend(c.line.end);
                    return true;
                }
                self.close_leaf(c.terminated);
                false
            }
            LeafState::Table { .. } => {
                if !c.is_blank && c.opener.is_none() {
                    self.extend(c.line.end);
                    return true;
                }
                self.close_leaf(c.terminated);
                false
            }
            LeafState::BlockQuote { .. } => {
                let quoted = BlockQuote::strip_one(&c.text).is_some();
                if quoted || (!c.is_blank && c.opener.is_none()) {
                    self.extend(c.line.end);
                    return true;
                }
                self.close_leaf(c.terminated);
                false
            }
            LeafState::ListItem {
                content_indent,
                inner_fence,
                after_blank,
                ..
            } => {
                // A blank line leaves the item open: only the next content
                // line tells whether it continues as a loose item.
                if c.is_blank && inner_fence.is_none() {
                    self.set_after_blank(true);
                    return true;
                }
                let nested = c.indent >= content_indent;
                let continues = match inner_fence {
                    Some(_) => c.is_blank || nested,
                    None if after_blank => nested,
                    None => nested || c.opener.is_none(),
                };
                if !continues {
                    self.close_leaf(c.terminated);
                    return false;
                }
                self.extend(c.line.end);
                self.set_after_blank(false);
                let inner = strip_columns(&c.text, content_indent);
                self.track_inner_fence(inner);
                true
            }
        }
    }

    fn set_after_blank(&mut self, blank: bool) {
        if let LeafState::ListItem { after_blank, .. } = &mut self.leaf {
            *after_blank = blank;
        }
    }

    fn track_inner_fence(&mut self, inner: &str) {
        if let LeafState::ListItem { inner_fence, .. } = &mut self.leaf {
            *inner_fence = match *inner_fence {
                Some(fence) if CodeFence::closes(fence, inner) => None,
                Some(fence) => Some(fence),
                None => CodeFence::open(inner).map(|(fence, _)| fence),
            };
        }
    }

    fn open_leaf(&mut self, open: BlockOpen, c: &LineClass) {
        let content_start = c.line.start;
        let end = c.line.end;
        self.leaf = match open {
            BlockOpen::Heading { level } => {
                return self.emit_line(BlockKind::Heading { level }, c);
            }
            BlockOpen::ThematicBreak => return self.emit_line(BlockKind::ThematicBreak, c),
            BlockOpen::FencedMath { closed: true } => {
                return self.emit_line(BlockKind::FencedMath { closed: true }, c);
            }
            BlockOpen::FencedMath { closed: false } => LeafState::Math { content_start, end },
            BlockOpen::FencedCode { fence } => LeafState::Fence {
                fence,
                content_start,
                end,
            },
            BlockOpen::IndentedCode => LeafState::IndentedCode { content_start, end },
            BlockOpen::BlockQuote => LeafState::BlockQuote { content_start, end },
            BlockOpen::ListItem(m) => {
                let first = c.text.get(m.content_indent..).unwrap_or("");
                LeafState::ListItem {
                    marker: m.marker,
                    content_indent: m.content_indent,
                    content_start,
                    end,
                    inner_fence: CodeFence::open(first).map(|(fence, _)| fence),
                    after_blank: false,
                }
            }
        };
    }

    /// Emits a block that opens and closes on the same line.
    fn emit_line(&mut self, kind: BlockKind, c: &LineClass) {
        self.push_block(kind, c.line.start, c.line.end, c.terminated);
    }

    fn open_table(&mut self, columns: usize, c: &LineClass) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let LeafState::Paragraph {
            content_start,
            lines,
            last_line,
            ..
        } = prev
        else {
            self.leaf = prev;
            return;
        };
        // Lines above the header row stay a paragraph of their own.
        let table_start = if lines > 1 {
            self.push_block(
                BlockKind::Paragraph,
                content_start,
                last_line.start,
                c.terminated,
            );
            last_line.start
        } else {
            content_start
        };
        self.leaf = LeafState::Table {
            columns,
            content_start: table_start,
            end: c.line.end,
        };
    }

    fn extend_paragraph(&mut self, c: &LineClass) {
        self.leaf = match self.leaf {
            LeafState::Paragraph {
                content_start,
                lines,
                ..
            } => LeafState::Paragraph {
                content_start,
                end: c.line.end,
                lines: lines + 1,
                last_line: c.line,
                last_row_cells: c.row_cells,
            },
            _ => LeafState::Paragraph {
                content_start: c.line.start,
                end: c.line.end,
                lines: 1,
                last_line: c.line,
                last_row_cells: c.row_cells,
            },
        };
    }

    fn extend(&mut self, new_end: usize) {
        match &mut self.leaf {
            LeafState::None => {}
            LeafState::Paragraph { end, .. }
            | LeafState::Fence { end, .. }
            | LeafState::Math { end, .. }
            | LeafState::IndentedCode { end, .. }
            | LeafState::Table { end, .. }
            | LeafState::ListItem { end, .. }
            | LeafState::BlockQuote { end, .. } => *end = new_end,
        }
    }

    fn close_leaf(&mut self, complete: bool) {
        let kind = match self.leaf {
            LeafState::None => return,
            LeafState::Paragraph { .. } => BlockKind::Paragraph,
            LeafState::Fence { fence, .. } => BlockKind::FencedCode {
                fence,
                closed: false,
            },
            LeafState::Math { .. } => BlockKind::FencedMath { closed: false },
            LeafState::IndentedCode { .. } => BlockKind::IndentedCode,
            LeafState::Table { columns, .. } => BlockKind::Table { columns },
            LeafState::ListItem {
                marker,
                content_indent,
                ..
            } => BlockKind::ListItem {
                marker,
                content_indent,
            },
            LeafState::BlockQuote { .. } => BlockKind::BlockQuote,
        };
        self.close_as(kind, complete);
    }

    fn close_as(&mut self, kind: BlockKind, complete: bool) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let (content_start, end) = match prev {
            LeafState::None => return,
            LeafState::Paragraph {
                content_start, end, ..
            }
            | LeafState::Fence {
                content_start, end, ..
            }
            | LeafState::Math { content_start, end }
            | LeafState::IndentedCode { content_start, end }
            | LeafState::Table {
                content_start, end, ..
            }
            | LeafState::ListItem {
                content_start, end, ..
            }
            | LeafState::BlockQuote { content_start, end } => (content_start, end),
        };
        self.push_block(kind, content_start, end, complete);
    }

    fn push_block(&mut self, kind: BlockKind, content_start: usize, end: usize, complete: bool) {
        self.out.push(Block {
            kind,
            span: Span::new(self.cursor, end),
            content: Span::new(content_start, end),
            complete,
        });
        self.cursor = end;
    }
}
