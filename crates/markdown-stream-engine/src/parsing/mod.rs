pub mod blocks;
pub mod inline;
pub mod rope;

use blocks::{Block, BlockBuilder, MarkdownLineClassifier};
use rope::{lines_with_spans, tail_rope};

/// Blocks found by one scan, from the resume point to the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// End of the leading run of complete blocks. Never less than the
    /// resume point the scan started from.
    pub stable_end: usize,
    pub blocks: Vec<Block>,
}

impl Scan {
    /// Blocks that lie entirely within the stable prefix.
    pub fn stable(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks
            .iter()
            .take_while(move |b| b.complete && b.span.end <= self.stable_end)
    }

    /// Blocks after the stable prefix. Everything here is re-examined on
    /// the next push.
    pub fn open_region(&self) -> &[Block] {
        let n = self.stable().count();
        &self.blocks[n..]
    }

    /// The block still being written, if the text does not end on a
    /// complete block.
    pub fn trailing(&self) -> Option<&Block> {
        self.blocks.last().filter(|b| !b.complete)
    }
}

/// Scans `text` into blocks, starting at `resume_from`.
///
/// `resume_from` must be a block boundary from an earlier scan of a text
/// with the same prefix; the blocks before it are not revisited. A value
/// that is out of range or not on a char boundary falls back to a full scan.
pub fn scan(text: &str, resume_from: usize) -> Scan {
    let from = if resume_from <= text.len() && text.is_char_boundary(resume_from) {
        resume_from
    } else {
        0
    };

    let rope = tail_rope(text, from);
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new(from);
    for lr in lines_with_spans(&rope, from) {
        builder.push(&classifier.classify(&lr));
    }
    let blocks = builder.finish(text.len());

    let stable_end = blocks
        .iter()
        .take_while(|b| b.complete)
        .last()
        .map_or(from, |b| b.span.end);

    Scan { stable_end, blocks }
}
