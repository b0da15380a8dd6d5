//! # Completion
//!
//! Synthesizes the closing syntax an open block needs to parse the way it
//! will once its real terminator arrives.
//!
//! ## Modules
//!
//! - **`patch`**: `CompletionPatch`, `PatchReason`, `apply_patches()`
//! - **`inline`**: `complete_inline()` over inline content
//! - **`paragraph`**, **`heading`**, **`table`**: inline completion at the
//!   right place, or a literal fallback while the block's shape is undecided
//! - **`fence`**: closing code and math fences
//! - **`container`**: block quotes and list items, by recursion into their content
//!
//! ## Key Invariants
//!
//! - Patches only insert; existing text is never moved or removed
//! - Completing already-complete text yields no patches
//! - Only a block that is not yet complete is ever completed

pub mod container;
pub mod fence;
pub mod heading;
pub mod inline;
pub mod paragraph;
pub mod patch;
pub mod table;

pub use inline::{InlineCompletion, complete_inline};
pub use patch::{CompletionPatch, PatchReason, apply_patches};

use crate::{
    error::Degradation,
    parsing::{
        blocks::{Block, BlockKind},
        inline::InlineSpan,
    },
};

/// Completion result for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCompletion {
    pub patches: Vec<CompletionPatch>,
    /// The block cannot be completed into its eventual shape yet and
    /// renders as literal text.
    pub literal: bool,
    pub spans: Vec<InlineSpan>,
    pub diagnostics: Vec<Degradation>,
}

impl BlockCompletion {
    pub(crate) fn patched(patches: Vec<CompletionPatch>) -> Self {
        Self {
            patches,
            ..Self::default()
        }
    }

    pub(crate) fn from_inline(c: InlineCompletion) -> Self {
        Self {
            patches: c.patches,
            literal: false,
            spans: c.spans,
            diagnostics: c.diagnostics,
        }
    }

    pub(crate) fn literal(construct: &'static str, offset: usize) -> Self {
        Self {
            literal: true,
            diagnostics: vec![Degradation::MalformedConstruct { construct, offset }],
            ..Self::default()
        }
    }
}

/// Completes `block`, whose spans index `text`, according to its kind.
pub fn complete_block(text: &str, block: &Block) -> BlockCompletion {
    if block.complete {
        return BlockCompletion::default();
    }
    match block.kind {
        BlockKind::Paragraph => paragraph::complete_paragraph(text, block),
        BlockKind::Heading { .. } => heading::complete_heading(text, block),
        BlockKind::Table { .. } => table::complete_table(text, block),
        BlockKind::FencedCode {
            fence,
            closed: false,
        } => fence::complete_code_fence(text, block, fence),
        BlockKind::FencedMath { closed: false } => fence::complete_math_fence(text, block),
        BlockKind::BlockQuote | BlockKind::ListItem { .. } => {
            container::complete_container(text, block)
        }
        BlockKind::FencedCode { .. }
        | BlockKind::FencedMath { .. }
        | BlockKind::IndentedCode
        | BlockKind::ThematicBreak => BlockCompletion::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::scan;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete(text: &str) -> (String, bool) {
        let s = scan(text, 0);
        match s.trailing() {
            Some(b) => {
                let c = complete_block(text, b);
                (apply_patches(text, &c.patches), c.literal)
            }
            None => (text.to_string(), false),
        }
    }

    #[rstest]
    #[case::strong("Hello **wor", "Hello **wor**", false)]
    #[case::fence("```js\nconsole.log(1)", "```js\nconsole.log(1)\n```", false)]
    #[case::header_row("| a | b |\n", "| a | b |\n", true)]
    #[case::empty_heading("# ", "# ", false)]
    #[case::lone_star("*", "*", true)]
    #[case::star_a("*a", "*a*", false)]
    #[case::indented_code("    *x", "    *x", false)]
    #[case::thematic_break("***", "***", false)]
    #[case::quote_in_list("- > **a", "- > **a**", false)]
    fn dispatches_on_kind(#[case] input: &str, #[case] expected: &str, #[case] literal: bool) {
        assert_eq!(complete(input), (expected.to_string(), literal));
    }

    #[rstest]
    #[case("Hello **wor")]
    #[case("```js\nconsole.log(1)")]
    #[case("> - [a](https://x.y \"t")]
    #[case("| a |\n|---|\n| _b")]
    #[case("$$\nx\n$")]
    #[case("# ~~gone")]
    fn completed_text_needs_nothing_more(#[case] input: &str) {
        let (done, _) = complete(input);
        let again = scan(&done, 0);
        let last = again.blocks.last().unwrap();
        assert!(
            complete_block(&done, last).patches.is_empty(),
            "{done:?} still incomplete"
        );
    }

    #[test]
    fn complete_block_is_left_alone() {
        let text = "*a\n\n";
        let s = scan(text, 0);
        assert_eq!(complete_block(text, &s.blocks[0]), BlockCompletion::default());
    }
}
