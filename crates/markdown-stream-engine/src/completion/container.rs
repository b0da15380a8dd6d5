use crate::{
    error::Degradation,
    parsing::{
        blocks::{Block, BlockKind, ContentView, kinds::ListItem},
        scan,
    },
};

use super::{BlockCompletion, complete_block, patch::CompletionPatch};

/// Completes a block quote or list item by completing the block open
/// inside it.
///
/// The container's prefix is stripped one level, the inner text is scanned
/// and completed as a document of its own, and each patch is mapped back to
/// the source. A newline in a closer gets the container's prefix after it so
/// the closer stays inside the container.
pub fn complete_container(text: &str, block: &Block) -> BlockCompletion {
    let body = block.content.slice(text);
    if matches!(block.kind, BlockKind::ListItem { .. })
        && !body.contains('\n')
        && ListItem::is_bare_marker(body)
    {
        return BlockCompletion::literal("list marker", block.content.start);
    }

    let view = ContentView::of(text, block);
    let inner = view.joined(text);
    let inner_scan = scan(&inner, 0);
    let Some(open) = inner_scan.trailing() else {
        return BlockCompletion::default();
    };
    let nested = complete_block(&inner, open);

    let prefix = view.continuation_prefix(block);
    let continuation = format!("\n{prefix}");
    BlockCompletion {
        patches: nested
            .patches
            .into_iter()
            .map(|p| CompletionPatch {
                offset: view.to_source(p.offset),
                inserted_text: p.inserted_text.replace('\n', &continuation),
                reason: p.reason,
            })
            .collect(),
        literal: nested.literal,
        spans: nested
            .spans
            .into_iter()
            .map(|mut s| {
                s.start = view.to_source(s.start);
                s
            })
            .collect(),
        diagnostics: nested
            .diagnostics
            .into_iter()
            .map(|d| match d {
                Degradation::MalformedConstruct { construct, offset } => {
                    Degradation::MalformedConstruct {
                        construct,
                        offset: view.to_source(offset),
                    }
                }
                other => other,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::apply_patches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete(text: &str) -> BlockCompletion {
        let s = scan(text, 0);
        complete_container(text, s.trailing().unwrap())
    }

    #[rstest]
    #[case::quote_emphasis("> some *text", "> some *text*")]
    #[case::quote_fence("> ```\n> code", "> ```\n> code\n> ```")]
    #[case::item_strong("- **bold", "- **bold**")]
    #[case::item_fence("- ```\n  x", "- ```\n  x\n  ```")]
    #[case::nested("> - `code", "> - `code`")]
    #[case::ordered("10. see [a](/x", "10. see [a](/x)")]
    fn completes_inner_block(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply_patches(input, &complete(input).patches), expected);
    }

    #[rstest]
    #[case("-")]
    #[case("*")]
    #[case("1.")]
    #[case("> +")]
    fn bare_marker_is_literal(#[case] input: &str) {
        assert!(complete(input).literal);
    }

    #[test]
    fn spans_map_back_to_source() {
        let c = complete("> > **x");
        assert_eq!(c.spans.first().map(|s| s.start), Some(4));
    }
}
