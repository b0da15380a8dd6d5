use crate::{parsing::Scan, tree::RenderTree};

/// Validates scanner output against the text it scanned from `from`.
///
/// Asserts that:
/// - Block spans are in bounds and on char boundaries
/// - Blocks tile `[from, text.len())` in order, with no gaps or overlaps
/// - Content spans are contained within their block spans
/// - `stable_end` lies on a block boundary no earlier than `from`
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, from: usize, scan: &Scan) {
    let n = text.len();
    let mut at = from;
    for b in &scan.blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (text len: {})",
            b.span,
            n
        );
        assert!(
            text.is_char_boundary(b.span.start) && text.is_char_boundary(b.span.end),
            "block span splits a character: {:?}",
            b.span
        );
        assert_eq!(
            b.span.start, at,
            "block span does not continue the previous block: {:?}",
            b.span
        );
        assert!(
            b.content.start >= b.span.start && b.content.end <= b.span.end,
            "content span not contained in block span: content {:?}, block {:?}",
            b.content,
            b.span
        );
        at = b.span.end;
    }
    assert_eq!(at, n, "blocks stop short of the end of the text");
    assert!(
        scan.stable_end >= from
            && (scan.stable_end == from || scan.blocks.iter().any(|b| b.span.end == scan.stable_end)),
        "stable_end {} is not a block boundary",
        scan.stable_end
    );
}

/// Checks that every block stable in `earlier` is unchanged in `later`,
/// where `later` rendered a text that extends `earlier`'s.
///
/// # Panics
/// Panics naming the first block that changed.
pub fn check_stable_prefix(earlier: &RenderTree, later: &RenderTree) {
    for (i, block) in earlier.blocks.iter().enumerate().filter(|(_, b)| b.stable) {
        let Some(now) = later.blocks.get(i) else {
            panic!("stable block #{i} disappeared");
        };
        assert_eq!(
            (&block.span, &block.nodes),
            (&now.span, &now.nodes),
            "stable block #{i} changed"
        );
    }
}
