use crate::parsing::blocks::{
    Block,
    kinds::{AtxHeading, ListItem, SetextUnderline, TableRow},
};

use super::{BlockCompletion, inline::complete_inline, paragraph::is_partial_separator};

/// Completes the text of a heading. The marker itself is already complete
/// syntax, so only the inline text can need closers.
pub fn complete_heading(text: &str, block: &Block) -> BlockCompletion {
    let body = block.content.slice(text);
    let start = block.content.start;

    let (from, to) = match body.trim_end_matches(['\r', '\n']).rsplit_once('\n') {
        // Setext: everything above the underline.
        Some((above, under)) if SetextUnderline::level(under).is_some() => {
            // A lone `-` may still grow into a list item.
            if !body.ends_with('\n') && ListItem::is_bare_marker(under.trim_end()) {
                return BlockCompletion::literal("setext underline", start + above.len() + 1);
            }
            // `a | b` over `--` may still grow into a table.
            let header = above.lines().last().unwrap_or_default();
            if is_partial_separator(under) && TableRow::cells(header).is_some() {
                let at = start + above.len() - header.len();
                return BlockCompletion::literal("table header", at);
            }
            (0, above.len())
        }
        _ => {
            let line = body.trim_end_matches(['\r', '\n']);
            let from = AtxHeading::content_offset(line);
            (from, from + atx_text_len(&line[from..]))
        }
    };

    BlockCompletion::from_inline(complete_inline(&body[from..to], start + from))
}

/// Length of ATX heading text before an optional closing `#` sequence.
fn atx_text_len(s: &str) -> usize {
    let t = s.trim_end();
    let hashes = t.len() - t.trim_end_matches(AtxHeading::MARKER as char).len();
    if hashes == 0 {
        return s.len();
    }
    let before = &t[..t.len() - hashes];
    if before.is_empty() || before.ends_with([' ', '\t']) {
        before.trim_end().len()
    } else {
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{completion::apply_patches, parsing::scan};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete(text: &str) -> String {
        let s = scan(text, 0);
        let c = complete_heading(text, s.trailing().unwrap());
        apply_patches(text, &c.patches)
    }

    #[rstest]
    #[case::empty("# ", "# ")]
    #[case::plain("## Title", "## Title")]
    #[case::strong("# **Bold", "# **Bold**")]
    #[case::closing_sequence("# *a #", "# *a* #")]
    #[case::hash_in_text("# C#", "# C#")]
    #[case::setext("*Title\n==", "*Title*\n==")]
    fn completes_heading_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(complete(input), expected);
    }

    #[test]
    fn underline_under_row_waits_for_separator() {
        let text = "a | b\n--";
        let s = scan(text, 0);
        assert!(complete_heading(text, s.trailing().unwrap()).literal);
    }

    #[rstest]
    #[case::dash("Steps:\n-")]
    #[case::dash_space("Steps:\n- ")]
    #[case::indented_dash("Steps:\n  -")]
    fn dash_that_may_become_a_list_item_is_literal(#[case] text: &str) {
        let s = scan(text, 0);
        let c = complete_heading(text, s.trailing().unwrap());
        assert!(c.literal);
        assert!(c.patches.is_empty());
    }

    #[rstest]
    #[case::terminated("Steps:\n-\n")]
    #[case::double_dash("Steps:\n--")]
    fn settled_dash_underline_is_a_heading(#[case] text: &str) {
        let s = scan(text, 0);
        let block = s.blocks.last().unwrap();
        assert!(!complete_heading(text, block).literal);
    }

    #[test]
    fn closing_sequence_detection() {
        assert_eq!(atx_text_len("a ##"), 1);
        assert_eq!(atx_text_len("a##"), 3);
        assert_eq!(atx_text_len("##"), 0);
    }
}
