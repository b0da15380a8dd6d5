use crate::parsing::blocks::{
    Block,
    kinds::{AtxHeading, Paragraph, TableRow},
};

use super::{BlockCompletion, inline::complete_inline};

/// Completes a paragraph, or withholds it when its last line is still
/// ambiguous: a `#` run that may become a heading, or a row that may become
/// a table header.
pub fn complete_paragraph(text: &str, block: &Block) -> BlockCompletion {
    let body = block.content.slice(text);
    if body.trim().is_empty() || Paragraph::opens_html(body) {
        return BlockCompletion::default();
    }

    let lines: Vec<&str> = body.lines().collect();
    let Some(last) = lines.last().copied() else {
        return BlockCompletion::default();
    };
    let last_at = block.content.start + body.trim_end_matches(['\r', '\n']).len() - last.len();

    if AtxHeading::is_bare_marker(last) {
        return BlockCompletion::literal("heading marker", last_at);
    }
    if let [.., header, partial] = lines.as_slice()
        && !body.ends_with('\n')
        && is_partial_separator(partial)
        && TableRow::cells(header).is_some()
    {
        return BlockCompletion::literal("table header", last_at);
    }

    if TableRow::cells(last).is_some() {
        // Only the row itself may turn into a table header; lines above it
        // keep their formatting unless the row has something open.
        let inline = complete_inline(body, block.content.start);
        let row_is_open = inline.spans.iter().any(|s| !s.complete && s.start >= last_at);
        if lines.len() == 1 || row_is_open {
            return BlockCompletion::literal("table header", last_at);
        }
        return BlockCompletion::from_inline(inline);
    }
    BlockCompletion::from_inline(complete_inline(body, block.content.start))
}

/// An unterminated line that may still grow into a separator row.
pub(super) fn is_partial_separator(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.bytes().all(|b| matches!(b, b'|' | b'-' | b':' | b' ' | b'\t'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{completion::apply_patches, parsing::scan};
    use pretty_assertions::assert_eq;

    fn complete(text: &str) -> BlockCompletion {
        let s = scan(text, 0);
        complete_paragraph(text, s.trailing().unwrap())
    }

    #[test]
    fn emphasis_in_paragraph() {
        let text = "one\ntwo **three";
        assert_eq!(apply_patches(text, &complete(text).patches), "one\ntwo **three**");
    }

    #[test]
    fn header_row_without_separator_is_literal() {
        let c = complete("| a | b |\n");
        assert!(c.literal);
        assert!(c.patches.is_empty());
    }

    #[test]
    fn pipe_in_last_line_keeps_earlier_formatting() {
        let c = complete("see **this** now\nuse a | b");
        assert!(!c.literal);
        assert!(c.patches.is_empty());

        let text = "some *open\nuse a | b";
        assert_eq!(apply_patches(text, &complete(text).patches), "some *open\nuse a | b*");
    }

    #[test]
    fn open_construct_in_candidate_row_is_literal() {
        assert!(complete("intro\nuse a | **b").literal);
        assert!(complete("intro\n| a | [b").literal);
    }

    #[test]
    fn partial_separator_keeps_header_literal() {
        assert!(complete("| a | b |\n|--").literal);
    }

    #[test]
    fn bare_hash_run_is_literal() {
        assert!(complete("##").literal);
        assert!(!complete("#tag and *more").literal);
    }

    #[test]
    fn html_paragraph_is_left_alone() {
        let c = complete("<div>*x");
        assert!(!c.literal);
        assert!(c.patches.is_empty());
    }

    #[test]
    fn blank_tail_needs_nothing() {
        let text = "done\n\n";
        let s = scan(text, 0);
        let tail = s.trailing().unwrap();
        assert_eq!(complete_paragraph(text, tail), BlockCompletion::default());
    }
}
