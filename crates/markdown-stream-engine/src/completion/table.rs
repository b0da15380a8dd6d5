use crate::parsing::blocks::{Block, kinds::TableRow};

use super::{BlockCompletion, inline::complete_inline};

/// Completes the last cell of a table's last body row.
///
/// The header and separator rows are complete syntax once the block is a
/// table, so a table still waiting on its separator never gets here: it is
/// a paragraph and renders literally.
pub fn complete_table(text: &str, block: &Block) -> BlockCompletion {
    let body = block.content.slice(text);
    let lines: Vec<&str> = body.lines().collect();
    // Header and separator only.
    if lines.len() <= 2 {
        return BlockCompletion::default();
    }
    let Some(row) = lines.last() else {
        return BlockCompletion::default();
    };
    let rows_end = body.trim_end_matches(['\r', '\n']).len();
    let row_at = block.content.start + rows_end - row.len();

    let cell_end = {
        let t = row.trim_end();
        t.strip_suffix(TableRow::PIPE as char).unwrap_or(t).len()
    };
    let cell_start = TableRow::last_cell_start(row).min(cell_end);

    BlockCompletion::from_inline(complete_inline(
        &row[cell_start..cell_end],
        row_at + cell_start,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{completion::apply_patches, parsing::scan};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete(text: &str) -> String {
        let s = scan(text, 0);
        let c = complete_table(text, s.trailing().unwrap());
        apply_patches(text, &c.patches)
    }

    #[rstest]
    #[case::separator_only("| a | b |\n|---|---|", "| a | b |\n|---|---|")]
    #[case::last_cell("| a | b |\n|---|---|\n| x | **y", "| a | b |\n|---|---|\n| x | **y**")]
    #[case::before_trailing_pipe("| a |\n|---|\n| `x |", "| a |\n|---|\n| `x` |")]
    #[case::only_last_cell("a | b\n--|--\n*x | y", "a | b\n--|--\n*x | y")]
    fn completes_last_cell(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(complete(input), expected);
    }
}
