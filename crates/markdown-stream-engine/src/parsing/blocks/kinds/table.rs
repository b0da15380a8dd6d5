/// GFM table row syntax.
pub struct TableRow;

impl TableRow {
    pub const PIPE: u8 = b'|';

    /// Number of cells when `line` contains an unescaped pipe.
    pub fn cells(line: &str) -> Option<usize> {
        let t = line.trim();
        let pipes = Self::pipe_offsets(t);
        if pipes.is_empty() {
            return None;
        }
        let mut cells = pipes.len() + 1;
        if pipes.first() == Some(&0) {
            cells -= 1;
        }
        if t.len() > 1 && pipes.last() == Some(&(t.len() - 1)) {
            cells -= 1;
        }
        Some(cells.max(1))
    }

    /// Number of columns when `line` is a delimiter row like `|---|:--:|`.
    pub fn separator_cells(line: &str) -> Option<usize> {
        let t = line.trim();
        if !t.contains('|') {
            return None;
        }
        let inner = t.strip_prefix('|').unwrap_or(t);
        let inner = inner.strip_suffix('|').unwrap_or(inner);
        let mut count = 0;
        for cell in inner.split('|') {
            let c = cell.trim();
            let c = c.strip_prefix(':').unwrap_or(c);
            let c = c.strip_suffix(':').unwrap_or(c);
            if c.is_empty() || !c.bytes().all(|b| b == b'-') {
                return None;
            }
            count += 1;
        }
        Some(count)
    }

    /// Byte offset in `line` where its last cell's text begins.
    pub fn last_cell_start(line: &str) -> usize {
        let body = line.trim_end();
        let body = body.strip_suffix('|').unwrap_or(body);
        let lead = line.len() - line.trim_start().len();
        Self::pipe_offsets(&line[lead..body.len().max(lead)])
            .last()
            .map_or(0, |p| lead + p + 1)
    }

    fn pipe_offsets(s: &str) -> Vec<usize> {
        let b = s.as_bytes();
        let mut out = vec![];
        let mut i = 0;
        while i < b.len() {
            match b[i] {
                b'\\' => i += 1,
                Self::PIPE => out.push(i),
                _ => {}
            }
            i += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cells_with_outer_pipes() {
        assert_eq!(TableRow::cells("| a | b |"), Some(2));
    }

    #[test]
    fn counts_cells_without_outer_pipes() {
        assert_eq!(TableRow::cells("a | b | c"), Some(3));
    }

    #[test]
    fn escaped_pipe_is_not_a_cell_boundary() {
        assert_eq!(TableRow::cells(r"a \| b"), None);
    }

    #[test]
    fn separator_rows() {
        assert_eq!(TableRow::separator_cells("|---|:--:|"), Some(2));
        assert_eq!(TableRow::separator_cells("--- | ---"), Some(2));
        assert_eq!(TableRow::separator_cells("---"), None);
        assert_eq!(TableRow::separator_cells("| a | b |"), None);
    }

    #[test]
    fn last_cell_offset() {
        assert_eq!(TableRow::last_cell_start("| a | **b"), 5);
        assert_eq!(TableRow::last_cell_start("| a | b |"), 5);
        assert_eq!(TableRow::last_cell_start("no pipes"), 0);
    }
}
