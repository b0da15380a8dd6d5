use super::strip_marker_indent;

/// Display-math fence (`$$` ... `$$`).
pub struct MathFence;

impl MathFence {
    pub const DELIM: &'static str = "$$";

    /// Recognises an opening `$$` line. Returns `Some(true)` when the same
    /// line also closes the block, as in `$$ x^2 $$`.
    pub fn open(line: &str) -> Option<bool> {
        let t = strip_marker_indent(line.trim_end_matches(['\r', '\n']))?;
        let rest = t.strip_prefix(Self::DELIM)?;
        let rest = rest.trim_end();
        Some(rest.len() >= Self::DELIM.len() && rest.ends_with(Self::DELIM))
    }

    pub fn closes(line: &str) -> bool {
        line.trim_end().ends_with(Self::DELIM)
    }

    /// A lone `$` on the last line is half of a closing delimiter.
    pub fn partial_closer(line: &str) -> bool {
        line.trim() == "$"
    }
}
