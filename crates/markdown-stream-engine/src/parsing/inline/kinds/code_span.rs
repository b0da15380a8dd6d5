/// Code span syntax.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Length of the backtick run starting at `at`.
    pub fn run_len(s: &str, at: usize) -> usize {
        s.as_bytes()[at..]
            .iter()
            .take_while(|b| **b == Self::TICK)
            .count()
    }

    /// Finds a closing run of exactly `run` backticks at or after `from`.
    /// Returns the offset of that run.
    pub fn find_closer(s: &str, from: usize, run: usize) -> Option<usize> {
        let b = s.as_bytes();
        let mut i = from;
        while i < b.len() {
            if b[i] == Self::TICK {
                let n = Self::run_len(s, i);
                if n == run {
                    return Some(i);
                }
                i += n;
            } else {
                i += 1;
            }
        }
        None
    }

    /// Closer for an open span whose content is `content`.
    ///
    /// Content ending in a backtick would merge with the closing run, so the
    /// closer is separated by a space (stripped again by code span rules).
    pub fn closer(content: &str, run: usize) -> String {
        let ticks = "`".repeat(run);
        if content.trim_end().ends_with('`') {
            format!(" {ticks}")
        } else {
            ticks
        }
    }
}
