use super::strip_marker_indent;

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Byte length of one quote prefix (`>` plus an optional following space,
    /// after up to three spaces of indent), or `None` if `line` is not quoted.
    pub fn strip_one(line: &str) -> Option<usize> {
        let t = strip_marker_indent(line)?;
        let lead = line.len() - t.len();
        let rest = t.strip_prefix(Self::PREFIX)?;
        let gap = usize::from(rest.starts_with(' '));
        Some(lead + 1 + gap)
    }

    /// Counts nested `>` prefixes: `> > a` and `>> a` are both depth 2.
    pub fn depth(line: &str) -> u8 {
        let mut rest = line;
        let mut depth = 0u8;
        while let Some(n) = Self::strip_one(rest) {
            depth = depth.saturating_add(1);
            rest = &rest[n..];
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_one("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_one("> hello"), Some(2));
        assert_eq!(BlockQuote::strip_one(">hello"), Some(1));
        assert_eq!(BlockQuote::strip_one("  > hi"), Some(4));
    }

    #[test]
    fn nested_depth() {
        assert_eq!(BlockQuote::depth("> > hello"), 2);
        assert_eq!(BlockQuote::depth(">> hello"), 2);
        assert_eq!(BlockQuote::depth("plain"), 0);
    }
}
