/// Emphasis and strikethrough delimiter runs.
pub struct DelimiterRun;

/// What a delimiter run may do, from the characters around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

impl DelimiterRun {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const TILDE: u8 = b'~';
    /// Strikethrough runs longer than this are plain text.
    pub const MAX_TILDES: usize = 2;

    pub fn is_delimiter(b: u8) -> bool {
        matches!(b, Self::STAR | Self::UNDERSCORE | Self::TILDE)
    }

    /// Classifies a run of `ch` given the characters just outside it.
    /// `None` stands for the start or end of the content.
    pub fn flanking(ch: u8, len: usize, before: Option<char>, after: Option<char>) -> Flanking {
        let before_ws = before.is_none_or(char::is_whitespace);
        let after_ws = after.is_none_or(char::is_whitespace);
        let before_punct = before.is_some_and(is_punctuation);
        let after_punct = after.is_some_and(is_punctuation);

        let left = !after_ws && (!after_punct || before_ws || before_punct);
        let right = !before_ws && (!before_punct || after_ws || after_punct);

        let (can_open, can_close) = match ch {
            Self::UNDERSCORE => (
                left && (!right || before_punct),
                right && (!left || after_punct),
            ),
            Self::TILDE if len > Self::MAX_TILDES => (false, false),
            _ => (left, right),
        };
        Flanking {
            can_open,
            can_close,
        }
    }

    /// Multiple-of-three rule: a run that can both open and close only pairs
    /// with another when their combined length is not a multiple of three,
    /// unless both lengths are.
    pub fn rule_of_three_blocks(opener: (usize, bool), closer: (usize, bool)) -> bool {
        let (o_len, o_both) = opener;
        let (c_len, c_both) = closer;
        (o_both || c_both) && (o_len + c_len) % 3 == 0 && !(o_len % 3 == 0 && c_len % 3 == 0)
    }
}

fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_punctuation()
    } else {
        !c.is_alphanumeric() && !c.is_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::start_of_word(None, Some('a'), true, false)]
    #[case::end_of_word(Some('a'), None, false, true)]
    #[case::intraword(Some('a'), Some('b'), true, true)]
    #[case::spaced(Some(' '), Some(' '), false, false)]
    #[case::before_punct(Some(' '), Some('('), true, false)]
    fn star_flanking(
        #[case] before: Option<char>,
        #[case] after: Option<char>,
        #[case] open: bool,
        #[case] close: bool,
    ) {
        let f = DelimiterRun::flanking(b'*', 1, before, after);
        assert_eq!((f.can_open, f.can_close), (open, close));
    }

    #[test]
    fn intraword_underscore_is_inert() {
        let f = DelimiterRun::flanking(b'_', 1, Some('a'), Some('b'));
        assert!(!f.can_open && !f.can_close);
    }

    #[test]
    fn long_tilde_run_is_text() {
        let f = DelimiterRun::flanking(b'~', 3, None, Some('a'));
        assert!(!f.can_open);
    }

    #[test]
    fn rule_of_three() {
        assert!(DelimiterRun::rule_of_three_blocks((1, true), (2, false)));
        assert!(!DelimiterRun::rule_of_three_blocks((3, true), (3, false)));
        assert!(!DelimiterRun::rule_of_three_blocks((1, false), (2, false)));
    }
}
