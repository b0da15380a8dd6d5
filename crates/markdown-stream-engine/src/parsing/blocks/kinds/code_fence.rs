use super::strip_marker_indent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn as_byte(self) -> u8 {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICK,
            FenceKind::Tildes => CodeFence::TILDE,
        }
    }
}

/// An opening fence: its character and run length.
///
/// A closing fence must use the same character with at least `len` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fence {
    pub kind: FenceKind,
    pub len: usize,
}

impl Fence {
    /// The minimal closing fence for this opener.
    pub fn closer(self) -> String {
        char::from(self.kind.as_byte()).to_string().repeat(self.len)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEN: usize = 3;

    /// Recognises an opening fence, returning it with its trimmed info string.
    pub fn open(line: &str) -> Option<(Fence, &str)> {
        let t = strip_marker_indent(line.trim_end_matches(['\r', '\n']))?;
        let first = *t.as_bytes().first()?;
        let kind = match first {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.bytes().take_while(|b| *b == first).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = t[len..].trim();
        // Backtick fences cannot carry backticks in the info string.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some((Fence { kind, len }, info))
    }

    /// True when `line` closes a block opened by `fence`.
    pub fn closes(fence: Fence, line: &str) -> bool {
        let Some(t) = strip_marker_indent(line.trim_end_matches(['\r', '\n'])) else {
            return false;
        };
        let ch = fence.kind.as_byte();
        let run = t.bytes().take_while(|b| *b == ch).count();
        run >= fence.len && t[run..].trim().is_empty()
    }

    /// Counts the fence characters on a line that is part way to closing
    /// `fence`: only fence characters, but fewer than the opener had.
    pub fn partial_closer(fence: Fence, line: &str) -> Option<usize> {
        let t = strip_marker_indent(line)?;
        let ch = fence.kind.as_byte();
        let run = t.bytes().take_while(|b| *b == ch).count();
        (run > 0 && run < fence.len && run == t.len()).then_some(run)
    }

    /// The language tag is the first word of the info string.
    pub fn language(info: &str) -> Option<&str> {
        info.split_whitespace().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKS3: Fence = Fence {
        kind: FenceKind::Backticks,
        len: 3,
    };

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(CodeFence::open("```rust"), Some((TICKS3, "rust")));
    }

    #[test]
    fn detect_long_tilde_fence() {
        let (fence, info) = CodeFence::open("~~~~").unwrap();
        assert_eq!(fence.kind, FenceKind::Tildes);
        assert_eq!(fence.len, 4);
        assert_eq!(info, "");
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``"), None);
        assert_eq!(CodeFence::open("    ```"), None);
    }

    #[test]
    fn backtick_info_rejects_backticks() {
        assert_eq!(CodeFence::open("``` a`b"), None);
    }

    #[test]
    fn closes_matching_fence() {
        assert!(CodeFence::closes(TICKS3, "```"));
        assert!(CodeFence::closes(TICKS3, "`````  \n"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(!CodeFence::closes(TICKS3, "~~~"));
        assert!(!CodeFence::closes(TICKS3, "``"));
        assert!(!CodeFence::closes(TICKS3, "```js"));
    }

    #[test]
    fn partial_closer_counts_run() {
        assert_eq!(CodeFence::partial_closer(TICKS3, "``"), Some(2));
        assert_eq!(CodeFence::partial_closer(TICKS3, "`x"), None);
        assert_eq!(CodeFence::partial_closer(TICKS3, "```"), None);
    }

    #[test]
    fn closer_repeats_fence_char() {
        let fence = Fence {
            kind: FenceKind::Tildes,
            len: 4,
        };
        assert_eq!(fence.closer(), "~~~~");
    }

    #[test]
    fn language_is_first_word() {
        assert_eq!(CodeFence::language("js title=x"), Some("js"));
        assert_eq!(CodeFence::language(""), None);
    }
}
