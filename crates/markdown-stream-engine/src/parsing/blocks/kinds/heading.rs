use super::strip_marker_indent;

/// ATX heading (`#` through `######`).
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns the level when `line` is a `#` run followed by a space.
    ///
    /// A run with nothing after it is not a heading yet: while streaming,
    /// `#` may still become `#tag` or `##`.
    pub fn level(line: &str) -> Option<u8> {
        let t = strip_marker_indent(line.trim_end_matches(['\r', '\n']))?;
        let run = t.bytes().take_while(|b| *b == Self::MARKER).count();
        if run == 0 || run > Self::MAX_LEVEL {
            return None;
        }
        matches!(t.as_bytes().get(run), Some(b' ' | b'\t')).then_some(run as u8)
    }

    /// True for a bare `#` run with no space after it yet.
    pub fn is_bare_marker(line: &str) -> bool {
        let Some(t) = strip_marker_indent(line) else {
            return false;
        };
        let run = t.bytes().take_while(|b| *b == Self::MARKER).count();
        run > 0 && run <= Self::MAX_LEVEL && run == t.len()
    }

    /// Byte offset of the heading text within `line`.
    pub fn content_offset(line: &str) -> usize {
        let lead = line.len() - line.trim_start_matches(' ').len();
        let run = line[lead..]
            .bytes()
            .take_while(|b| *b == Self::MARKER)
            .count();
        let gap = line[lead + run..]
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        lead + run + gap
    }
}

/// Setext underline (`===` or `---`) turning the paragraph above into a heading.
pub struct SetextUnderline;

impl SetextUnderline {
    pub fn level(line: &str) -> Option<u8> {
        let t = strip_marker_indent(line.trim_end())?;
        let first = *t.as_bytes().first()?;
        let level = match first {
            b'=' => 1,
            b'-' => 2,
            _ => return None,
        };
        t.bytes().all(|b| b == first).then_some(level)
    }
}
