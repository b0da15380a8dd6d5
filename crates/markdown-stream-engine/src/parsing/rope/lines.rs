use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line of the scanned region with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Absolute byte span of this line (includes the newline if present).
    pub span: Span,
    /// The line text including its line ending.
    pub text: String,
}

impl LineRef {
    /// A line is terminated once its newline has arrived. Only terminated
    /// lines may decide that a block is stable.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.text.ends_with('\n')
    }
}

/// Builds a rope over the part of `text` that still needs scanning.
///
/// `from` must be a char boundary; callers only ever pass a block boundary,
/// which is always a line start.
pub fn tail_rope(text: &str, from: usize) -> Rope {
    Rope::from(text.get(from..).unwrap_or(""))
}

/// Returns an iterator over lines with absolute byte spans.
///
/// `base` is the offset of the rope's first byte in the full source text.
/// Uses `lines_raw` to preserve newline characters, which keeps spans exact.
pub fn lines_with_spans(rope: &Rope, base: usize) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = base;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
