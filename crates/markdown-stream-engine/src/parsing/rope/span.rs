use serde::Serialize;

/// A byte range `[start, end)` into the source text.
///
/// Offsets are absolute, so a span recorded against one update remains valid
/// for every later update that only appends text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span positioned at `at`.
    pub fn at(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `text` with this span, yielding `""` when the span is out of
    /// bounds or splits a character.
    #[must_use]
    pub fn slice(self, text: &str) -> &str {
        text.get(self.start..self.end).unwrap_or("")
    }

    /// Moves both ends by `by` bytes.
    #[must_use]
    pub fn shifted(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }

    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_in_bounds() {
        assert_eq!(Span::new(6, 11).slice("hello world"), "world");
    }

    #[test]
    fn slice_out_of_bounds_is_empty() {
        assert_eq!(Span::new(3, 40).slice("hello"), "");
    }

    #[test]
    fn slice_splitting_a_char_is_empty() {
        assert_eq!(Span::new(0, 1).slice("é"), "");
    }

    #[test]
    fn inverted_span_has_zero_len() {
        let sp = Span { start: 5, end: 2 };
        assert_eq!(sp.len(), 0);
        assert!(sp.is_empty());
    }

    #[test]
    fn contains_nested_span() {
        assert!(Span::new(0, 10).contains(Span::new(2, 10)));
        assert!(!Span::new(2, 10).contains(Span::new(0, 4)));
    }
}
