/// Truncates `s` to at most `max` bytes with a "..." suffix.
///
/// Cuts on a char boundary, so multi-byte text never panics. Used for
/// human-readable outlines and the replay viewer.
pub fn preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut out = s[..cut].to_string();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_exact_length_unchanged() {
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn preview_truncates_to_zero() {
        assert_eq!(preview("hello", 0), "...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "h...");
    }
}
