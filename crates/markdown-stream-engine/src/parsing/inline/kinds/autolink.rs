/// Autolinks (`<https://x>`, `<a@b.c>`), bare URLs, and the raw HTML tags
/// that share the `<` opener.
pub struct Autolink;

/// What a `<` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    /// A complete autolink ending just before this offset.
    Autolink { end: usize },
    /// A complete inline HTML tag ending just before this offset.
    Tag { end: usize },
    /// The text ends inside something that looks like an autolink.
    PartialAutolink,
    /// The text ends inside an HTML tag.
    PartialTag,
    /// A plain `<`.
    Text,
}

impl Autolink {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    pub const BARE_PREFIXES: [&'static str; 3] = ["https://", "http://", "www."];
    const MAX_SCHEME: usize = 32;

    /// Classifies the `<` at `at`.
    pub fn angle(s: &str, at: usize) -> Angle {
        let rest = &s[at + 1..];
        let stop = rest.find(|c: char| c == '>' || c == '<' || c.is_whitespace());
        match stop {
            Some(j) if rest.as_bytes()[j] == Self::CLOSE => {
                let inner = &rest[..j];
                if is_uri(inner) || is_email(inner) {
                    return Angle::Autolink { end: at + 1 + j + 1 };
                }
            }
            None if looks_like_autolink(rest) => return Angle::PartialAutolink,
            _ => {}
        }

        if !starts_tag(rest) {
            return Angle::Text;
        }
        match rest.find('>') {
            Some(j) => Angle::Tag { end: at + 1 + j + 1 },
            None => Angle::PartialTag,
        }
    }

    /// Length of a bare URL token starting at `at`, when one starts there.
    pub fn bare_len(s: &str, at: usize) -> Option<usize> {
        let rest = &s[at..];
        if !Self::BARE_PREFIXES.iter().any(|p| rest.starts_with(p)) {
            return None;
        }
        Some(rest.find(char::is_whitespace).unwrap_or(rest.len()))
    }
}

fn scheme_len(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if !b.first()?.is_ascii_alphabetic() {
        return None;
    }
    let n = b
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'.' | b'-'))
        .count();
    (2..=Autolink::MAX_SCHEME).contains(&n).then_some(n)
}

fn is_uri(s: &str) -> bool {
    scheme_len(s).is_some_and(|n| {
        s.as_bytes().get(n) == Some(&b':') && !s[n..].bytes().any(|c| c.is_ascii_control())
    })
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((user, host)) => {
            !user.is_empty()
                && !host.is_empty()
                && !host.contains('@')
                && host.contains('.')
                && !s.contains('\\')
        }
        None => false,
    }
}

fn looks_like_autolink(s: &str) -> bool {
    !s.is_empty() && (scheme_len(s).is_some_and(|n| s.as_bytes().get(n) == Some(&b':')) || s.contains('@'))
}

fn starts_tag(s: &str) -> bool {
    matches!(s.as_bytes().first(), Some(c) if c.is_ascii_alphabetic() || matches!(c, b'/' | b'!' | b'?'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::uri("<https://x.y> z", Angle::Autolink { end: 13 })]
    #[case::email("<me@x.org>", Angle::Autolink { end: 10 })]
    #[case::tag("<span class=\"a\">", Angle::Tag { end: 16 })]
    #[case::partial_uri("<https://exam", Angle::PartialAutolink)]
    #[case::partial_tag("<span cla", Angle::PartialTag)]
    #[case::less_than("a < b", Angle::Text)]
    fn angles(#[case] s: &str, #[case] expected: Angle) {
        let at = s.find('<').unwrap();
        assert_eq!(Autolink::angle(s, at), expected);
    }

    #[test]
    fn bare_url_runs_to_whitespace() {
        assert_eq!(Autolink::bare_len("https://a.b/c d", 0), Some(13));
        assert_eq!(Autolink::bare_len("www.x", 0), Some(5));
        assert_eq!(Autolink::bare_len("ftp://x", 0), None);
    }
}
