/// Inline link and image syntax: `[label](dest "title")`, `![alt](dest)`.
pub struct LinkSyntax;

/// How the text after a link's `](` ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTail {
    /// A full destination; the offset is just past the closing `)`.
    Closed(usize),
    /// Not an inline link. The `]` is literal and scanning resumes at `(`.
    Invalid,
    /// The text ends inside a usable destination or title. Appending
    /// `closer` finishes the link.
    Open { closer: String },
    /// The text ends somewhere no closer can fix yet, such as `](` with
    /// nothing after it.
    Uncompletable,
}

impl LinkSyntax {
    pub const OPEN: u8 = b'[';
    pub const IMAGE: &'static [u8; 2] = b"![";
    pub const CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';

    /// Reads the destination and optional title starting at `at`, the
    /// offset just past `(`.
    pub fn tail(s: &str, at: usize) -> LinkTail {
        let b = s.as_bytes();
        let mut i = skip_ws(b, at);
        if i >= b.len() {
            return LinkTail::Uncompletable;
        }

        if b[i] == b'<' {
            i += 1;
            loop {
                match b.get(i) {
                    None => return LinkTail::Uncompletable,
                    Some(b'>') => {
                        i += 1;
                        break;
                    }
                    Some(b'<' | b'\n' | b'\r') => return LinkTail::Invalid,
                    Some(b'\\') if i + 1 >= b.len() => return LinkTail::Uncompletable,
                    Some(b'\\') => i += 2,
                    Some(_) => i += 1,
                }
            }
        } else {
            let mut depth = 0usize;
            while i < b.len() {
                match b[i] {
                    b'\\' if i + 1 >= b.len() => return LinkTail::Uncompletable,
                    b'\\' => i += 2,
                    Self::DEST_OPEN => {
                        depth += 1;
                        i += 1;
                    }
                    Self::DEST_CLOSE if depth == 0 => break,
                    Self::DEST_CLOSE => {
                        depth -= 1;
                        i += 1;
                    }
                    b' ' | b'\t' | b'\n' | b'\r' => break,
                    c if c.is_ascii_control() => return LinkTail::Invalid,
                    _ => i += 1,
                }
            }
            if i >= b.len() {
                return LinkTail::Open {
                    closer: ")".repeat(depth + 1),
                };
            }
            if b[i] == Self::DEST_CLOSE {
                return LinkTail::Closed(i + 1);
            }
            if depth > 0 {
                return LinkTail::Invalid;
            }
        }

        i = skip_ws(b, i);
        let quote = match b.get(i) {
            None => {
                return LinkTail::Open {
                    closer: ")".to_string(),
                };
            }
            Some(&Self::DEST_CLOSE) => return LinkTail::Closed(i + 1),
            Some(&q @ (b'"' | b'\'')) => q,
            Some(&Self::DEST_OPEN) => Self::DEST_CLOSE,
            Some(_) => return LinkTail::Invalid,
        };

        i += 1;
        loop {
            match b.get(i) {
                None => {
                    return LinkTail::Open {
                        closer: format!("{})", quote as char),
                    };
                }
                Some(b'\\') if i + 1 >= b.len() => return LinkTail::Uncompletable,
                Some(b'\\') => i += 2,
                Some(&c) if c == quote => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
            }
        }

        i = skip_ws(b, i);
        match b.get(i) {
            None => LinkTail::Open {
                closer: ")".to_string(),
            },
            Some(&Self::DEST_CLOSE) => LinkTail::Closed(i + 1),
            Some(_) => LinkTail::Invalid,
        }
    }
}

fn skip_ws(b: &[u8], mut i: usize) -> usize {
    while matches!(b.get(i), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        i += 1;
    }
    i
}
