use super::{indent_width, strip_marker_indent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMarker {
    Bullet(char),
    Ordered { start: u64, delimiter: char },
}

/// A recognised list item marker on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemMarker {
    pub marker: ListMarker,
    /// Column where the item's content begins; continuation lines indented at
    /// least this far belong to the item.
    pub content_indent: usize,
    /// The marker has nothing after it on its line.
    pub empty: bool,
}

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
    pub const ORDERED_DELIMITERS: [u8; 2] = [b'.', b')'];
    pub const MAX_ORDINAL_DIGITS: usize = 9;

    pub fn marker(line: &str) -> Option<ListItemMarker> {
        let line = line.trim_end_matches(['\r', '\n']);
        let t = strip_marker_indent(line)?;
        let lead = line.len() - t.len();
        let (marker, width) = Self::parse_marker(t)?;
        let rest = &t[width..];
        if rest.trim().is_empty() {
            return Some(ListItemMarker {
                marker,
                content_indent: lead + width + 1,
                empty: true,
            });
        }
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        let gap = indent_width(rest);
        // Five or more spaces means indented code inside the item: content
        // starts one column after the marker.
        let gap = if gap > 4 { 1 } else { gap };
        Some(ListItemMarker {
            marker,
            content_indent: lead + width + gap,
            empty: false,
        })
    }

    /// A marker with nothing after it, not even the separating space.
    pub fn is_bare_marker(line: &str) -> bool {
        let Some(t) = strip_marker_indent(line) else {
            return false;
        };
        matches!(Self::parse_marker(t), Some((_, width)) if width == t.len())
    }

    /// Only non-empty bullets and ordered items starting at 1 interrupt a paragraph.
    pub fn can_interrupt_paragraph(m: &ListItemMarker) -> bool {
        !m.empty
            && match m.marker {
                ListMarker::Bullet(_) => true,
                ListMarker::Ordered { start, .. } => start == 1,
            }
    }

    fn parse_marker(t: &str) -> Option<(ListMarker, usize)> {
        let b = t.as_bytes();
        let first = *b.first()?;
        if Self::BULLETS.contains(&first) {
            return Some((ListMarker::Bullet(char::from(first)), 1));
        }
        let digits = b.iter().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || digits > Self::MAX_ORDINAL_DIGITS {
            return None;
        }
        let delimiter = *b.get(digits)?;
        if !Self::ORDERED_DELIMITERS.contains(&delimiter) {
            return None;
        }
        let start = t[..digits].parse().ok()?;
        Some((
            ListMarker::Ordered {
                start,
                delimiter: char::from(delimiter),
            },
            digits + 1,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_marker() {
        let m = ListItem::marker("- item").unwrap();
        assert_eq!(m.marker, ListMarker::Bullet('-'));
        assert_eq!(m.content_indent, 2);
        assert!(!m.empty);
    }

    #[test]
    fn ordered_marker() {
        let m = ListItem::marker("12) twelve").unwrap();
        assert_eq!(
            m.marker,
            ListMarker::Ordered {
                start: 12,
                delimiter: ')'
            }
        );
        assert_eq!(m.content_indent, 4);
    }

    #[test]
    fn indented_marker_counts_lead() {
        let m = ListItem::marker("  * nested").unwrap();
        assert_eq!(m.content_indent, 4);
    }

    #[test]
    fn empty_item() {
        assert!(ListItem::marker("-").unwrap().empty);
        assert!(ListItem::marker("- ").unwrap().empty);
    }

    #[test]
    fn marker_needs_space() {
        assert_eq!(ListItem::marker("-item"), None);
        assert_eq!(ListItem::marker("1.5 apples"), None);
    }

    #[test]
    fn bare_markers() {
        assert!(ListItem::is_bare_marker("-"));
        assert!(ListItem::is_bare_marker("3."));
        assert!(!ListItem::is_bare_marker("- "));
        assert!(!ListItem::is_bare_marker("-a"));
    }

    #[test]
    fn interrupt_rules() {
        let bullet = ListItem::marker("- a").unwrap();
        let two = ListItem::marker("2. a").unwrap();
        let empty = ListItem::marker("-").unwrap();
        assert!(ListItem::can_interrupt_paragraph(&bullet));
        assert!(!ListItem::can_interrupt_paragraph(&two));
        assert!(!ListItem::can_interrupt_paragraph(&empty));
    }
}
