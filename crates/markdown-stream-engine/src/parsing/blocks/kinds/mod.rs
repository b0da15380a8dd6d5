pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod math_fence;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, Fence, FenceKind};
pub use heading::{AtxHeading, SetextUnderline};
pub use list_item::{ListItem, ListItemMarker, ListMarker};
pub use math_fence::MathFence;
pub use paragraph::Paragraph;
pub use table::TableRow;
pub use thematic_break::ThematicBreak;

/// Block markers may be indented by at most this many spaces.
pub const MAX_MARKER_INDENT: usize = 3;

/// Counts leading indentation, treating a tab as four columns.
pub fn indent_width(s: &str) -> usize {
    let mut width = 0;
    for b in s.bytes() {
        match b {
            b' ' => width += 1,
            b'\t' => width += 4 - (width % 4),
            _ => break,
        }
    }
    width
}

/// Strips up to [`MAX_MARKER_INDENT`] leading spaces, returning `None` when the
/// line is indented further than a block marker may be.
pub fn strip_marker_indent(s: &str) -> Option<&str> {
    let spaces = s.bytes().take_while(|b| *b == b' ').count();
    if spaces > MAX_MARKER_INDENT || s[spaces..].starts_with('\t') {
        return None;
    }
    Some(&s[spaces..])
}

/// Strips up to `cols` columns of leading whitespace.
pub fn strip_columns(s: &str, cols: usize) -> &str {
    let mut width = 0;
    for (i, b) in s.bytes().enumerate() {
        if width >= cols {
            return &s[i..];
        }
        match b {
            b' ' => width += 1,
            b'\t' => width += 4 - (width % 4),
            _ => return &s[i..],
        }
    }
    ""
}
