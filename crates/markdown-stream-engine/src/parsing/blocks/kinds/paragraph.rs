/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters. They are the default leaf block when no
/// other block opener matches, and the main target of inline completion.
pub struct Paragraph;

impl Paragraph {
    /// True when the paragraph text opens with raw HTML, which the parser
    /// treats as an HTML block and inline completion must leave alone.
    pub fn opens_html(text: &str) -> bool {
        let t = text.trim_start();
        let mut b = t.bytes();
        b.next() == Some(b'<') && matches!(b.next(), Some(c) if c.is_ascii_alphabetic() || c == b'/' || c == b'!')
    }
}
