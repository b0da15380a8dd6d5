use serde::Serialize;

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// A node of the rendered document.
///
/// Block and inline nodes share one enum so a container can hold either.
/// Nodes own their text; nothing here borrows from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Paragraph {
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    BlockQuote {
        children: Vec<Node>,
    },
    List {
        /// First ordinal for an ordered list.
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    MathBlock {
        source: String,
    },
    Table {
        alignments: Vec<Alignment>,
        children: Vec<Node>,
    },
    TableRow {
        header: bool,
        children: Vec<Node>,
    },
    TableCell {
        children: Vec<Node>,
    },
    ThematicBreak,
    HtmlBlock {
        html: String,
    },

    Text {
        text: String,
    },
    Code {
        code: String,
    },
    Emphasis {
        children: Vec<Node>,
    },
    Strong {
        children: Vec<Node>,
    },
    Strikethrough {
        children: Vec<Node>,
    },
    Link {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        destination: String,
        title: String,
        alt: String,
    },
    InlineHtml {
        html: String,
    },
    InlineMath {
        source: String,
    },
    DisplayMath {
        source: String,
    },
    SoftBreak,
    HardBreak,
    TaskMarker {
        checked: bool,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Table { children, .. }
            | Node::TableRow { children, .. }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Table { children, .. }
            | Node::TableRow { children, .. }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Short name used in outlines and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BlockQuote { .. } => "blockquote",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "item",
            Node::CodeBlock { .. } => "code-block",
            Node::MathBlock { .. } => "math-block",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "row",
            Node::TableCell { .. } => "cell",
            Node::ThematicBreak => "hr",
            Node::HtmlBlock { .. } => "html-block",
            Node::Text { .. } => "text",
            Node::Code { .. } => "code",
            Node::Emphasis { .. } => "em",
            Node::Strong { .. } => "strong",
            Node::Strikethrough { .. } => "del",
            Node::Link { .. } => "link",
            Node::Image { .. } => "image",
            Node::InlineHtml { .. } => "inline-html",
            Node::InlineMath { .. } => "inline-math",
            Node::DisplayMath { .. } => "display-math",
            Node::SoftBreak => "softbreak",
            Node::HardBreak => "hardbreak",
            Node::TaskMarker { .. } => "task",
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            Node::Code { code } => out.push_str(code),
            Node::InlineMath { source } | Node::DisplayMath { source } => out.push_str(source),
            Node::Image { alt, .. } => out.push_str(alt),
            Node::SoftBreak | Node::HardBreak => out.push(' '),
            other => {
                for c in other.children() {
                    c.push_plain_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_flattens_inline_nodes() {
        let n = Node::Paragraph {
            children: vec![
                Node::text("a "),
                Node::Strong {
                    children: vec![Node::text("b")],
                },
                Node::SoftBreak,
                Node::Code { code: "c".into() },
            ],
        };
        assert_eq!(n.plain_text(), "a b c");
    }

    #[test]
    fn leaves_have_no_children() {
        let mut n = Node::text("x");
        assert!(n.children().is_empty());
        assert!(n.children_mut().is_none());
    }
}
