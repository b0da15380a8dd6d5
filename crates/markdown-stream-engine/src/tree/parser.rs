use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::parsing::blocks::kinds::CodeFence;

use super::node::{Alignment, Node};

/// Turns (completed) markdown into nodes.
///
/// The engine calls this once per block, with only that block's text.
pub trait MarkdownParser {
    fn parse(&self, text: &str) -> Vec<Node>;
}

/// [`MarkdownParser`] backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy)]
pub struct PulldownParser {
    options: Options,
}

impl Default for PulldownParser {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_MATH,
        }
    }
}

impl PulldownParser {
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl MarkdownParser for PulldownParser {
    fn parse(&self, text: &str) -> Vec<Node> {
        let mut builder = TreeBuilder::default();
        for event in Parser::new_ext(text, self.options) {
            builder.event(event);
        }
        builder.finish()
    }
}

/// An element whose children are still being collected.
#[derive(Debug)]
enum Frame {
    Paragraph,
    Heading(u8),
    BlockQuote,
    List(Option<u64>),
    Item,
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    HtmlBlock(String),
    Table(Vec<Alignment>),
    TableRow {
        header: bool,
    },
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link {
        destination: String,
        title: String,
    },
    Image {
        destination: String,
        title: String,
    },
    /// A tag the tree has no node for; its children go to the parent.
    Transparent,
}

/// Builds a node tree from a balanced event stream.
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<(Frame, Vec<Node>)>,
    root: Vec<Node>,
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => {
                let frame = Self::frame(tag);
                self.stack.push((frame, vec![]));
            }
            Event::End(_) => self.close(),
            Event::Text(text) => match self.stack.last_mut() {
                Some((Frame::CodeBlock { code, .. }, _)) => code.push_str(&text),
                _ => self.push_text(&text),
            },
            Event::Code(code) => self.push(Node::Code {
                code: code.into_string(),
            }),
            Event::InlineMath(source) => self.push(Node::InlineMath {
                source: source.into_string(),
            }),
            Event::DisplayMath(source) => self.push(Node::DisplayMath {
                source: source.into_string(),
            }),
            Event::Html(html) => match self.stack.last_mut() {
                Some((Frame::HtmlBlock(buf), _)) => buf.push_str(&html),
                _ => self.push(Node::HtmlBlock {
                    html: html.into_string(),
                }),
            },
            Event::InlineHtml(html) => self.push(Node::InlineHtml {
                html: html.into_string(),
            }),
            Event::FootnoteReference(label) => self.push_text(&format!("[^{label}]")),
            Event::SoftBreak => self.push(Node::SoftBreak),
            Event::HardBreak => self.push(Node::HardBreak),
            Event::Rule => self.push(Node::ThematicBreak),
            Event::TaskListMarker(checked) => self.push(Node::TaskMarker { checked }),
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    fn frame(tag: Tag<'_>) -> Frame {
        match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(heading_level(level)),
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => CodeFence::language(&info).map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock(String::new()),
            Tag::List(start) => Frame::List(start),
            Tag::Item => Frame::Item,
            Tag::Table(alignments) => Frame::Table(alignments.into_iter().map(alignment).collect()),
            Tag::TableHead => Frame::TableRow { header: true },
            Tag::TableRow => Frame::TableRow { header: false },
            Tag::TableCell => Frame::TableCell,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            _ => Frame::Transparent,
        }
    }

    fn close(&mut self) {
        let Some((frame, children)) = self.stack.pop() else {
            return;
        };
        let node = match frame {
            Frame::Paragraph => Node::Paragraph { children },
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::BlockQuote => Node::BlockQuote { children },
            Frame::List(start) => Node::List { start, children },
            Frame::Item => Node::ListItem { children },
            Frame::CodeBlock { language, code } => Node::CodeBlock { language, code },
            Frame::HtmlBlock(html) => Node::HtmlBlock { html },
            Frame::Table(alignments) => Node::Table {
                alignments,
                children,
            },
            Frame::TableRow { header } => Node::TableRow { header, children },
            Frame::TableCell => Node::TableCell { children },
            Frame::Emphasis => Node::Emphasis { children },
            Frame::Strong => Node::Strong { children },
            Frame::Strikethrough => Node::Strikethrough { children },
            Frame::Link { destination, title } => Node::Link {
                destination,
                title,
                children,
            },
            Frame::Image { destination, title } => Node::Image {
                destination,
                title,
                alt: children.iter().map(Node::plain_text).collect(),
            },
            Frame::Transparent => {
                for child in children {
                    self.push(child);
                }
                return;
            }
        };
        self.push(node);
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.root.push(node),
        }
    }

    /// Adjacent text events are merged so one run of text is one node.
    fn push_text(&mut self, text: &str) {
        let siblings = match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        };
        match siblings.last_mut() {
            Some(Node::Text { text: prev }) => prev.push_str(text),
            _ => siblings.push(Node::text(text)),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.close();
        }
        self.root
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn alignment(a: pulldown_cmark::Alignment) -> Alignment {
    match a {
        pulldown_cmark::Alignment::None => Alignment::None,
        pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}
