use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use crate::tree::{Alignment, Node, NodeRef, RenderTree};

use super::collaborators::{Placement, Rendering};

/// Serializes a render tree to HTML.
///
/// Text and attribute values are escaped. Raw markup and `Ready` renderings
/// are written as they are: by this point the guard has already decided
/// what may pass. Consecutive list blocks of the same kind are joined into
/// one list.
pub fn to_html(tree: &RenderTree) -> String {
    let mut w = HtmlWriter {
        out: String::new(),
        placements: tree
            .placements
            .iter()
            .map(|p: &Placement| (&p.node, &p.rendering))
            .collect(),
        path: vec![],
    };

    let top: Vec<(usize, usize, &Node)> = tree
        .blocks
        .iter()
        .enumerate()
        .flat_map(|(b, block)| block.nodes.iter().enumerate().map(move |(i, n)| (b, i, n)))
        .collect();

    for (k, &(b, i, node)) in top.iter().enumerate() {
        w.path = vec![i];
        match node {
            Node::List { start, children } => {
                let joins_previous = k > 0 && same_list(top[k - 1].2, node);
                let joins_next = top.get(k + 1).is_some_and(|(_, _, n)| same_list(node, n));
                if !joins_previous {
                    w.list_open(*start);
                }
                w.children(b, children);
                if !joins_next {
                    w.list_close(*start);
                }
            }
            _ => w.node(b, node),
        }
    }
    w.out
}

fn same_list(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::List { start: x, .. }, Node::List { start: y, .. }) => x.is_some() == y.is_some(),
        _ => false,
    }
}

struct HtmlWriter<'t> {
    out: String,
    placements: HashMap<&'t NodeRef, &'t Rendering>,
    path: Vec<usize>,
}

impl<'t> HtmlWriter<'t> {
    fn rendering(&self, block: usize) -> Option<&'t Rendering> {
        let at = NodeRef::new(block, self.path.clone());
        self.placements.get(&at).copied()
    }

    fn text(&mut self, s: &str) {
        encode_text_to_string(s, &mut self.out);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        encode_double_quoted_attribute_to_string(value, &mut self.out);
        self.out.push('"');
    }

    fn children(&mut self, block: usize, children: &[Node]) {
        for (i, c) in children.iter().enumerate() {
            self.path.push(i);
            self.node(block, c);
            self.path.pop();
        }
    }

    fn wrap(&mut self, tag: &str, block: usize, children: &[Node]) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.children(block, children);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn list_open(&mut self, start: Option<u64>) {
        match start {
            None => self.out.push_str("<ul>\n"),
            Some(1) => self.out.push_str("<ol>\n"),
            Some(n) => self.out.push_str(&format!("<ol start=\"{n}\">\n")),
        }
    }

    fn list_close(&mut self, start: Option<u64>) {
        self.out.push_str(if start.is_some() { "</ol>\n" } else { "</ul>\n" });
    }

    fn node(&mut self, block: usize, node: &Node) {
        match node {
            Node::Paragraph { children } => {
                self.wrap("p", block, children);
                self.out.push('\n');
            }
            Node::Heading { level, children } => {
                self.wrap(&format!("h{level}"), block, children);
                self.out.push('\n');
            }
            Node::BlockQuote { children } => {
                self.out.push_str("<blockquote>\n");
                self.children(block, children);
                self.out.push_str("</blockquote>\n");
            }
            Node::List { start, children } => {
                self.list_open(*start);
                self.children(block, children);
                self.list_close(*start);
            }
            Node::ListItem { children } => {
                self.wrap("li", block, children);
                self.out.push('\n');
            }
            Node::CodeBlock { language, code } => match self.rendering(block) {
                Some(Rendering::Ready(html)) => self.out.push_str(html),
                pending => {
                    let pending = matches!(pending, Some(Rendering::Pending));
                    self.out.push_str("<pre");
                    if pending {
                        self.attr("class", "pending");
                    }
                    self.out.push_str("><code");
                    if let Some(lang) = language {
                        self.attr("class", &format!("language-{lang}"));
                    }
                    self.out.push('>');
                    self.text(code);
                    self.out.push_str("</code></pre>\n");
                }
            },
            Node::MathBlock { source } => self.math(block, source, "div", "math math-display"),
            Node::DisplayMath { source } => self.math(block, source, "span", "math math-display"),
            Node::InlineMath { source } => self.math(block, source, "span", "math math-inline"),
            Node::Table {
                alignments,
                children,
            } => {
                self.out.push_str("<table>\n");
                let mut body_open = false;
                for (i, row) in children.iter().enumerate() {
                    let Node::TableRow { header, children } = row else {
                        continue;
                    };
                    self.path.push(i);
                    if *header {
                        self.out.push_str("<thead>\n");
                    } else if !body_open {
                        self.out.push_str("<tbody>\n");
                        body_open = true;
                    }
                    self.row(block, *header, alignments, children);
                    if *header {
                        self.out.push_str("</thead>\n");
                    }
                    self.path.pop();
                }
                if body_open {
                    self.out.push_str("</tbody>\n");
                }
                self.out.push_str("</table>\n");
            }
            Node::TableRow { header, children } => self.row(block, *header, &[], children),
            Node::TableCell { children } => self.wrap("td", block, children),
            Node::ThematicBreak => self.out.push_str("<hr />\n"),
            Node::HtmlBlock { html } | Node::InlineHtml { html } => self.out.push_str(html),
            Node::Text { text } => self.text(text),
            Node::Code { code } => {
                self.out.push_str("<code>");
                self.text(code);
                self.out.push_str("</code>");
            }
            Node::Emphasis { children } => self.wrap("em", block, children),
            Node::Strong { children } => self.wrap("strong", block, children),
            Node::Strikethrough { children } => self.wrap("del", block, children),
            Node::Link {
                destination,
                title,
                children,
            } => {
                self.out.push_str("<a");
                self.attr("href", destination);
                if !title.is_empty() {
                    self.attr("title", title);
                }
                self.out.push('>');
                self.children(block, children);
                self.out.push_str("</a>");
            }
            Node::Image {
                destination,
                title,
                alt,
            } => {
                self.out.push_str("<img");
                self.attr("src", destination);
                self.attr("alt", alt);
                if !title.is_empty() {
                    self.attr("title", title);
                }
                self.out.push_str(" />");
            }
            Node::SoftBreak => self.out.push('\n'),
            Node::HardBreak => self.out.push_str("<br />\n"),
            Node::TaskMarker { checked } => {
                self.out.push_str("<input type=\"checkbox\" disabled=\"\"");
                if *checked {
                    self.out.push_str(" checked=\"\"");
                }
                self.out.push_str(" /> ");
            }
        }
    }

    fn row(&mut self, block: usize, header: bool, alignments: &[Alignment], cells: &[Node]) {
        let tag = if header { "th" } else { "td" };
        self.out.push_str("<tr>");
        for (i, cell) in cells.iter().enumerate() {
            self.path.push(i);
            self.out.push('<');
            self.out.push_str(tag);
            let align = match alignments.get(i) {
                Some(Alignment::Left) => Some("left"),
                Some(Alignment::Center) => Some("center"),
                Some(Alignment::Right) => Some("right"),
                _ => None,
            };
            if let Some(align) = align {
                self.attr("style", &format!("text-align: {align}"));
            }
            self.out.push('>');
            self.children(block, cell.children());
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push('>');
            self.path.pop();
        }
        self.out.push_str("</tr>\n");
    }

    fn math(&mut self, block: usize, source: &str, tag: &str, class: &str) {
        match self.rendering(block) {
            Some(Rendering::Ready(html)) => self.out.push_str(html),
            other => {
                let class = match other {
                    Some(Rendering::Pending) => format!("{class} pending"),
                    _ => class.to_string(),
                };
                self.out.push('<');
                self.out.push_str(tag);
                self.attr("class", &class);
                self.out.push('>');
                self.text(source);
                self.out.push_str("</");
                self.out.push_str(tag);
                self.out.push('>');
                if tag == "div" {
                    self.out.push('\n');
                }
            }
        }
    }
}
