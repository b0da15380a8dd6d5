use serde::Serialize;

use crate::tree::{Node, NodeRef, RenderTree};

/// What an external renderer has for a node right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "output", rename_all = "kebab-case")]
pub enum Rendering {
    /// Show the source as plain text.
    Plain,
    /// A result will come later; show a placeholder.
    Pending,
    /// Rendered output, to be used as is.
    Ready(String),
}

/// Highlights a code block. Called with whatever code has arrived so far.
pub trait SyntaxHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Rendering;
}

/// Renders diagram fences such as `mermaid`.
pub trait DiagramRenderer {
    fn handles(&self, language: &str) -> bool;
    fn render(&self, source: &str, language: &str) -> Rendering;
}

pub trait MathRenderer {
    fn render(&self, source: &str, display: bool) -> Rendering;
}

/// Renders nothing; everything shows as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl SyntaxHighlighter for PlainText {
    fn highlight(&self, _code: &str, _language: Option<&str>) -> Rendering {
        Rendering::Plain
    }
}

impl MathRenderer for PlainText {
    fn render(&self, _source: &str, _display: bool) -> Rendering {
        Rendering::Plain
    }
}

/// The external renderers an engine consults.
pub struct Renderers {
    pub highlighter: Box<dyn SyntaxHighlighter>,
    pub math: Box<dyn MathRenderer>,
    /// Without one, diagram fences are ordinary code blocks.
    pub diagram: Option<Box<dyn DiagramRenderer>>,
}

impl Default for Renderers {
    fn default() -> Self {
        Self {
            highlighter: Box::new(PlainText),
            math: Box::new(PlainText),
            diagram: None,
        }
    }
}

impl std::fmt::Debug for Renderers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderers")
            .field("diagram", &self.diagram.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementKind {
    Code,
    Diagram,
    Math,
}

/// An external rendering attached to a node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub node: NodeRef,
    pub kind: PlacementKind,
    pub rendering: Rendering,
}

impl Renderers {
    /// Asks the collaborators about every code, diagram and math node.
    ///
    /// Diagrams and math in a block that is still being written are
    /// `Pending` without asking; code is highlighted as it stands.
    pub fn place(&self, tree: &RenderTree) -> Vec<Placement> {
        let mut placements = vec![];
        tree.walk(|at, node| {
            let complete = tree.blocks.get(at.block).is_some_and(|b| b.complete);
            let placed = match node {
                Node::CodeBlock { language, code } => {
                    let diagram = language.as_deref().and_then(|lang| {
                        self.diagram
                            .as_ref()
                            .filter(|d| d.handles(lang))
                            .map(|d| (d, lang))
                    });
                    match diagram {
                        Some(_) if !complete => Some((PlacementKind::Diagram, Rendering::Pending)),
                        Some((d, lang)) => Some((PlacementKind::Diagram, d.render(code, lang))),
                        None => Some((
                            PlacementKind::Code,
                            self.highlighter.highlight(code, language.as_deref()),
                        )),
                    }
                }
                Node::MathBlock { source } | Node::DisplayMath { source } => {
                    Some((PlacementKind::Math, self.math_or_pending(source, true, complete)))
                }
                Node::InlineMath { source } => {
                    Some((PlacementKind::Math, self.math_or_pending(source, false, complete)))
                }
                _ => None,
            };
            if let Some((kind, rendering)) = placed {
                placements.push(Placement {
                    node: at,
                    kind,
                    rendering,
                });
            }
        });
        placements
    }

    fn math_or_pending(&self, source: &str, display: bool, complete: bool) -> Rendering {
        if complete {
            self.math.render(source, display)
        } else {
            Rendering::Pending
        }
    }
}
