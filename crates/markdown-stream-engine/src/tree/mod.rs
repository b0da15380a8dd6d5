//! # Render Tree
//!
//! The output of one render pass.
//!
//! ## Modules
//!
//! - **`node`**: `Node`, the block/inline node enum
//! - **`parser`**: `MarkdownParser` and the `pulldown-cmark` implementation
//!
//! ## Sharing
//!
//! Each source block becomes one [`RenderBlock`] behind an `Arc`. Blocks in
//! the stable prefix are carried from pass to pass by reference; only the
//! open region is rebuilt. Transforms that leave a block alone keep its `Arc`.

pub mod node;
pub mod parser;

pub use node::{Alignment, Node};
pub use parser::{MarkdownParser, PulldownParser};

use std::sync::Arc;

use serde::Serialize;

use crate::{
    completion::CompletionPatch,
    error::Degradation,
    parsing::{blocks::BlockKind, inline::InlineSpan, rope::Span},
    render::Placement,
    sanitize::SanitizationDecision,
};

/// One source block, completed and parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderBlock {
    pub kind: BlockKind,
    pub span: Span,
    /// In the stable prefix: no later input can change this block.
    pub stable: bool,
    /// The block's terminator has arrived, possibly only tentatively.
    pub complete: bool,
    /// The text handed to the parser: the block's content plus any patches.
    pub source: String,
    pub patches: Vec<CompletionPatch>,
    /// Rendered as literal text while its shape is undecided.
    pub literal: bool,
    /// Inline constructs found while completing the block.
    pub spans: Vec<InlineSpan>,
    pub nodes: Vec<Node>,
}

/// Address of a node: block index, then child indices from the block's
/// top-level nodes down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeRef {
    pub block: usize,
    pub path: Vec<usize>,
}

impl NodeRef {
    pub fn new(block: usize, path: Vec<usize>) -> Self {
        Self { block, path }
    }

    /// Resolves the reference against `tree`.
    pub fn get<'t>(&self, tree: &'t RenderTree) -> Option<&'t Node> {
        let block = tree.blocks.get(self.block)?;
        let (first, rest) = self.path.split_first()?;
        let mut node = block.nodes.get(*first)?;
        for i in rest {
            node = node.children().get(*i)?;
        }
        Some(node)
    }
}

/// How the cache was used for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "blocks", rename_all = "kebab-case")]
pub enum CacheStatus {
    /// No usable cache; everything was scanned.
    #[default]
    Cold,
    /// This many stable blocks were reused.
    Resumed(usize),
    /// The text no longer extends the cached prefix.
    Invalidated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderTree {
    pub blocks: Vec<Arc<RenderBlock>>,
    pub decisions: Vec<SanitizationDecision>,
    pub placements: Vec<Placement>,
    pub diagnostics: Vec<Degradation>,
    pub cache_status: CacheStatus,
}

impl RenderTree {
    /// Visits every node depth-first, parents before children.
    pub fn walk(&self, mut f: impl FnMut(NodeRef, &Node)) {
        fn go(
            block: usize,
            path: &mut Vec<usize>,
            nodes: &[Node],
            f: &mut impl FnMut(NodeRef, &Node),
        ) {
            for (i, n) in nodes.iter().enumerate() {
                path.push(i);
                f(NodeRef::new(block, path.clone()), n);
                go(block, path, n.children(), f);
                path.pop();
            }
        }
        let mut path = vec![];
        for (b, block) in self.blocks.iter().enumerate() {
            go(b, &mut path, &block.nodes, &mut f);
        }
    }

    /// The whole completed document, as parsed.
    pub fn completed_text(&self) -> String {
        self.blocks.iter().map(|b| b.source.as_str()).collect()
    }

    pub fn patches(&self) -> impl Iterator<Item = &CompletionPatch> {
        self.blocks.iter().flat_map(|b| b.patches.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(nodes: Vec<Node>) -> Arc<RenderBlock> {
        Arc::new(RenderBlock {
            kind: BlockKind::Paragraph,
            span: Span::new(0, 0),
            stable: true,
            complete: true,
            source: String::new(),
            patches: vec![],
            literal: false,
            spans: vec![],
            nodes,
        })
    }

    #[test]
    fn tree_with_shared_blocks_serializes() {
        fn serializable<T: Serialize>(_: &T) {}
        let tree = RenderTree {
            blocks: vec![block(vec![Node::text("a")])],
            ..RenderTree::default()
        };
        serializable(&tree);

        let out = toml::to_string(&RenderTree::default()).unwrap();
        assert!(out.contains("status = \"cold\""), "{out}");
    }

    #[test]
    fn walk_and_get_agree() {
        let tree = RenderTree {
            blocks: vec![
                block(vec![Node::Paragraph {
                    children: vec![
                        Node::text("a"),
                        Node::Emphasis {
                            children: vec![Node::text("b")],
                        },
                    ],
                }]),
                block(vec![Node::ThematicBreak]),
            ],
            ..RenderTree::default()
        };

        let mut seen = vec![];
        tree.walk(|r, n| seen.push((r, n.name())));
        let names: Vec<_> = seen.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["paragraph", "text", "em", "text", "hr"]);

        for (r, name) in &seen {
            assert_eq!(r.get(&tree).map(Node::name), Some(*name));
        }
        assert_eq!(seen[3].0, NodeRef::new(0, vec![0, 1, 0]));
    }

    #[test]
    fn dangling_reference_resolves_to_none() {
        let tree = RenderTree::default();
        assert!(NodeRef::new(3, vec![0]).get(&tree).is_none());
        assert!(NodeRef::new(0, vec![]).get(&tree).is_none());
    }
}
