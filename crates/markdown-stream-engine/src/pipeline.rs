//! # Pipeline
//!
//! One render pass: resume from the cache, scan, complete the trailing
//! block, parse, run the transforms, place external renderings.

use std::sync::Arc;

use crate::{
    cache::StableCache,
    completion::{BlockCompletion, CompletionPatch, apply_patches, complete_block},
    parsing::{
        blocks::{Block, BlockKind, kinds::MathFence},
        scan,
    },
    render::Renderers,
    sanitize::{SanitizationPolicy, guard_destinations, guard_raw_markup},
    tree::{MarkdownParser, Node, PulldownParser, RenderBlock, RenderTree},
};

/// A pass over the whole tree, run after parsing.
pub type Transform = fn(RenderTree, &SanitizationPolicy) -> RenderTree;

/// Raw markup first, so destinations inside markup turned to text are not
/// judged as links.
pub const DEFAULT_TRANSFORMS: &[Transform] = &[guard_raw_markup, guard_destinations];

/// A parser, the transforms and the external renderers.
pub struct Engine {
    parser: Box<dyn MarkdownParser>,
    transforms: Vec<Transform>,
    renderers: Renderers,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(PulldownParser::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("transforms", &self.transforms.len())
            .field("renderers", &self.renderers)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(parser: impl MarkdownParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            transforms: DEFAULT_TRANSFORMS.to_vec(),
            renderers: Renderers::default(),
        }
    }

    pub fn with_transforms(mut self, transforms: Vec<Transform>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_renderers(mut self, renderers: Renderers) -> Self {
        self.renderers = renderers;
        self
    }

    /// Renders `text`, reusing whatever of `cache` still applies.
    pub fn render(
        &self,
        text: &str,
        cache: StableCache,
        policy: &SanitizationPolicy,
    ) -> (RenderTree, StableCache) {
        let resume = cache.resume(text);
        let scan = scan(text, resume.from);

        let mut diagnostics: Vec<_> = resume.diagnostic.into_iter().collect();
        let mut blocks = resume.blocks;
        let last = scan.blocks.len().saturating_sub(1);
        for (i, block) in scan.blocks.iter().enumerate() {
            let stable = block.complete && block.span.end <= scan.stable_end;
            // Only the block at the end of the text is completed; one closed
            // tentatively by an unterminated line renders as it stands.
            let completion = if i == last {
                complete_block(text, block)
            } else {
                BlockCompletion::default()
            };
            diagnostics.extend(completion.diagnostics.iter().cloned());
            blocks.push(Arc::new(self.render_block(text, block, stable, completion)));
        }

        let n_stable = blocks.iter().take_while(|b| b.stable).count();
        let cache = cache.advance(text, scan.stable_end, blocks[..n_stable].to_vec());

        let mut tree = RenderTree {
            blocks,
            diagnostics,
            cache_status: resume.status,
            ..RenderTree::default()
        };
        for transform in &self.transforms {
            tree = transform(tree, policy);
        }
        tree.placements = self.renderers.place(&tree);
        (tree, cache)
    }

    fn render_block(
        &self,
        text: &str,
        block: &Block,
        stable: bool,
        completion: BlockCompletion,
    ) -> RenderBlock {
        let base = block.span.start;
        let raw = block.span.slice(text);
        let (source, nodes) = if completion.literal {
            let content = block.content.slice(text).trim_end();
            let nodes = if content.is_empty() {
                vec![]
            } else {
                vec![Node::Paragraph {
                    children: vec![Node::text(content)],
                }]
            };
            (raw.to_string(), nodes)
        } else {
            let local: Vec<_> = completion
                .patches
                .iter()
                .filter_map(|p| {
                    Some(CompletionPatch::new(
                        p.offset.checked_sub(base)?,
                        p.inserted_text.clone(),
                        p.reason,
                    ))
                })
                .collect();
            let source = apply_patches(raw, &local);
            let nodes = match block.kind {
                BlockKind::FencedMath { .. } => vec![Node::MathBlock {
                    source: math_body(&source),
                }],
                _ => self.parser.parse(&source),
            };
            (source, nodes)
        };

        RenderBlock {
            kind: block.kind.clone(),
            span: block.span,
            stable,
            complete: block.complete,
            source,
            patches: completion.patches,
            literal: completion.literal,
            spans: completion.spans,
            nodes,
        }
    }
}

/// The text between a math block's `$$` delimiters.
fn math_body(source: &str) -> String {
    let t = source.trim();
    let inner = t.strip_prefix(MathFence::DELIM).unwrap_or(t);
    let inner = inner.strip_suffix(MathFence::DELIM).unwrap_or(inner);
    inner.trim().to_string()
}

/// One stream: its engine, policy, the text so far and the cache.
#[derive(Debug, Default)]
pub struct Stream {
    engine: Engine,
    policy: SanitizationPolicy,
    text: String,
    cache: StableCache,
}

impl Stream {
    pub fn new(engine: Engine, policy: SanitizationPolicy) -> Self {
        Self {
            engine,
            policy,
            text: String::new(),
            cache: StableCache::default(),
        }
    }

    /// Appends `chunk` and renders the text so far.
    pub fn push(&mut self, chunk: &str) -> RenderTree {
        self.text.push_str(chunk);
        let cache = std::mem::take(&mut self.cache);
        let (tree, cache) = self.engine.render(&self.text, cache, &self.policy);
        self.cache = cache;
        tree
    }

    /// Replaces the text so far and renders it. An edit that does not
    /// extend the previous text invalidates the cache.
    pub fn replace(&mut self, text: &str) -> RenderTree {
        self.text.clear();
        self.push(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn policy(&self) -> &SanitizationPolicy {
        &self.policy
    }

    pub fn cache(&self) -> &StableCache {
        &self.cache
    }
}

/// Renders `source_text` with the default engine.
///
/// Pass `StableCache::default()` on the first call and the returned cache on
/// each later one.
pub fn complete_and_sanitize(
    source_text: &str,
    previous_cache: StableCache,
    policy: &SanitizationPolicy,
) -> (RenderTree, StableCache) {
    Engine::default().render(source_text, previous_cache, policy)
}
