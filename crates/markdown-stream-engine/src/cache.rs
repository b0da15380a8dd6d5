//! # Stable Parse Cache
//!
//! Carries the rendered stable prefix of one stream from push to push.

use std::sync::Arc;

use log::debug;

use crate::{
    error::Degradation,
    tree::{CacheStatus, RenderBlock},
};

/// The stable prefix of the last render and the blocks rendered from it.
///
/// Opaque to callers: start from `StableCache::default()` and pass back the
/// cache each render returns.
#[derive(Debug, Clone, Default)]
pub struct StableCache {
    /// `text[..stable_end]` of the last render.
    prefix: String,
    blocks: Vec<Arc<RenderBlock>>,
}

/// Where a render picks up from a cache.
#[derive(Debug)]
pub(crate) struct Resume {
    pub from: usize,
    pub blocks: Vec<Arc<RenderBlock>>,
    pub status: CacheStatus,
    pub diagnostic: Option<Degradation>,
}

impl StableCache {
    pub fn stable_end(&self) -> usize {
        self.prefix.len()
    }

    pub fn blocks(&self) -> &[Arc<RenderBlock>] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Checks that `text` still starts with the cached prefix.
    pub(crate) fn resume(&self, text: &str) -> Resume {
        if self.blocks.is_empty() {
            return Resume {
                from: 0,
                blocks: vec![],
                status: CacheStatus::Cold,
                diagnostic: None,
            };
        }
        if text.starts_with(self.prefix.as_str()) {
            debug!(
                "Resuming at byte {} with {} cached blocks",
                self.prefix.len(),
                self.blocks.len()
            );
            return Resume {
                from: self.prefix.len(),
                blocks: self.blocks.clone(),
                status: CacheStatus::Resumed(self.blocks.len()),
                diagnostic: None,
            };
        }

        let at = self
            .prefix
            .bytes()
            .zip(text.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        debug!("Cache invalidated: text differs from cached prefix at byte {at}");
        Resume {
            from: 0,
            blocks: vec![],
            status: CacheStatus::Invalidated,
            diagnostic: Some(Degradation::CacheInvalidation { at }),
        }
    }

    /// The cache after a render of `text` whose stable prefix ends at
    /// `stable_end` and holds `blocks`.
    pub(crate) fn advance(
        mut self,
        text: &str,
        stable_end: usize,
        blocks: Vec<Arc<RenderBlock>>,
    ) -> Self {
        if text.starts_with(self.prefix.as_str()) && stable_end >= self.prefix.len() {
            let grown = text.get(self.prefix.len()..stable_end).unwrap_or_default();
            self.prefix.push_str(grown);
        } else {
            self.prefix = text.get(..stable_end).unwrap_or_default().to_string();
        }
        self.blocks = blocks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        parsing::{blocks::BlockKind, rope::Span},
        tree::RenderBlock,
    };

    fn cache(prefix: &str) -> StableCache {
        let block = Arc::new(RenderBlock {
            kind: BlockKind::Paragraph,
            span: Span::new(0, prefix.len()),
            stable: true,
            complete: true,
            source: prefix.to_string(),
            patches: vec![],
            literal: false,
            spans: vec![],
            nodes: vec![],
        });
        StableCache::default().advance(prefix, prefix.len(), vec![block])
    }

    #[test]
    fn empty_cache_is_cold() {
        let r = StableCache::default().resume("anything");
        assert_eq!((r.from, r.status), (0, CacheStatus::Cold));
    }

    #[test]
    fn appended_text_resumes() {
        let c = cache("para\n\n");
        let r = c.resume("para\n\nmore");
        assert_eq!(r.from, 6);
        assert_eq!(r.status, CacheStatus::Resumed(1));
        assert!(Arc::ptr_eq(&r.blocks[0], &c.blocks()[0]));
    }

    #[test]
    fn edited_prefix_invalidates() {
        let r = cache("para\n\n").resume("pare\n\nmore");
        assert_eq!(r.from, 0);
        assert!(r.blocks.is_empty());
        assert_eq!(r.status, CacheStatus::Invalidated);
        assert_eq!(r.diagnostic, Some(Degradation::CacheInvalidation { at: 3 }));
    }

    #[test]
    fn advance_only_appends_the_new_stable_text() {
        let c = cache("a\n\n").advance("a\n\nb\n\nc", 6, vec![]);
        assert_eq!(c.stable_end(), 6);
        assert_eq!(c.prefix, "a\n\nb\n\n");
    }
}
