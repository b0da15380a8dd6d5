//! # Sanitization Guard
//!
//! Transforms that run over every render tree before it is returned.
//!
//! ## Modules
//!
//! - **`policy`**: `SanitizationPolicy` and its allow-lists
//! - **`decision`**: `decide()` for one destination, and the recorded `SanitizationDecision`
//! - **`guard`**: `guard_destinations()`, the rewriting walk over links and images
//! - **`markup`**: `guard_raw_markup()` for raw HTML
//!
//! ## Key Invariants
//!
//! - A script scheme or script-capable markup never survives, whatever the policy
//! - A wildcard allow-list never strips a well-formed http(s) destination
//! - Decisions are recomputed on every pass; nothing is cached between pushes

pub mod decision;
pub mod guard;
pub mod markup;
pub mod policy;

pub use decision::{
    DecisionReason, DestinationKind, Outcome, SanitizationDecision, Subject, Verdict, decide,
};
pub use guard::guard_destinations;
pub use markup::{can_run_script, guard_raw_markup, judge_markup};
pub use policy::{PrefixRule, SanitizationPolicy};

#[cfg(test)]
pub(crate) fn tree_of(blocks: Vec<Vec<crate::tree::Node>>) -> crate::tree::RenderTree {
    use std::sync::Arc;

    use crate::{
        parsing::{blocks::BlockKind, rope::Span},
        tree::{RenderBlock, RenderTree},
    };

    RenderTree {
        blocks: blocks
            .into_iter()
            .map(|nodes| {
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
            })
            .collect(),
        ..RenderTree::default()
    }
}
