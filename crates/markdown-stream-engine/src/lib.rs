//! Incremental completion and sanitization for markdown that arrives a few
//! characters at a time.
//!
//! Each render closes whatever the text so far leaves open, so the parsed
//! tree never shows broken syntax, then filters links, images and raw markup
//! through a [`SanitizationPolicy`]. Stable blocks are cached and reused
//! between renders of the same stream.

pub mod cache;
pub mod completion;
pub mod error;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod snapshot;
pub mod tree;

pub use cache::StableCache;
pub use completion::{CompletionPatch, PatchReason, apply_patches};
pub use error::{Degradation, Violation};
pub use pipeline::{DEFAULT_TRANSFORMS, Engine, Stream, Transform, complete_and_sanitize};
pub use render::{Placement, Renderers, Rendering, to_html};
pub use sanitize::{PrefixRule, SanitizationDecision, SanitizationPolicy};
pub use tree::{CacheStatus, MarkdownParser, Node, NodeRef, PulldownParser, RenderBlock, RenderTree};
