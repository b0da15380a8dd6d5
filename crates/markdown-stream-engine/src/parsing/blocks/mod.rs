//! # Block Scanning
//!
//! Two-phase block scanning over the part of the source that is not yet stable.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a `LineClass`
//!    holding local facts (indent, opener, setext underline, table row shape)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine emits `Block`s
//!    as they close, marking each one complete only when a terminated line closed it
//!
//! ## Modules
//!
//! - **`types`**: `Block` and `BlockKind`
//! - **`kinds`**: block-specific syntax with owned delimiters (CodeFence, MathFence,
//!   AtxHeading, ListItem, TableRow, BlockQuote, ThematicBreak, Paragraph)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//! - **`content`**: `ContentView` projecting container blocks to their inner markdown
//!
//! ## Key Invariants
//!
//! - Block spans tile the scanned text in order
//! - Fenced blocks are raw zones: nothing inside them opens a block
//! - Only terminated lines decide that a block is complete

pub mod builder;
pub mod classify;
pub mod content;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use content::{ContentLine, ContentView};
pub use types::{Block, BlockKind};
