//! # Inline Analysis
//!
//! Cursor-based scanning of inline content, used to decide which closers an
//! open block still needs.
//!
//! ## Architecture
//!
//! Inline scanning is separate from block scanning and runs over one block's
//! inline text at a time (paragraph text, heading text, a table cell).
//!
//! The scanner walks the text once:
//! - Code spans, autolinks and raw tags are raw zones; nothing inside them
//!   opens or closes anything
//! - `*`, `_` and `~` runs go on a delimiter stack and are paired the way
//!   CommonMark pairs them
//! - `[` and `![` go on a bracket stack; a label followed by `](` resolves
//!   its inner emphasis before the destination is read
//!
//! ## Modules
//!
//! - **`types`**: `InlineSpan`, `InlineKind`, `PendingClose`, `InlineScan`
//! - **`kinds`**: Delimiter-owning syntax types (CodeSpan, DelimiterRun, LinkSyntax, Autolink)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`parser`**: `scan_inline()` entry point
//!
//! ## What stays open
//!
//! A construct still open at the end of the text yields a closer when one
//! exists (`**`, a backtick run, `)` or `")`). When none does yet, as with
//! `[label](` or a half-typed `<https://`, scanning stops and the construct
//! renders literally.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::scan_inline;
pub use types::{InlineKind, InlineScan, InlineSpan, PendingClose};
