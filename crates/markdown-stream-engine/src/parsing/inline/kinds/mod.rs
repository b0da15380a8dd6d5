//! # Inline Kinds
//!
//! Inline constructs that own their delimiter bytes.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`DelimiterRun`**: `*`, `_` and `~` runs with their flanking rules
//! - **`LinkSyntax`**: `[`, `![`, `](` and the destination/title grammar
//! - **`Autolink`**: `<scheme:...>` and bare `http(s)://` / `www.` tokens
//!
//! The parser calls these; it never hardcodes a delimiter byte.

pub mod autolink;
pub mod code_span;
pub mod delimiter;
pub mod link;

pub use autolink::Autolink;
pub use code_span::CodeSpan;
pub use delimiter::{DelimiterRun, Flanking};
pub use link::{LinkSyntax, LinkTail};
