//! # Snapshot Testing Support
//!
//! Utilities for testing the engine via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders a `RenderTree` as a stable text outline for inline
//!   `insta` snapshots
//! - **`invariants`**: Runtime checks for scanner correctness (blocks tile the
//!   text, spans in bounds) and for monotonic stable prefixes across pushes

pub mod invariants;
pub mod outline;

pub use invariants::{check as invariants, check_stable_prefix};
pub use outline::outline;
