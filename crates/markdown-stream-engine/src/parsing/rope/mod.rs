pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, lines_with_spans, tail_rope};
pub use slice::preview;
pub use span::Span;
