//! # Rendering
//!
//! - **`collaborators`**: the external renderer traits and the `Placement`s they produce
//! - **`html`**: `to_html()`, a reference serializer for a render tree

pub mod collaborators;
pub mod html;

pub use collaborators::{
    DiagramRenderer, MathRenderer, Placement, PlacementKind, PlainText, Renderers, Rendering,
    SyntaxHighlighter,
};
pub use html::to_html;
