//! Core data model shared by the layout engine and the compositor

pub mod glyph;
pub mod location;

pub use glyph::{PositionedGlyph, VisualPosition, VisualRow};
pub use location::{CursorState, Selection, SourceLocation};
