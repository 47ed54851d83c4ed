//! Positioned glyphs produced by the layout engine

use super::location::SourceLocation;
use ratatui::style::Style;

/// Position of a glyph inside the wrapped output, relative to the content origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualPosition {
    pub column: usize,
    pub row: usize,
}

/// A single renderable unit placed by the layout engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedGlyph {
    /// Where the character lives in the source buffer
    pub source: SourceLocation,
    /// Where the glyph is drawn, relative to the content origin
    pub visual: VisualPosition,
    /// Text drawn in the glyph's first column
    pub text: String,
    /// Number of display columns the glyph occupies (tabs, wide characters)
    pub width: usize,
    pub style: Style,
}

impl PositionedGlyph {
    /// First visual column after this glyph's footprint
    pub fn end_column(&self) -> usize {
        self.visual.column + self.width
    }
}

/// One wrapped display row; empty for blank source lines
pub type VisualRow = Vec<PositionedGlyph>;
