//! Panel geometry and per-panel view settings

use crate::config::EditorConfig;
use ratatui::layout::Rect;

/// Identifies a panel across renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PanelId(pub usize);

/// Display settings of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSettings {
    /// Show line numbers
    pub ruler: bool,
    /// Highlight the row holding the cursor
    pub cursor_line: bool,
    pub tab_size: usize,
    pub soft_wrap: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for PanelSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            ruler: config.line_numbers,
            cursor_line: config.highlight_current_line,
            tab_size: config.tab_size,
            soft_wrap: config.line_wrap,
        }
    }
}

/// One rectangular editing view
///
/// Owned by the window manager; the compositor only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub id: PanelId,
    /// Screen rectangle, gutter included
    pub area: Rect,
    /// Horizontal scroll offset in display columns
    pub left_column: usize,
    /// First source line shown
    pub top_line: usize,
    /// The panel is not the leftmost one and draws a divider on its left edge
    pub is_split: bool,
    pub settings: PanelSettings,
}

impl Panel {
    /// A panel at `area`; panels not starting at column 0 are splits
    pub fn new(id: PanelId, area: Rect, settings: PanelSettings) -> Self {
        Self {
            id,
            area,
            left_column: 0,
            top_line: 0,
            is_split: area.x != 0,
            settings,
        }
    }

    pub fn with_scroll(mut self, top_line: usize, left_column: usize) -> Self {
        self.top_line = top_line;
        self.left_column = left_column;
        self
    }

    /// Exclusive right edge in screen columns
    pub fn right(&self) -> u16 {
        self.area.right()
    }

    pub fn height(&self) -> usize {
        self.area.height as usize
    }
}
