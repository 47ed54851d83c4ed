//! Row layout pipeline
//!
//! This module turns source lines into positioned display rows:
//!
//! ```text
//! LineSource
//!     ↓ LayoutEngine::layout()
//! Vec<VisualRow>  (tabs expanded, soft-wrapped or horizontally scrolled)
//!     ↓ classify_rows()
//! Vec<RowTag>     (owning source line and continuation flag per row)
//!     ↓ SplitRenderer
//! Display cells
//! ```
//!
//! Every glyph keeps its source location, so rendering decisions (line
//! numbers, selection, cursor) are made from source positions, never
//! reconstructed from the flattened display text.

use crate::buffer::LineSource;
use crate::model::{PositionedGlyph, SourceLocation, VisualPosition, VisualRow};
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// What the compositor asks the layout engine for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRequest {
    /// First source line to lay out
    pub top_line: usize,
    /// Maximum number of rows to produce (the panel height)
    pub max_rows: usize,
    /// Horizontal scroll offset in display columns (ignored when wrapping)
    pub left_column: usize,
    /// Display columns available for content, excluding the gutter
    pub width: usize,
    pub tab_size: usize,
    /// Style given to every glyph before overlays
    pub base_style: Style,
}

/// Converts a range of source lines into wrapped rows of positioned glyphs
pub trait LayoutEngine {
    fn layout(&self, buffer: &dyn LineSource, request: &LayoutRequest) -> Vec<VisualRow>;
}

/// Expand a tab to the next tab stop based on the current column
pub fn tab_expansion_width(col: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    tab_size - (col % tab_size)
}

/// Control characters other than tab have no glyph of their own
fn is_unprintable(ch: char) -> bool {
    ch != '\t' && ch.is_control()
}

/// Display text and footprint of one source character at `col`
fn glyph_for(ch: char, col: usize, tab_size: usize) -> (String, usize) {
    if ch == '\t' {
        return (" ".to_string(), tab_expansion_width(col, tab_size));
    }
    if is_unprintable(ch) {
        return (char::REPLACEMENT_CHARACTER.to_string(), 1);
    }
    // Zero-width characters still get a cell so every source column stays addressable
    let width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
    (ch.to_string(), width)
}

/// Layout engine used by the editor: soft-wraps long lines, or scrolls them
/// horizontally when wrapping is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappingLayout {
    pub soft_wrap: bool,
}

impl WrappingLayout {
    pub fn new(soft_wrap: bool) -> Self {
        Self { soft_wrap }
    }

    /// Lay out one source line, starting new rows whenever a glyph does not fit
    fn wrap_line(&self, text: &str, line: usize, request: &LayoutRequest, rows: &mut Vec<VisualRow>) {
        let mut row: VisualRow = Vec::new();
        let mut row_col = 0usize;
        let mut line_col = 0usize;

        for (column, ch) in text.chars().enumerate() {
            let (display, full_width) = glyph_for(ch, line_col, request.tab_size);
            // A glyph wider than the whole panel is clipped to one full row
            let width = full_width.min(request.width);

            if row_col + width > request.width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                if rows.len() >= request.max_rows {
                    return;
                }
                row_col = 0;
            }

            row.push(PositionedGlyph {
                source: SourceLocation::new(column, line),
                visual: VisualPosition {
                    column: row_col,
                    row: rows.len(),
                },
                text: display,
                width,
                style: request.base_style,
            });
            row_col += width;
            line_col += full_width;
        }

        rows.push(row);
    }

    /// Lay out one source line as a single row shifted by `left_column`
    fn scroll_line(&self, text: &str, line: usize, request: &LayoutRequest, rows: &mut Vec<VisualRow>) {
        let mut row: VisualRow = Vec::new();
        let mut line_col = 0usize;

        for (column, ch) in text.chars().enumerate() {
            let (display, width) = glyph_for(ch, line_col, request.tab_size);
            let start = line_col;
            line_col += width;

            // Glyphs starting left of the scroll edge are hidden, including one
            // that straddles it; the compositor blanks its visible columns
            if start < request.left_column {
                continue;
            }
            let x = start - request.left_column;
            if x + width > request.width {
                break;
            }

            row.push(PositionedGlyph {
                source: SourceLocation::new(column, line),
                visual: VisualPosition {
                    column: x,
                    row: rows.len(),
                },
                text: display,
                width,
                style: request.base_style,
            });
        }

        rows.push(row);
    }
}

impl Default for WrappingLayout {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LayoutEngine for WrappingLayout {
    fn layout(&self, buffer: &dyn LineSource, request: &LayoutRequest) -> Vec<VisualRow> {
        let mut rows = Vec::new();
        if request.width == 0 || request.max_rows == 0 {
            return rows;
        }

        let mut line = request.top_line;
        while rows.len() < request.max_rows {
            let Some(text) = buffer.line(line) else {
                break;
            };
            if self.soft_wrap {
                self.wrap_line(text, line, request, &mut rows);
            } else {
                self.scroll_line(text, line, request, &mut rows);
            }
            line += 1;
        }

        tracing::trace!(
            "layout: {} rows from line {} (width {}, wrap {})",
            rows.len(),
            request.top_line,
            request.width,
            self.soft_wrap
        );
        rows
    }
}

// ============================================================================
// Row classification
// ============================================================================

/// Which source line a display row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTag {
    /// Zero-based source line shown on this row
    pub source_line: usize,
    /// The row continues the previous row's source line (soft wrap)
    pub is_continuation: bool,
    /// No later row continues this row's source line
    pub ends_line: bool,
}

/// Tag every row with its source line
///
/// Rows with glyphs take the line of their first glyph; a row repeating the
/// line of the row before it is a wrapped continuation. Empty rows carry no
/// location, so they advance the running line by one (blank source lines and
/// rows past the end of the buffer).
pub fn classify_rows(rows: &[VisualRow], top_line: usize) -> Vec<RowTag> {
    // Running line starts one before the top; `None` stands for "before line 0"
    let mut current: Option<usize> = top_line.checked_sub(1);

    let mut tags: Vec<RowTag> = rows
        .iter()
        .map(|row| {
            let (source_line, is_continuation) = match row.first() {
                Some(glyph) => {
                    let line = glyph.source.line;
                    (line, current == Some(line))
                }
                None => (current.map_or(top_line, |l| l + 1), false),
            };
            current = Some(source_line);
            RowTag {
                source_line,
                is_continuation,
                ends_line: true,
            }
        })
        .collect();

    for idx in 1..tags.len() {
        if tags[idx].is_continuation {
            tags[idx - 1].ends_line = false;
        }
    }

    tags
}
