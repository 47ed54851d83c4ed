//! Gutter geometry and the per-row gutter cells
//!
//! Left to right a gutter is: the split divider (one column, split panels
//! only), the diagnostic marker column (two columns, only while a marker is
//! in view) and the line-number field (digits plus one space, only with the
//! ruler enabled).

use crate::diagnostics::DiagnosticMarker;
use crate::theme::{self, StyleRegistry};
use crate::view::panel::Panel;
use crate::view::surface::{RowWriter, Surface};
use crate::view::ui::view_pipeline::RowTag;
use ratatui::style::Style;

pub const DIVIDER_GLYPH: &str = "│";
pub const MARKER_GLYPH: &str = ">";
const MARKER_WIDTH: usize = 2;

/// Number of decimal digits of `n`; zero has one digit
pub fn digit_count(n: usize) -> usize {
    let mut n = n;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Which gutter columns a panel shows during one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterLayout {
    pub divider: bool,
    pub markers: bool,
    /// Digits in the line-number field; `None` with the ruler off
    pub number_digits: Option<usize>,
}

impl GutterLayout {
    /// Gutter for `panel` over a buffer of `line_count` lines
    ///
    /// `markers_in_view` says whether any diagnostic marker falls on a line
    /// in `[top_line, top_line + height)`.
    pub fn compute(panel: &Panel, line_count: usize, markers_in_view: bool) -> Self {
        Self {
            divider: panel.is_split,
            markers: markers_in_view,
            number_digits: panel.settings.ruler.then(|| digit_count(line_count)),
        }
    }

    pub fn width(&self) -> usize {
        let divider = usize::from(self.divider);
        let markers = if self.markers { MARKER_WIDTH } else { 0 };
        let numbers = self.number_digits.map_or(0, |d| d + 1);
        divider + markers + numbers
    }
}

/// What the gutter shows next to one visual row
#[derive(Debug, Clone, Copy)]
pub struct GutterRow<'a> {
    pub tag: RowTag,
    /// Marker of the row's line; `None` on continuation rows
    pub marker: Option<&'a DiagnosticMarker>,
    /// The row's line exists in the buffer
    pub line_exists: bool,
    /// Style of the line-number field, already resolved for the cursor line
    pub number_style: Style,
}

/// Draw the gutter columns of one row
pub fn render_gutter_row<S: Surface + ?Sized>(
    writer: &mut RowWriter<'_, S>,
    layout: &GutterLayout,
    row: &GutterRow<'_>,
    styles: &StyleRegistry,
) {
    let base = styles.default_style();

    if layout.divider {
        writer.put(DIVIDER_GLYPH, styles.divider_style());
    }

    if layout.markers {
        match row.marker {
            Some(marker) => {
                let style = styles.style_or(marker.severity.style_key(), base);
                for _ in 0..MARKER_WIDTH {
                    writer.put(MARKER_GLYPH, style);
                }
            }
            None => {
                for _ in 0..MARKER_WIDTH {
                    writer.put(" ", base);
                }
            }
        }
    }

    if let Some(digits) = layout.number_digits {
        let field = if row.tag.is_continuation || !row.line_exists {
            " ".repeat(digits)
        } else {
            format!("{:>digits$}", row.tag.source_line + 1)
        };
        writer.put_str(&field, row.number_style);
        writer.put(" ", row.number_style);
    }
}

/// Line-number style for a row
///
/// The cursor's line uses the current-line style only in the active panel
/// and only while nothing is selected.
pub fn number_style(styles: &StyleRegistry, is_cursor_line: bool, emphasize: bool) -> Style {
    let plain = styles.style_or(theme::LINE_NUMBER, styles.default_style());
    if is_cursor_line && emphasize {
        styles.style_or(theme::CURRENT_LINE_NUMBER, plain)
    } else {
        plain
    }
}
