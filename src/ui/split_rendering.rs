//! Panel compositing: gutter, text, overlays and cursor for one split

use super::gutter::{self, GutterLayout, GutterRow, DIVIDER_GLYPH};
use crate::buffer::LineSource;
use crate::diagnostics::DiagnosticSet;
use crate::model::{CursorState, Selection, SourceLocation, VisualRow};
use crate::theme::{self, StyleRegistry};
use crate::view::messages::{MessageSink, PresentationContext};
use crate::view::panel::Panel;
use crate::view::surface::{RowWriter, Surface};
use crate::view::ui::view_pipeline::{classify_rows, LayoutEngine, LayoutRequest, RowTag};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Everything a panel render reads
pub struct PanelRenderInput<'a> {
    pub panel: &'a Panel,
    pub buffer: &'a dyn LineSource,
    pub layout: &'a dyn LayoutEngine,
    pub cursor: &'a CursorState,
    pub diagnostics: &'a DiagnosticSet,
    pub styles: &'a StyleRegistry,
    /// The panel has keyboard focus
    pub is_active: bool,
}

/// What a panel render produced besides cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRenderOutput {
    /// Screen position handed to `Surface::show_cursor`, if any
    pub cursor: Option<(u16, u16)>,
    /// Rows filled from layout output; the finalizer blanked the rest
    pub rows_rendered: usize,
    pub gutter_width: usize,
}

/// Per-render state for drawing row content
struct OverlayContext<'a> {
    styles: &'a StyleRegistry,
    cursor: SourceLocation,
    /// Present only when the selection is non-empty
    selection: Option<Selection>,
    show_cursor: bool,
    /// Band color of the cursor's line, when highlighted
    cursor_line_band: Option<Color>,
    base_style: Style,
    line_count: usize,
    content_x: usize,
    right: usize,
    /// Rows past the panel's last row cannot hold the cursor
    bottom: u16,
    soft_wrap: bool,
}

/// First cursor candidate wins
#[derive(Debug, Default)]
struct CursorSlot(Option<(u16, u16)>);

impl CursorSlot {
    fn offer(&mut self, x: usize, y: u16, right: usize) {
        if self.0.is_none() && x < right {
            // x < right <= u16::MAX
            self.0 = Some((x as u16, y));
        }
    }
}

/// Renders panels onto a surface
pub struct SplitRenderer;

impl SplitRenderer {
    /// Render one panel
    ///
    /// Every cell of the panel rectangle is written exactly once. The active
    /// panel also places the hardware cursor (unless text is selected) and
    /// keeps the message bar in sync with the diagnostic on the cursor's line.
    ///
    /// # Panics
    /// If the cursor's line is outside the buffer or the panel does not fit
    /// on the surface.
    pub fn render_panel<S, M>(
        input: PanelRenderInput<'_>,
        ctx: &mut PresentationContext<M>,
        surface: &mut S,
    ) -> PanelRenderOutput
    where
        S: Surface + ?Sized,
        M: MessageSink,
    {
        let PanelRenderInput {
            panel,
            buffer,
            layout,
            cursor,
            diagnostics,
            styles,
            is_active,
        } = input;

        let _span = tracing::trace_span!("render_panel", panel = panel.id.0).entered();

        let line_count = buffer.line_count();
        Self::check_contract(panel, cursor, line_count, surface.area());

        if !diagnostics.is_empty() {
            tracing::trace!("{} diagnostic markers registered", diagnostics.len());
            let stale = diagnostics.stale_count(line_count);
            if stale > 0 {
                tracing::warn!(
                    "Ignoring {} diagnostic markers past the end of the buffer ({} lines)",
                    stale,
                    line_count
                );
            }
        }

        let height = panel.height();
        let window = panel.top_line..panel.top_line.saturating_add(height);
        let gutter_layout = GutterLayout::compute(
            panel,
            line_count,
            diagnostics.any_in_lines(window, line_count),
        );
        let gutter_width = gutter_layout.width();
        let content_x = panel.area.x as usize + gutter_width;
        let content_width = (panel.area.width as usize).saturating_sub(gutter_width);

        tracing::trace!(
            "panel {:?}: gutter {} columns, content {}x{} at x={}",
            panel.id,
            gutter_width,
            content_width,
            height,
            content_x
        );

        let request = LayoutRequest {
            top_line: panel.top_line,
            max_rows: height,
            left_column: if panel.settings.soft_wrap {
                0
            } else {
                panel.left_column
            },
            width: content_width,
            tab_size: panel.settings.tab_size,
            base_style: styles.default_style(),
        };
        let mut rows = layout.layout(buffer, &request);
        rows.truncate(height);
        let tags = classify_rows(&rows, panel.top_line);

        let has_selection = cursor.has_selection();
        let emphasize = is_active && !has_selection;
        let overlay = OverlayContext {
            styles,
            cursor: cursor.location,
            selection: has_selection.then_some(cursor.selection),
            show_cursor: emphasize,
            cursor_line_band: (panel.settings.cursor_line && emphasize)
                .then(|| styles.cursor_line_color()),
            base_style: styles.default_style(),
            line_count,
            content_x,
            right: panel.right() as usize,
            bottom: panel.area.bottom(),
            soft_wrap: panel.settings.soft_wrap,
        };

        let mut slot = CursorSlot::default();
        let mut pending_message: Option<&str> = None;

        for (idx, (row, tag)) in rows.iter().zip(&tags).enumerate() {
            // idx < height, which came from a u16
            let y = panel.area.y + idx as u16;

            let marker = if gutter_layout.markers && !tag.is_continuation {
                diagnostics.marker_for_line(tag.source_line, line_count)
            } else {
                None
            };
            let is_cursor_line = tag.source_line == cursor.line();
            if let Some(marker) = marker {
                if is_active && is_cursor_line {
                    pending_message = Some(marker.message.as_str());
                }
            }

            let gutter_row = GutterRow {
                tag: *tag,
                marker,
                line_exists: tag.source_line < line_count,
                number_style: gutter::number_style(styles, is_cursor_line, emphasize),
            };
            {
                let mut writer = RowWriter::new(surface, panel.area.x, y, panel.right());
                gutter::render_gutter_row(&mut writer, &gutter_layout, &gutter_row, styles);
            }

            // The layout may stop mid-line when the row budget runs out
            let reaches_line_end = match row.last() {
                Some(last) => last.source.column + 1 >= buffer.line_char_len(last.source.line),
                None => true,
            };
            let tag = RowTag {
                ends_line: tag.ends_line && reaches_line_end,
                ..*tag
            };
            Self::render_row_content(surface, &overlay, row, &tag, y, &mut slot);
        }

        let rows_rendered = rows.len();
        Self::finalize_frame(surface, panel, rows_rendered, styles);

        if is_active {
            ctx.sync_gutter_message(panel.id, pending_message);
        }

        if let Some((x, y)) = slot.0 {
            surface.show_cursor(x, y);
        }

        PanelRenderOutput {
            cursor: slot.0,
            rows_rendered,
            gutter_width,
        }
    }

    fn check_contract(panel: &Panel, cursor: &CursorState, line_count: usize, surface_area: Rect) {
        // An empty source still has a line 0 for the cursor to sit on
        assert!(
            cursor.line() < line_count.max(1),
            "cursor line {} is outside the buffer ({} lines)",
            cursor.line(),
            line_count
        );
        let area = panel.area;
        assert!(
            area.x >= surface_area.x
                && area.y >= surface_area.y
                && area.right() <= surface_area.right()
                && area.bottom() <= surface_area.bottom(),
            "panel {:?} at {:?} is outside the surface {:?}",
            panel.id,
            area,
            surface_area
        );
    }

    /// Draw one row's glyphs, overlays and trailing fill
    fn render_row_content<S: Surface + ?Sized>(
        surface: &mut S,
        ctx: &OverlayContext<'_>,
        row: &VisualRow,
        tag: &RowTag,
        y: u16,
        slot: &mut CursorSlot,
    ) {
        let band = ctx
            .cursor_line_band
            .filter(|_| tag.source_line == ctx.cursor.line);
        let fill_style = match band {
            Some(color) => ctx
                .styles
                .style_or(theme::CURSOR_LINE, ctx.base_style)
                .bg(color),
            None => ctx.base_style,
        };
        let selection_style = ctx.styles.selection_style();

        let right = ctx.right;
        let mut put = |x: usize, glyph: &str, style: Style| {
            if x < right {
                surface.set_cell(x as u16, y, glyph, style);
            }
        };

        let mut next_x = ctx.content_x;
        for glyph in row {
            let x = ctx.content_x + glyph.visual.column;
            if x >= right {
                break;
            }
            debug_assert!(x >= next_x, "glyphs overlap at column {}", x);

            // Columns skipped by the layout, e.g. a tab cut by horizontal scroll
            while next_x < x {
                put(next_x, " ", fill_style);
                next_x += 1;
            }

            let selected = ctx.selection.is_some_and(|s| s.contains(glyph.source));
            let style = if selected {
                selection_style
            } else if let Some(color) = band {
                glyph.style.bg(color)
            } else {
                glyph.style
            };

            if ctx.show_cursor && glyph.source == ctx.cursor {
                slot.offer(x, y, right);
            }

            put(x, &glyph.text, style);
            for offset in 1..glyph.width {
                put(x + offset, " ", style);
            }
            next_x = x + glyph.width.max(1);
        }

        if tag.ends_line && tag.source_line < ctx.line_count {
            let end_x = row
                .last()
                .map_or(ctx.content_x, |g| ctx.content_x + g.end_column());
            let end_location = row
                .last()
                .map_or(SourceLocation::new(0, tag.source_line), |g| {
                    g.source.next_column()
                });

            if ctx.show_cursor {
                let at_end = end_location == ctx.cursor;
                let on_empty_row = row.is_empty() && tag.source_line == ctx.cursor.line;
                if at_end || on_empty_row {
                    if end_x < right {
                        slot.offer(end_x, y, right);
                    } else if ctx.soft_wrap && y + 1 < ctx.bottom {
                        // Text fills the row: the position past it starts the next row
                        slot.offer(ctx.content_x, y + 1, right);
                    }
                }
            }

            // The line terminator is selected: one selection cell past the text
            let terminator_selected = ctx.selection.is_some_and(|s| s.contains(end_location));
            if terminator_selected && next_x == end_x && end_x < right {
                put(end_x, " ", selection_style);
                next_x += 1;
            }
        }

        while next_x < right {
            put(next_x, " ", fill_style);
            next_x += 1;
        }
    }

    /// Blank the rows below the content, keeping the split divider continuous
    fn finalize_frame<S: Surface + ?Sized>(
        surface: &mut S,
        panel: &Panel,
        rows_rendered: usize,
        styles: &StyleRegistry,
    ) {
        let base = styles.default_style();
        for idx in rows_rendered..panel.height() {
            let y = panel.area.y + idx as u16;
            let mut writer = RowWriter::new(surface, panel.area.x, y, panel.right());
            if panel.is_split {
                writer.put(DIVIDER_GLYPH, styles.divider_style());
            }
            writer.fill_to_end(base);
        }
    }
}
