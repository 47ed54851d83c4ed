// Test harness: renders panels onto an off-screen grid and counts writes

use fresh_panel::buffer::LineBuffer;
use fresh_panel::diagnostics::{DiagnosticMarker, DiagnosticSet, Severity};
use fresh_panel::model::{CursorState, SourceLocation};
use fresh_panel::theme::StyleRegistry;
use fresh_panel::ui::{PanelRenderInput, PanelRenderOutput, SplitRenderer};
use fresh_panel::view::ui::WrappingLayout;
use fresh_panel::view::{
    CellGrid, Panel, PanelId, PanelSettings, PresentationContext, StatusMessages, Surface,
};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use std::collections::HashMap;
use std::path::Path;

/// Grid surface that also counts how often each cell and the cursor were set
pub struct CountingSurface {
    grid: CellGrid,
    writes: HashMap<(u16, u16), usize>,
    cursor_calls: usize,
}

impl CountingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid: CellGrid::new(width, height),
            writes: HashMap::new(),
            cursor_calls: 0,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Forget counts and cursor before the next frame
    pub fn start_frame(&mut self) {
        self.writes.clear();
        self.cursor_calls = 0;
        self.grid.clear_cursor();
    }

    pub fn writes_at(&self, x: u16, y: u16) -> usize {
        self.writes.get(&(x, y)).copied().unwrap_or(0)
    }

    pub fn cursor_calls(&self) -> usize {
        self.cursor_calls
    }
}

impl Surface for CountingSurface {
    fn area(&self) -> Rect {
        self.grid.area()
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: &str, style: Style) {
        *self.writes.entry((x, y)).or_insert(0) += 1;
        self.grid.set_cell(x, y, glyph, style);
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor_calls += 1;
        self.grid.show_cursor(x, y);
    }
}

/// One panel of a buffer, rendered the way the editor renders it
pub struct PanelTestHarness {
    buffer: LineBuffer,
    panels: Vec<(Panel, bool)>,
    cursor: CursorState,
    diagnostics: DiagnosticSet,
    styles: StyleRegistry,
    ctx: PresentationContext<StatusMessages>,
    surface: CountingSurface,
    outputs: Vec<PanelRenderOutput>,
}

impl PanelTestHarness {
    /// An active panel covering a `width` x `height` surface, current-line
    /// highlighting off
    pub fn new(width: u16, height: u16) -> Self {
        let settings = PanelSettings {
            cursor_line: false,
            ..Default::default()
        };
        let panel = Panel::new(PanelId(0), Rect::new(0, 0, width, height), settings);
        Self {
            buffer: LineBuffer::new(),
            panels: vec![(panel, true)],
            cursor: CursorState::default(),
            diagnostics: DiagnosticSet::new(),
            styles: StyleRegistry::builtin(),
            ctx: PresentationContext::new(StatusMessages::new()),
            surface: CountingSurface::new(width, height),
            outputs: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.buffer = LineBuffer::from_str(text);
        self
    }

    pub fn load_file(&mut self, path: &Path) -> std::io::Result<()> {
        self.buffer = LineBuffer::load_from_file(path)?;
        Ok(())
    }

    /// Replace the panels: `(area, is_active)` each, left to right
    pub fn set_panels(&mut self, panels: &[(Rect, bool)]) {
        let settings = self.settings();
        self.panels = panels
            .iter()
            .enumerate()
            .map(|(idx, (area, active))| (Panel::new(PanelId(idx), *area, settings), *active))
            .collect();
    }

    pub fn settings(&self) -> PanelSettings {
        self.panels[0].0.settings
    }

    /// Change the settings of every panel
    pub fn update_settings(&mut self, f: impl Fn(&mut PanelSettings)) {
        for (panel, _) in &mut self.panels {
            f(&mut panel.settings);
        }
    }

    pub fn scroll_to(&mut self, top_line: usize, left_column: usize) {
        for (panel, _) in &mut self.panels {
            *panel = panel.with_scroll(top_line, left_column);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        for (_, is_active) in &mut self.panels {
            *is_active = active;
        }
    }

    /// Place the cursor at zero-based (line, column) with nothing selected
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = CursorState::at(SourceLocation::new(column, line));
    }

    /// Select from `anchor` to `head`, both zero-based (line, column); the
    /// cursor sits at `head`
    pub fn select(&mut self, anchor: (usize, usize), head: (usize, usize)) {
        self.cursor = CursorState::selecting(
            SourceLocation::new(anchor.1, anchor.0),
            SourceLocation::new(head.1, head.0),
        );
    }

    pub fn add_marker(&mut self, owner: &str, line: usize, severity: Severity, message: &str) {
        self.diagnostics
            .add(owner, DiagnosticMarker::new(line, severity, message));
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticSet {
        &mut self.diagnostics
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: StyleRegistry) {
        self.styles = styles;
    }

    pub fn messages(&self) -> &StatusMessages {
        self.ctx.messages()
    }

    pub fn messages_mut(&mut self) -> &mut StatusMessages {
        self.ctx.messages_mut()
    }

    /// Render every panel once; returns the output of the last panel
    pub fn render(&mut self) -> PanelRenderOutput {
        self.surface.start_frame();
        self.outputs.clear();
        for (panel, is_active) in &self.panels {
            let layout = WrappingLayout::new(panel.settings.soft_wrap);
            let output = SplitRenderer::render_panel(
                PanelRenderInput {
                    panel,
                    buffer: &self.buffer,
                    layout: &layout,
                    cursor: &self.cursor,
                    diagnostics: &self.diagnostics,
                    styles: &self.styles,
                    is_active: *is_active,
                },
                &mut self.ctx,
                &mut self.surface,
            );
            self.outputs.push(output);
        }
        self.outputs[self.outputs.len() - 1]
    }

    pub fn outputs(&self) -> &[PanelRenderOutput] {
        &self.outputs
    }

    pub fn surface(&self) -> &CountingSurface {
        &self.surface
    }

    /// Row `y` as text, trailing blanks kept
    pub fn row_text(&self, y: u16) -> String {
        self.surface.grid().row_text(y)
    }

    pub fn screen_to_string(&self) -> String {
        self.surface.grid().to_lines().join("\n")
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn symbol(&self, x: u16, y: u16) -> &str {
        self.surface.grid().symbol(x, y)
    }

    pub fn cell_fg(&self, x: u16, y: u16) -> Color {
        self.cell(x, y).fg
    }

    pub fn cell_bg(&self, x: u16, y: u16) -> Color {
        self.cell(x, y).bg
    }

    pub fn cell(&self, x: u16, y: u16) -> &ratatui::buffer::Cell {
        match self.surface.grid().buffer().cell(Position::new(x, y)) {
            Some(cell) => cell,
            None => panic!("cell ({}, {}) is outside the surface", x, y),
        }
    }

    /// Whether the cell carries every attribute of `style`
    pub fn cell_has_style(&self, x: u16, y: u16, style: Style) -> bool {
        let cell = self.cell(x, y);
        style.fg.map_or(true, |fg| cell.fg == fg)
            && style.bg.map_or(true, |bg| cell.bg == bg)
            && cell.modifier.contains(style.add_modifier)
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.surface.grid().cursor()
    }

    /// Every cell of the surface was written exactly once by the last render
    pub fn assert_each_cell_written_once(&self) {
        let area = self.surface.area();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                assert_eq!(
                    self.surface.writes_at(x, y),
                    1,
                    "cell ({}, {}) written {} times\nScreen:\n{}",
                    x,
                    y,
                    self.surface.writes_at(x, y),
                    self.screen_to_string()
                );
            }
        }
    }
}
