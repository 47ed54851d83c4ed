//! Display surfaces the compositor writes cells into

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::Frame;

/// Write-only view of the terminal grid
pub trait Surface {
    /// Area the surface covers; writes outside it are dropped
    fn area(&self) -> Rect;

    /// Replace the cell at (x, y) with `glyph` drawn in `style`
    fn set_cell(&mut self, x: u16, y: u16, glyph: &str, style: Style);

    /// Place the hardware cursor at (x, y)
    fn show_cursor(&mut self, x: u16, y: u16);
}

/// One cell as written by the compositor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub x: u16,
    pub y: u16,
    pub glyph: String,
    pub style: Style,
}

/// Writes consecutive cells of one screen row, clipped at `right`
pub struct RowWriter<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    x: u16,
    y: u16,
    right: u16,
}

impl<'s, S: Surface + ?Sized> RowWriter<'s, S> {
    pub fn new(surface: &'s mut S, x: u16, y: u16, right: u16) -> Self {
        Self {
            surface,
            x,
            y,
            right,
        }
    }

    /// Column the next cell goes to
    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn put(&mut self, glyph: &str, style: Style) {
        if self.x < self.right {
            self.surface.set_cell(self.x, self.y, glyph, style);
        }
        self.x = self.x.saturating_add(1);
    }

    pub fn put_str(&mut self, text: &str, style: Style) {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.put(ch.encode_utf8(&mut buf), style);
        }
    }

    /// Blank every remaining column up to the right edge
    pub fn fill_to_end(&mut self, style: Style) {
        while self.x < self.right {
            self.put(" ", style);
        }
    }
}

fn write_cell(buffer: &mut Buffer, x: u16, y: u16, glyph: &str, style: Style) {
    if let Some(cell) = buffer.cell_mut(Position::new(x, y)) {
        // Cell::set_style merges; reset first so the new style replaces the old one
        cell.reset();
        cell.set_symbol(glyph).set_style(style);
    }
}

/// An off-screen grid of cells plus the cursor slot
///
/// Used for tests and for `--dump` output.
#[derive(Debug, Clone)]
pub struct CellGrid {
    buffer: Buffer,
    cursor: Option<(u16, u16)>,
}

impl CellGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            cursor: None,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Cursor position requested by the last render, if any
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Symbol drawn at (x, y)
    pub fn symbol(&self, x: u16, y: u16) -> &str {
        self.buffer
            .cell(Position::new(x, y))
            .map(|c| c.symbol())
            .unwrap_or("")
    }

    /// The text of row `y`
    pub fn row_text(&self, y: u16) -> String {
        let area = self.buffer.area;
        (area.x..area.x + area.width)
            .map(|x| self.symbol(x, y))
            .collect()
    }

    /// All rows, trailing whitespace trimmed
    pub fn to_lines(&self) -> Vec<String> {
        let area = self.buffer.area;
        (area.y..area.y + area.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect()
    }

    /// Forget the cursor so the next render starts clean
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }
}

impl Surface for CellGrid {
    fn area(&self) -> Rect {
        self.buffer.area
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: &str, style: Style) {
        write_cell(&mut self.buffer, x, y, glyph, style);
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }
}

/// Surface that records every write in order
///
/// Lets tests check which cells a render touched and how often.
#[derive(Debug, Clone, Default)]
pub struct CellLog {
    area: Rect,
    pub cells: Vec<RenderedCell>,
    pub cursor_requests: Vec<(u16, u16)>,
}

impl CellLog {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            area: Rect::new(0, 0, width, height),
            cells: Vec::new(),
            cursor_requests: Vec::new(),
        }
    }

    /// Number of writes that hit (x, y)
    pub fn writes_at(&self, x: u16, y: u16) -> usize {
        self.cells.iter().filter(|c| c.x == x && c.y == y).count()
    }

    /// The last cell written at (x, y)
    pub fn last_at(&self, x: u16, y: u16) -> Option<&RenderedCell> {
        self.cells.iter().rev().find(|c| c.x == x && c.y == y)
    }
}

impl Surface for CellLog {
    fn area(&self) -> Rect {
        self.area
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: &str, style: Style) {
        if self.area.contains(Position::new(x, y)) {
            self.cells.push(RenderedCell {
                x,
                y,
                glyph: glyph.to_string(),
                style,
            });
        }
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor_requests.push((x, y));
    }
}

/// Surface backed by a live ratatui frame
pub struct FrameSurface<'a, 'f> {
    frame: &'a mut Frame<'f>,
}

impl<'a, 'f> FrameSurface<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>) -> Self {
        Self { frame }
    }
}

impl Surface for FrameSurface<'_, '_> {
    fn area(&self) -> Rect {
        self.frame.area()
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: &str, style: Style) {
        write_cell(self.frame.buffer_mut(), x, y, glyph, style);
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.frame.set_cursor_position(Position::new(x, y));
    }
}
