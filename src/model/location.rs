//! Source positions, selections and cursor state
//!
//! All positions are zero-based and measured in characters of the source
//! line, not in display columns. Display columns only exist after layout.

use std::cmp::Ordering;

/// A position in the source buffer
///
/// Ordered by line first, then column, so a range of locations follows
/// reading order across line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub column: usize,
    pub line: usize,
}

impl SourceLocation {
    pub const fn new(column: usize, line: usize) -> Self {
        Self { column, line }
    }

    /// The location one column to the right on the same line
    pub fn next_column(self) -> Self {
        Self {
            column: self.column + 1,
            line: self.line,
        }
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A selection between two anchors given in any order
///
/// The range is half-open: the higher anchor itself is not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: SourceLocation,
    pub head: SourceLocation,
}

impl Selection {
    pub fn new(anchor: SourceLocation, head: SourceLocation) -> Self {
        Self { anchor, head }
    }

    /// Collapsed selection at a single location
    pub fn caret(at: SourceLocation) -> Self {
        Self { anchor: at, head: at }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns (low, high) regardless of the direction the selection was made in
    pub fn normalized(&self) -> (SourceLocation, SourceLocation) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    pub fn contains(&self, loc: SourceLocation) -> bool {
        let (low, high) = self.normalized();
        low <= loc && loc < high
    }
}

/// The cursor of one panel together with its selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub location: SourceLocation,
    pub selection: Selection,
}

impl CursorState {
    /// A cursor with no selection
    pub fn at(location: SourceLocation) -> Self {
        Self {
            location,
            selection: Selection::caret(location),
        }
    }

    /// A cursor whose selection extends from `anchor` to the cursor location
    pub fn selecting(anchor: SourceLocation, location: SourceLocation) -> Self {
        Self {
            location,
            selection: Selection::new(anchor, location),
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}
