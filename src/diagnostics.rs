//! Line-level diagnostic markers shown in the gutter
//!
//! Markers are grouped by owner (one list per producer such as a linter or a
//! language server) so each producer can replace its own markers without
//! touching the others. The compositor only reads them.

use std::collections::BTreeMap;
use std::ops::Range;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Style registry key used for the gutter marker
    pub fn style_key(&self) -> &'static str {
        match self {
            Severity::Info => "gutter-info",
            Severity::Warning => "gutter-warning",
            Severity::Error => "gutter-error",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" | "hint" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// A message attached to one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMarker {
    /// Zero-based source line
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl DiagnosticMarker {
    pub fn new(line: usize, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            severity,
            message: message.into(),
        }
    }
}

/// All markers of a buffer, keyed by owner
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSet {
    by_owner: BTreeMap<String, Vec<DiagnosticMarker>>,
}

impl DiagnosticSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker under `owner`
    pub fn add(&mut self, owner: &str, marker: DiagnosticMarker) {
        self.by_owner
            .entry(owner.to_string())
            .or_default()
            .push(marker);
    }

    /// Replace every marker of `owner`
    pub fn set_owner(&mut self, owner: &str, markers: Vec<DiagnosticMarker>) {
        if markers.is_empty() {
            self.by_owner.remove(owner);
        } else {
            self.by_owner.insert(owner.to_string(), markers);
        }
    }

    pub fn clear_owner(&mut self, owner: &str) {
        self.by_owner.remove(owner);
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.by_owner.values().map(Vec::len).sum()
    }

    fn iter(&self) -> impl Iterator<Item = &DiagnosticMarker> {
        self.by_owner.values().flatten()
    }

    /// Markers pointing past the end of a buffer of `line_count` lines
    pub fn stale_count(&self, line_count: usize) -> usize {
        self.iter().filter(|m| m.line >= line_count).count()
    }

    /// Whether any marker falls on a line inside `lines`
    ///
    /// `line_count` bounds the buffer: markers past its end are stale and
    /// count as absent.
    pub fn any_in_lines(&self, lines: Range<usize>, line_count: usize) -> bool {
        let end = lines.end.min(line_count);
        self.iter()
            .any(|m| m.line >= lines.start && m.line < end)
    }

    /// The marker to display for `line`
    ///
    /// When several owners report the same line the most severe marker wins;
    /// ties go to the first one in owner order. Lines at or past `line_count`
    /// never have a marker.
    pub fn marker_for_line(&self, line: usize, line_count: usize) -> Option<&DiagnosticMarker> {
        if line >= line_count {
            return None;
        }
        self.iter()
            .filter(|m| m.line == line)
            .fold(None, |best: Option<&DiagnosticMarker>, m| match best {
                Some(b) if b.severity >= m.severity => Some(b),
                _ => Some(m),
            })
    }
}
