//! Line-oriented text buffer consumed by the layout engine

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read access to the lines of a text buffer
///
/// This is the only view of the buffer the layout engine and the compositor
/// need. Lines are returned without their terminator.
pub trait LineSource {
    /// Number of lines; never zero for a real buffer (an empty buffer has one empty line)
    fn line_count(&self) -> usize;

    /// The text of line `idx`, or `None` past the end of the buffer
    fn line(&self, idx: usize) -> Option<&str>;

    /// Length of line `idx` in characters (0 past the end)
    fn line_char_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }
}

/// A text buffer stored as one `String` per line
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,

    /// Optional file path the buffer was loaded from
    file_path: Option<PathBuf>,
}

impl LineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            file_path: None,
        }
    }

    /// Create a buffer from a string
    ///
    /// Lines are split on `\n` and a trailing `\r` is dropped, so CRLF files
    /// render the same as LF files. A trailing newline produces a final empty
    /// line, matching where the cursor can be placed after it.
    pub fn from_str(s: &str) -> Self {
        let lines = s
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self {
            lines,
            file_path: None,
        }
    }

    /// Load a buffer from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;

        let mut buffer = Self::from_str(&String::from_utf8_lossy(&contents));
        buffer.file_path = Some(path.to_path_buf());
        tracing::debug!(
            "Loaded {} ({} lines)",
            path.display(),
            buffer.lines.len()
        );
        Ok(buffer)
    }

    /// Get the file path associated with this buffer
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get the entire buffer as a string
    pub fn to_string(&self) -> String {
        self.lines.join("\n")
    }

    /// Check if the buffer holds no text at all
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }
}
