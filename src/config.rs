use ratatui::style::{Color, Modifier, Style};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Panel behavior settings (tab width, line numbers, wrapping, etc.)
    #[serde(default)]
    pub editor: EditorConfig,

    /// Style overrides by logical name (e.g. "selection", "line-number", "gutter-error").
    /// Entries not listed here keep the built-in colors.
    #[serde(default)]
    pub styles: HashMap<String, StyleSpec>,
}

/// Panel behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditorConfig {
    /// Number of columns per tab stop
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers in the gutter
    #[serde(default = "default_true")]
    pub line_numbers: bool,

    /// Highlight the full row of the line holding the cursor
    #[serde(default = "default_true")]
    pub highlight_current_line: bool,

    /// Wrap long lines to fit the panel width
    #[serde(default = "default_true")]
    pub line_wrap: bool,
}

fn default_tab_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            line_numbers: true,
            highlight_current_line: true,
            line_wrap: true,
        }
    }
}

/// A style as written in the configuration file
///
/// Colors accept the names ratatui understands ("red", "darkgray", ...),
/// indexed colors ("236") and hex ("#1e1e2e").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StyleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub reverse: bool,
}

impl StyleSpec {
    /// Convert to a ratatui style, failing on unparseable colors
    pub fn to_style(&self) -> Result<Style, ConfigError> {
        let mut style = Style::default();
        if let Some(fg) = &self.fg {
            style = style.fg(parse_color(fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.bg(parse_color(bg)?);
        }

        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underline {
            modifier |= Modifier::UNDERLINED;
        }
        if self.reverse {
            modifier |= Modifier::REVERSED;
        }
        Ok(style.add_modifier(modifier))
    }
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value)
        .map_err(|_| ConfigError::ValidationError(format!("unknown color '{value}'")))
}

impl Config {
    /// Get the default config file path
    #[cfg(feature = "runtime")]
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("fresh-panel").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    #[cfg(feature = "runtime")]
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file
    ///
    /// Missing fields take their defaults; the result is validated before it
    /// is returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.tab_size == 0 {
            return Err(ConfigError::ValidationError(
                "editor.tab_size must be at least 1".to_string(),
            ));
        }
        for (name, spec) in &self.styles {
            spec.to_style().map_err(|e| match e {
                ConfigError::ValidationError(msg) => {
                    ConfigError::ValidationError(format!("style '{name}': {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
