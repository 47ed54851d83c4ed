//! Style registry: logical style names to ratatui styles
//!
//! Lookups return `Option<Style>`; callers decide what an absent entry means
//! by passing their own default to [`StyleRegistry::style_or`].

use crate::config::{Config, ConfigError};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

pub const DEFAULT: &str = "default";
pub const SELECTION: &str = "selection";
pub const LINE_NUMBER: &str = "line-number";
pub const CURRENT_LINE_NUMBER: &str = "current-line-number";
pub const GUTTER_INFO: &str = "gutter-info";
pub const GUTTER_WARNING: &str = "gutter-warning";
pub const GUTTER_ERROR: &str = "gutter-error";
pub const CURSOR_LINE: &str = "cursor-line";
pub const DIVIDER: &str = "divider";

/// Named styles of the active colorscheme
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, Style>,
}

impl StyleRegistry {
    /// A registry with no entries; every lookup falls back to the caller's default
    pub fn new() -> Self {
        Self::default()
    }

    /// The colors used when the configuration does not override them
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(LINE_NUMBER, Style::default().fg(Color::DarkGray));
        registry.insert(
            CURRENT_LINE_NUMBER,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
        registry.insert(GUTTER_INFO, Style::default().fg(Color::Blue));
        registry.insert(GUTTER_WARNING, Style::default().fg(Color::Yellow));
        registry.insert(GUTTER_ERROR, Style::default().fg(Color::Red));
        registry.insert(CURSOR_LINE, Style::default().fg(Color::Indexed(236)));
        registry
    }

    /// Built-in styles with the configuration's overrides applied on top
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut registry = Self::builtin();
        for (name, spec) in &config.styles {
            registry.insert(name, spec.to_style()?);
        }
        tracing::debug!("Style registry has {} entries", registry.styles.len());
        Ok(registry)
    }

    pub fn insert(&mut self, name: &str, style: Style) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn get(&self, name: &str) -> Option<Style> {
        self.styles.get(name).copied()
    }

    /// Look up `name`, using `default` when the colorscheme has no entry
    pub fn style_or(&self, name: &str, default: Style) -> Style {
        self.get(name).unwrap_or(default)
    }

    /// Base style for text and blank fillers
    pub fn default_style(&self) -> Style {
        self.style_or(DEFAULT, Style::default())
    }

    /// Selected text; reverse video of the base style when not themed
    pub fn selection_style(&self) -> Style {
        self.get(SELECTION)
            .unwrap_or_else(|| self.default_style().add_modifier(Modifier::REVERSED))
    }

    /// Split divider; reverse video of the base style when not themed
    pub fn divider_style(&self) -> Style {
        self.get(DIVIDER)
            .unwrap_or_else(|| self.default_style().add_modifier(Modifier::REVERSED))
    }

    /// Background color of the current-line band
    ///
    /// The band color is the foreground of the "cursor-line" style so a
    /// theme can describe it with a single color.
    pub fn cursor_line_color(&self) -> Color {
        self.get(CURSOR_LINE)
            .and_then(|s| s.fg)
            .unwrap_or(Color::Indexed(236))
    }
}
