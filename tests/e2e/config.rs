// End-to-end tests for configuration files driving the renderer

use crate::common::fixtures::TestFixture;
use crate::common::harness::PanelTestHarness;
use fresh_panel::config::{Config, ConfigError};
use fresh_panel::diagnostics::Severity;
use fresh_panel::theme::StyleRegistry;
use fresh_panel::view::PanelSettings;
use ratatui::style::{Color, Modifier};

/// Styles and editor settings from a config file reach the rendered cells
#[test]
fn test_config_file_styles_and_settings() {
    let fixture = TestFixture::config(
        r##"{
            "editor": { "tab_size": 2, "highlight_current_line": false },
            "styles": {
                "line-number": { "fg": "green" },
                "gutter-error": { "fg": "#ff0000", "bold": true }
            }
        }"##,
    )
    .unwrap();
    let config = Config::load_from_file(&fixture.path).unwrap();
    let styles = StyleRegistry::from_config(&config).unwrap();

    let mut harness = PanelTestHarness::new(10, 2).with_text("\tx\ny");
    harness.set_styles(styles);
    harness.update_settings(|s| *s = PanelSettings::from(&config.editor));
    harness.render();

    // Tab stops every 2 columns: the tab covers 2..4
    assert_eq!(harness.symbol(4, 0), "x");
    assert_eq!(harness.cell_fg(0, 1), Color::Green);

    harness.add_marker("lsp", 1, Severity::Error, "bad");
    harness.render();
    assert_eq!(harness.cell_fg(0, 1), Color::Rgb(255, 0, 0));
    assert!(harness.cell(0, 1).modifier.contains(Modifier::BOLD));
}

#[test]
fn test_invalid_color_is_rejected() {
    let fixture =
        TestFixture::config(r#"{ "styles": { "selection": { "bg": "notacolor" } } }"#).unwrap();
    match Config::load_from_file(&fixture.path) {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("selection")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_zero_tab_size_is_rejected() {
    let fixture = TestFixture::config(r#"{ "editor": { "tab_size": 0 } }"#).unwrap();
    assert!(matches!(
        Config::load_from_file(&fixture.path),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let fixture = TestFixture::config("{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&fixture.path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let fixture = TestFixture::config("{}").unwrap();
    let missing = fixture.path.with_file_name("missing.json");
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(ConfigError::IoError(_))
    ));
}
