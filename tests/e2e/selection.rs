// End-to-end tests for the selection overlay

use crate::common::harness::PanelTestHarness;
use ratatui::style::Modifier;

fn is_selected(harness: &PanelTestHarness, x: u16, y: u16) -> bool {
    let selection = harness.styles().selection_style();
    harness.cell_has_style(x, y, selection)
        && harness.cell(x, y).modifier.contains(Modifier::REVERSED)
}

/// A selected tab colors every column of its footprint
#[test]
fn test_selected_tab_fills_footprint() {
    let mut harness = PanelTestHarness::new(12, 1).with_text("\tab");
    harness.select((0, 0), (0, 2));
    harness.render();

    // Tab covers columns 2..6, "a" is at 6, "b" at 7
    for x in 2..=6 {
        assert!(is_selected(&harness, x, 0), "column {} not selected", x);
    }
    assert!(!is_selected(&harness, 7, 0));
    assert!(!is_selected(&harness, 8, 0));
    harness.assert_each_cell_written_once();
}

/// Exactly the glyphs in [low, high) are selected, plus the terminator of
/// every fully crossed line
#[test]
fn test_selection_is_half_open_range() {
    let mut harness = PanelTestHarness::new(12, 2).with_text("hello\nworld");
    harness.select((0, 1), (1, 3));
    harness.render();

    assert!(!is_selected(&harness, 2, 0));
    for x in 3..=7 {
        assert!(is_selected(&harness, x, 0), "row 0 column {}", x);
    }
    assert!(!is_selected(&harness, 8, 0));

    for x in 2..=4 {
        assert!(is_selected(&harness, x, 1), "row 1 column {}", x);
    }
    for x in 5..=7 {
        assert!(!is_selected(&harness, x, 1), "row 1 column {}", x);
    }
}

/// Anchor and head order does not matter
#[test]
fn test_selection_direction_is_irrelevant() {
    let mut forward = PanelTestHarness::new(12, 2).with_text("hello\nworld");
    forward.select((0, 1), (1, 3));
    forward.render();

    let mut backward = PanelTestHarness::new(12, 2).with_text("hello\nworld");
    backward.select((1, 3), (0, 1));
    backward.render();

    for y in 0..2 {
        for x in 2..12 {
            assert_eq!(
                is_selected(&forward, x, y),
                is_selected(&backward, x, y),
                "cell ({}, {})",
                x,
                y
            );
        }
    }
}

/// No hardware cursor is placed while text is selected
#[test]
fn test_selection_hides_cursor() {
    let mut harness = PanelTestHarness::new(12, 2).with_text("hello\nworld");
    harness.select((0, 0), (0, 3));
    let output = harness.render();

    assert_eq!(output.cursor, None);
    assert_eq!(harness.surface().cursor_calls(), 0);
}

/// A selected empty line shows one selection cell at its first content column
#[test]
fn test_selected_empty_line() {
    let mut harness = PanelTestHarness::new(8, 3).with_text("a\n\nb");
    harness.select((0, 0), (2, 1));
    harness.render();

    assert!(is_selected(&harness, 2, 1));
    assert!(!is_selected(&harness, 3, 1));
    harness.assert_each_cell_written_once();
}

/// The current-line number style is not used while text is selected
#[test]
fn test_selection_suppresses_current_line_number() {
    let mut harness = PanelTestHarness::new(8, 2).with_text("a\nb");
    harness.select((1, 0), (1, 1));
    harness.render();

    let plain = harness
        .styles()
        .get(fresh_panel::theme::LINE_NUMBER)
        .unwrap();
    assert!(harness.cell_has_style(0, 1, plain));
    assert!(!harness.cell(0, 1).modifier.contains(Modifier::BOLD));
}
