//! Shared helpers for TUI tests: `TestBackend` terminals, buffer queries,
//! input event builders, and an [`App`] over an in-memory layout.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

use crate::config::schema::SourcesConfig;
use crate::config::Config;
use crate::layout::{LayoutController, LayoutStore, MemoryBackend};
use crate::registry::Registry;
use crate::tui::app::App;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Finds the first row index that contains the given text.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|row| row_text(buffer, *row).contains(text))
}

/// Asserts that the first character of `text` in `row` has foreground `color`.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let row_string = row_text(buffer, row);
    let byte_index = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    let col = row_string[..byte_index].chars().count() as u16;
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} for '{}' in row {}, got {:?}",
        color, text, row, cell.fg
    );
}

/// Renders the whole dashboard for `app` and returns the buffer.
pub fn render_app_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| crate::tui::ui::render(frame, app))
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

/// Layout controller over a fresh in-memory backend. The backend clone
/// returned alongside sees everything the controller persists.
pub fn memory_layout() -> (LayoutController, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = LayoutStore::new(backend.clone(), Registry::builtin());
    (LayoutController::load(store), backend)
}

/// Default config with a 1ms request timeout, so widgets that get mounted
/// fail fast instead of waiting on the network.
pub fn offline_config() -> Config {
    Config {
        sources: SourcesConfig {
            request_timeout: "1ms".to_string(),
            ..SourcesConfig::default()
        },
        ..Config::default()
    }
}

/// App with the default layout and no widgets mounted.
pub fn test_app() -> App {
    let (layout, _) = memory_layout();
    App::new(layout, offline_config())
}

/// A plain key press.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// A character key press.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// A mouse event with the left button.
pub fn left_mouse(kind: fn(MouseButton) -> MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: kind(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_test_terminal_creates_terminal() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_row_text_and_find_row() {
        let mut terminal = test_terminal(20, 3);
        terminal
            .draw(|frame| {
                frame.render_widget(Paragraph::new("first\nHello World"), frame.area());
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 1).starts_with("Hello World"));
        assert_eq!(find_row_with_text(buffer, "Hello"), Some(1));
        assert_eq!(find_row_with_text(buffer, "Missing"), None);
        assert_eq!(row_text(buffer, 9), "");
    }

    #[test]
    fn test_memory_layout_shares_backend() {
        let (mut layout, backend) = memory_layout();
        layout.toggle(crate::registry::WidgetId::Clock, false);
        assert!(backend.raw(crate::layout::store::ENABLED_KEY).is_some());
    }
}
