//! Main rendering orchestration for the TUI dashboard.
//!
//! Composes the header, the widget grid, the footer and, when open, the
//! settings overlay.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, DragSource};
use crate::tui::views::grid::{self, GridCell, Highlight};
use crate::tui::views::settings::render_settings;
use crate::widgets::remote::loading_line;

/// Header text displayed at the top of the dashboard.
pub const HEADER_TEXT: &str = "Start Page";

/// Footer showing the grid keybindings.
pub const FOOTER_TEXT: &str = "[hjkl] Select  [m] Move  [r] Refresh  [s] Widgets  [q] Quit";

/// Footer while a widget is picked up with the keyboard.
pub const DRAG_FOOTER_TEXT: &str = "[arrows] Move  [m/Enter] Drop  [Esc] Cancel";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the full dashboard and records cell rectangles on `app` for
/// mouse hit-testing.
pub fn render(frame: &mut Frame, app: &mut App) {
    render_at(frame, app, Local::now());
}

/// [`render`] at a fixed time.
pub fn render_at(frame: &mut Frame, app: &mut App, now: DateTime<Local>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // grid
            Constraint::Length(1), // footer
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(chunks[0].width)), chunks[0]);

    app.columns = grid::columns(chunks[1].width);
    let cells: Vec<GridCell> = app
        .visible()
        .into_iter()
        .map(|id| {
            let widget = app.widget(id);
            GridCell {
                id,
                title: app.display_name(id).to_string(),
                hint: widget.and_then(|w| w.key_hint()),
                refreshing: widget.is_some_and(|w| w.is_refreshing()),
            }
        })
        .collect();
    let highlight = Highlight {
        selected: app.selected_id(),
        dragged: app.drag.map(|d| d.dragged),
        target: app.drag.and_then(|d| d.target),
    };
    let app_ref: &App = app;
    let cell_areas = grid::render_grid(frame, chunks[1], &cells, &highlight, |id, width| {
        app_ref
            .widget(id)
            .map(|w| w.render(width, now))
            .unwrap_or_else(|| vec![loading_line()])
    });
    app.cell_areas = cell_areas;

    frame.render_widget(Paragraph::new(footer_line(app)), chunks[2]);

    if let Some(settings) = app.settings {
        render_settings(
            frame,
            chunks[1],
            app.layout.descriptors(),
            app.layout.enabled(),
            settings,
        );
    }
}

/// Title on the left, version on the right.
fn header_line(width: u16) -> Line<'static> {
    let padding = usize::from(width).saturating_sub(HEADER_TEXT.len() + VERSION_TEXT.len());
    Line::from(vec![
        Span::styled(
            HEADER_TEXT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    ])
}

/// Status message if one is active, otherwise the key hints for the
/// current mode.
fn footer_line(app: &App) -> Line<'static> {
    if let Some(message) = app.active_status() {
        return Line::styled(message.to_string(), Style::default().fg(Color::Yellow));
    }
    let text = if app
        .drag
        .is_some_and(|drag| drag.source == DragSource::Keyboard)
    {
        DRAG_FOOTER_TEXT
    } else {
        FOOTER_TEXT
    };
    Line::styled(text, Style::default().fg(Color::DarkGray))
}
