//! Widget settings overlay.
//!
//! Lists every registry entry with its visibility. The list follows
//! registration order, not layout order, so entries do not jump around
//! while the user reorders the grid.

use std::collections::BTreeSet;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::registry::{WidgetDescriptor, WidgetId};

/// Footer explaining the drag gesture.
pub const DRAG_HINT: &str = "Pick up with m, move with arrows, drop with m";

/// Footer listing the overlay keys.
pub const KEYS_HINT: &str = "[Space] Toggle  [R] Reset  [Esc] Close";

const NAME_WIDTH: usize = 18;
const MODAL_WIDTH: u16 = 48;

/// Cursor position inside the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsState {
    /// Index into the registry's descriptors.
    pub cursor: usize,
}

impl SettingsState {
    /// Moves the cursor by `delta`, clamped to `len` entries.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }
}

/// One line per descriptor: cursor marker, name, Visible/Hidden.
pub fn settings_lines(
    descriptors: &[WidgetDescriptor],
    enabled: &BTreeSet<WidgetId>,
    cursor: usize,
) -> Vec<Line<'static>> {
    descriptors
        .iter()
        .enumerate()
        .map(|(i, descriptor)| {
            let selected = i == cursor;
            let marker = if selected { "▶ " } else { "  " };
            let name_style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let (label, label_style) = if enabled.contains(&descriptor.id) {
                ("Visible", Style::default().fg(Color::Green))
            } else {
                ("Hidden", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:<width$}", descriptor.display_name, width = NAME_WIDTH),
                    name_style,
                ),
                Span::styled(label, label_style),
            ])
        })
        .collect()
}

/// Renders the overlay centered in `area`.
pub fn render_settings(
    frame: &mut Frame,
    area: Rect,
    descriptors: &[WidgetDescriptor],
    enabled: &BTreeSet<WidgetId>,
    state: SettingsState,
) {
    let wanted_height = descriptors.len() as u16 + 5;
    let width = MODAL_WIDTH.min(area.width);
    let height = wanted_height.min(area.height);
    if width < 10 || height < 3 {
        return;
    }
    let modal = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Widgets ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = settings_lines(descriptors, enabled, state.cursor);
    lines.push(Line::raw(""));
    lines.push(Line::styled(KEYS_HINT, Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled(DRAG_HINT, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines).block(block), modal);
}
