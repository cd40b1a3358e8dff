//! Local clock. Renders from the `now` passed in on every tick, so it has
//! no refresh task.

use chrono::{DateTime, Local};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::Widget;
use crate::registry::WidgetId;

/// 24-hour time and the long-form date.
pub struct ClockWidget;

impl ClockWidget {
    /// Create a new `ClockWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ClockWidget {
    fn id(&self) -> WidgetId {
        WidgetId::Clock
    }

    fn render(&self, _width: u16, now: DateTime<Local>) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                now.format("%H:%M:%S").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(now.format("%A, %b %-d, %Y").to_string()),
        ]
    }
}
