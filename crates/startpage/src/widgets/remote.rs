//! Generic widget backed by a refresh supervisor.
//!
//! Maps the supervisor's [`StateView`] to what the cell shows:
//!
//! | View    | Output                                         |
//! |---------|------------------------------------------------|
//! | Pending | `Loading...`                                   |
//! | Error   | the reason, red                                |
//! | Fresh   | body + `updated HH:MM:SS`                      |
//! | Stale   | body + `stale, updated HH:MM:SS` and reason    |

use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::Widget;
use crate::refresh::{StateView, SupervisorHandle};
use crate::registry::WidgetId;

/// Renders a widget's payload.
pub type BodyFn<T> = fn(&T, u16, DateTime<Local>) -> Vec<Line<'static>>;

/// A widget that displays whatever its supervisor last published.
pub struct RemoteWidget<T> {
    handle: SupervisorHandle<T>,
    body: BodyFn<T>,
}

impl<T> RemoteWidget<T> {
    /// Wraps a mounted supervisor with a body renderer.
    pub fn new(handle: SupervisorHandle<T>, body: BodyFn<T>) -> Self {
        Self { handle, body }
    }
}

impl<T: Send + Sync + 'static> Widget for RemoteWidget<T> {
    fn id(&self) -> WidgetId {
        self.handle.id()
    }

    fn render(&self, width: u16, now: DateTime<Local>) -> Vec<Line<'static>> {
        let state = self.handle.state();
        render_view(state.view(self.handle.show_stale()), |data| {
            (self.body)(data, width, now)
        })
    }

    fn refresh_now(&self) -> bool {
        self.handle.refresh_now()
    }

    fn is_refreshing(&self) -> bool {
        self.handle.is_in_flight()
    }
}

/// Placeholder shown until the first fetch finishes.
pub fn loading_line() -> Line<'static> {
    Line::from(Span::styled(
        "Loading...",
        Style::default().fg(Color::DarkGray),
    ))
}

/// Turns a [`StateView`] into lines, delegating the payload to `body`.
pub fn render_view<T>(
    view: StateView<'_, T>,
    body: impl FnOnce(&T) -> Vec<Line<'static>>,
) -> Vec<Line<'static>> {
    match view {
        StateView::Pending => vec![loading_line()],
        StateView::Error { reason } => vec![Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::Red),
        ))],
        StateView::Fresh { data, fetched_at } => {
            let mut lines = body(data);
            lines.push(Line::from(Span::styled(
                format!("updated {}", fetched_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        StateView::Stale {
            data,
            fetched_at,
            reason,
        } => {
            let mut lines = body(data);
            lines.push(Line::from(vec![
                Span::styled(
                    "stale",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(", updated {} ({reason})", fetched_at.format("%H:%M:%S")),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn body(n: &u32) -> Vec<Line<'static>> {
        vec![Line::raw(format!("value {n}"))]
    }

    fn at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 2, 9, 5, 7)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn test_pending_shows_loading() {
        let lines = render_view::<u32>(StateView::Pending, body);
        assert_eq!(text(&lines), vec!["Loading..."]);
    }

    #[test]
    fn test_error_shows_reason_in_red() {
        let lines = render_view::<u32>(
            StateView::Error {
                reason: "API key not configured",
            },
            body,
        );
        assert_eq!(text(&lines), vec!["API key not configured"]);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_fresh_appends_recency() {
        let lines = render_view(
            StateView::Fresh {
                data: &3,
                fetched_at: at(),
            },
            body,
        );
        assert_eq!(text(&lines), vec!["value 3", "updated 09:05:07"]);
    }

    #[test]
    fn test_stale_is_labelled() {
        let lines = render_view(
            StateView::Stale {
                data: &3,
                fetched_at: at(),
                reason: "timeout",
            },
            body,
        );
        assert_eq!(
            text(&lines),
            vec!["value 3", "stale, updated 09:05:07 (timeout)"]
        );
    }
}
