//! Event handling for the TUI.
//!
//! Wraps crossterm events, adds a tick variant for the clock, and a redraw
//! variant raised when a widget's refresh task publishes new state.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseEvent,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::registry::WidgetId;
use crate::tui::app::{App, DragSource};

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
    /// A widget has new state to show.
    Redraw(WidgetId),
}

/// Event handler that merges terminal input, redraw hints and periodic
/// ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// The configured tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Waits for the next event: terminal input, a redraw hint, or a tick.
    pub async fn next(
        &self,
        reader: &mut EventStream,
        redraw: &mut mpsc::Receiver<WidgetId>,
    ) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore focus, paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                Some(id) = redraw.recv() => {
                    return Ok(Event::Redraw(id));
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event that the event loop carries out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Refresh the given widget now.
    Refresh(WidgetId),
}

/// Handles a key event by dispatching to the appropriate app method or
/// action.
///
/// Keys route to the settings overlay while it is open, then to a keyboard
/// drag in progress, then to grid navigation. Unbound characters go to the
/// focused widget.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // Global: quit always works
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        _ => {}
    }

    if app.settings.is_some() {
        handle_settings_key(app, key);
        return Action::None;
    }

    if app
        .drag
        .is_some_and(|drag| drag.source == DragSource::Keyboard)
    {
        handle_drag_key(app, key);
        return Action::None;
    }

    match key.code {
        KeyCode::Char('l') | KeyCode::Right => app.select_offset(1),
        KeyCode::Char('h') | KeyCode::Left => app.select_offset(-1),
        KeyCode::Char('j') | KeyCode::Down => app.select_offset(app.row_stride()),
        KeyCode::Char('k') | KeyCode::Up => app.select_offset(-app.row_stride()),
        KeyCode::Char('m') => app.start_drag(),
        KeyCode::Char('r') => {
            if let Some(id) = app.selected_id() {
                return Action::Refresh(id);
            }
        }
        KeyCode::Char('s') => app.open_settings(),
        // Esc also drops a mouse drag whose release never arrived
        KeyCode::Esc => app.drag = None,
        KeyCode::Char(c) => {
            app.forward_key(c);
        }
        _ => {}
    }
    Action::None
}

/// Keys while the settings overlay is open.
fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => app.close_settings(),
        KeyCode::Char('j') | KeyCode::Down => app.move_settings_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_settings_cursor(-1),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_setting(),
        KeyCode::Char('R') => app.reset_layout(),
        _ => {}
    }
}

/// Keys while a widget is picked up with the keyboard.
fn handle_drag_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => app.move_drag_target(1),
        KeyCode::Char('h') | KeyCode::Left => app.move_drag_target(-1),
        KeyCode::Char('j') | KeyCode::Down => app.move_drag_target(app.row_stride()),
        KeyCode::Char('k') | KeyCode::Up => app.move_drag_target(-app.row_stride()),
        KeyCode::Char('m') | KeyCode::Enter => {
            app.drop_drag();
        }
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}
