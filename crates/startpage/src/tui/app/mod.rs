//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, widget mounting and the
//! render loop. Widgets are mounted to follow the layout's visible
//! sequence: hiding a widget drops it, which cancels its refresh task.

mod update;

use std::collections::HashMap;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Config;
use crate::layout::LayoutController;
use crate::refresh::RefreshSupervisor;
use crate::registry::WidgetId;
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render;
use crate::tui::views::settings::SettingsState;
use crate::widgets::{self, MountContext, Widget};

/// How long a status message stays in the footer.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// Capacity of the redraw hint channel shared by all refresh tasks.
const NOTIFY_CAPACITY: usize = 64;

/// Input that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Picked up with `m`, moved with arrows.
    Keyboard,
    /// Pressed on one cell, released on another.
    Mouse,
}

/// A widget picked up for reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    /// Widget being moved.
    pub dragged: WidgetId,
    /// Cell the widget would be dropped on. `None` while the mouse is
    /// outside the grid.
    pub target: Option<WidgetId>,
    /// How the drag started.
    pub source: DragSource,
}

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// Layout state and persistence.
    pub layout: LayoutController,
    config: Config,
    supervisor: RefreshSupervisor,
    notify_rx: mpsc::Receiver<WidgetId>,
    widgets: HashMap<WidgetId, Box<dyn Widget>>,
    /// Index of the focused cell in the visible sequence.
    pub selected: usize,
    /// Widget currently being moved, if any.
    pub drag: Option<Drag>,
    /// Open settings overlay, if any.
    pub settings: Option<SettingsState>,
    /// Temporary status message shown in the footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Cell rectangles from the last render, for mouse hit-testing.
    pub cell_areas: Vec<(WidgetId, Rect)>,
    /// Grid column count from the last render.
    pub columns: usize,
}

impl App {
    /// Creates the app. No widget is mounted until [`App::sync_widgets`].
    pub fn new(layout: LayoutController, config: Config) -> Self {
        let (notify_tx, notify_rx) = mpsc::channel(NOTIFY_CAPACITY);
        Self {
            should_quit: false,
            tick_count: 0,
            layout,
            config,
            supervisor: RefreshSupervisor::new(notify_tx),
            notify_rx,
            widgets: HashMap::new(),
            selected: 0,
            drag: None,
            settings: None,
            status_message: None,
            cell_areas: Vec::new(),
            columns: 1,
        }
    }

    /// Mounts newly visible widgets and drops hidden ones.
    ///
    /// Must run inside a tokio runtime.
    pub fn sync_widgets(&mut self) {
        let visible = self.layout.visible();
        self.widgets.retain(|id, _| visible.contains(id));

        let ctx = MountContext {
            supervisor: &self.supervisor,
            config: &self.config,
            registry: self.layout.registry(),
        };
        for id in &visible {
            self.widgets
                .entry(*id)
                .or_insert_with(|| widgets::mount(*id, &ctx));
        }

        if self
            .drag
            .is_some_and(|drag| !visible.contains(&drag.dragged))
        {
            self.drag = None;
        }
        self.selected = self.selected.min(visible.len().saturating_sub(1));
        debug!(mounted = self.widgets.len(), "widgets synced");
    }

    /// Whether `id` currently has a mounted widget.
    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// The mounted widget for `id`.
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(&id).map(|w| w.as_ref())
    }

    /// Widgets in render order.
    pub fn visible(&self) -> Vec<WidgetId> {
        self.layout.visible()
    }

    /// Display name from the registry.
    pub fn display_name(&self, id: WidgetId) -> &'static str {
        self.layout.registry().display_name(id)
    }

    /// The focused widget, if any widget is visible.
    pub fn selected_id(&self) -> Option<WidgetId> {
        self.visible().get(self.selected).copied()
    }

    /// Focuses `id` if it is visible.
    pub fn select_id(&mut self, id: WidgetId) {
        if let Some(index) = self.visible().iter().position(|v| *v == id) {
            self.selected = index;
        }
    }

    /// Moves the focus by `delta` cells, clamped to the grid.
    pub fn select_offset(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    /// One grid row, as a cell offset.
    pub fn row_stride(&self) -> isize {
        self.columns.max(1) as isize
    }

    // -----------------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------------

    /// Picks up the focused widget.
    pub fn start_drag(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.drag = Some(Drag {
            dragged: id,
            target: Some(id),
            source: DragSource::Keyboard,
        });
        self.set_status(format!("Moving {}", self.display_name(id)));
    }

    /// Moves the drop target by `delta` cells in the visible sequence.
    pub fn move_drag_target(&mut self, delta: isize) {
        let visible = self.visible();
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if visible.is_empty() {
            return;
        }
        let current = drag
            .target
            .and_then(|t| visible.iter().position(|v| *v == t))
            .unwrap_or(0);
        let next = (current as isize + delta).clamp(0, visible.len() as isize - 1) as usize;
        drag.target = Some(visible[next]);
    }

    /// Drops the dragged widget on the current target. Returns `true` if
    /// the order changed. The focus follows the moved widget.
    pub fn drop_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(target) = drag.target else {
            debug!(widget = %drag.dragged, "dropped outside the grid");
            return false;
        };
        let moved = self.layout.move_widget(drag.dragged, target);
        if moved {
            self.select_id(drag.dragged);
            self.set_status(format!(
                "Moved {} to {}",
                self.display_name(drag.dragged),
                self.display_name(target)
            ));
        }
        moved
    }

    /// Abandons the current drag without touching the layout.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            self.set_status("Move cancelled");
        }
    }

    // -----------------------------------------------------------------------
    // Widgets
    // -----------------------------------------------------------------------

    /// Asks widget `id` to refresh now and reports the outcome.
    pub fn refresh_widget(&mut self, id: WidgetId) {
        let name = self.display_name(id);
        let message = match self.widgets.get(&id) {
            Some(widget) if widget.refresh_now() => format!("Refreshing {name}"),
            Some(widget) if widget.is_refreshing() => format!("{name} is already refreshing"),
            _ => format!("{name} has nothing to refresh"),
        };
        self.set_status(message);
    }

    /// Passes an unbound key to the focused widget.
    pub fn forward_key(&mut self, key: char) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        self.widgets
            .get_mut(&id)
            .is_some_and(|widget| widget.handle_key(key))
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Opens the settings overlay, abandoning any drag.
    pub fn open_settings(&mut self) {
        self.drag = None;
        self.settings = Some(SettingsState::default());
    }

    /// Closes the settings overlay.
    pub fn close_settings(&mut self) {
        self.settings = None;
    }

    /// Moves the settings cursor.
    pub fn move_settings_cursor(&mut self, delta: isize) {
        let len = self.layout.descriptors().len();
        if let Some(settings) = self.settings.as_mut() {
            settings.move_cursor(delta, len);
        }
    }

    /// Flips visibility of the widget under the settings cursor.
    pub fn toggle_selected_setting(&mut self) {
        let Some(cursor) = self.settings.map(|s| s.cursor) else {
            return;
        };
        let Some(id) = self.layout.descriptors().get(cursor).map(|d| d.id) else {
            return;
        };
        let enable = !self.layout.enabled().contains(&id);
        if self.layout.toggle(id, enable) {
            self.sync_widgets();
            let state = if enable { "shown" } else { "hidden" };
            self.set_status(format!("{} {state}", self.display_name(id)));
        }
    }

    /// Restores the default layout and remounts widgets to match.
    pub fn reset_layout(&mut self) {
        self.layout.reset_layout();
        self.selected = 0;
        self.drag = None;
        self.sync_widgets();
        info!("layout reset from settings");
        self.set_status("Layout reset");
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Shows `message` in the footer for [`STATUS_MESSAGE_TTL`].
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// The status message, unless it has expired.
    pub fn active_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, expiry)| Instant::now() < *expiry)
            .map(|(message, _)| message.as_str())
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------

    /// Runs the TUI application: sets up terminal, enters event loop,
    /// restores on exit.
    pub async fn run(&mut self, tick_rate: Duration) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;
        self.sync_widgets();

        let result = self.event_loop(tick_rate).await;

        self.widgets.clear();
        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self, tick_rate: Duration) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(tick_rate);
        let mut reader = EventStream::new();

        terminal.draw(|frame| render(frame, self))?;
        loop {
            let event = event_handler.next(&mut reader, &mut self.notify_rx).await?;
            match event {
                Event::Key(key) => match handle_key_event(self, key) {
                    Action::Quit => {
                        self.should_quit = true;
                        return Ok(());
                    }
                    Action::Refresh(id) => self.refresh_widget(id),
                    Action::None => {}
                },
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Redraw(_) => {
                    // Coalesce a burst of finished refreshes into one draw.
                    self.drain_notifications();
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
                Event::Resize(_, _) => {}
            }
            terminal.draw(|frame| render(frame, self))?;
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
