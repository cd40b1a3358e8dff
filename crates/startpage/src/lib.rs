//! Startpage dashboard library
//!
//! A terminal start page: a grid of independently refreshing widgets
//! (clock, weather, prices, news feeds) whose order and visibility the user
//! rearranges by dragging cells and toggling them in a settings overlay.
//! The arrangement survives restarts.
//!
//! The pieces, bottom-up:
//!
//! - [`registry`]: the fixed catalog of widget ids and their defaults
//! - [`layout`]: persisted order and visibility, and the drop reducer
//! - [`refresh`]: one supervised polling task per mounted widget
//! - [`widgets`]: the widget implementations over `startpage-feeds`
//! - [`tui`]: grid rendering, drag gestures and the settings overlay

/// Configuration loading, defaults and XDG path resolution.
pub mod config;

/// Layout persistence and the reorder/visibility reducers.
pub mod layout;

/// `tracing` subscriber setup.
pub mod logging;

/// Per-widget refresh supervision.
pub mod refresh;

/// Widget registry: ids, display names and default intervals.
pub mod registry;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Dashboard widget implementations.
pub mod widgets;
