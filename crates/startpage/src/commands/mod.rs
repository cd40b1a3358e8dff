//! Command implementations for the startpage CLI.
//!
//! - `config` - configuration file init/path/validate
//! - `layout` - inspect and edit the persisted layout without the TUI
//! - `tui` - launch the dashboard

pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod tui;

pub(crate) use config::*;
pub(crate) use layout::*;
pub(crate) use tui::*;
