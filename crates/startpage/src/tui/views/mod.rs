//! View components: the widget grid and the settings overlay.

pub mod grid;
pub mod settings;
