//! Terminal dashboard.
//!
//! Renders the visible widgets in a responsive grid and drives the layout
//! controller from keyboard and mouse gestures.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
