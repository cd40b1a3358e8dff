pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::{left_mouse, memory_layout, test_app};

mod drag;

/// Renders once so cell rectangles and the column count are known.
pub(crate) fn rendered_app(width: u16, height: u16) -> App {
    let mut app = test_app();
    crate::tui::test_utils::render_app_to_buffer(&mut app, width, height);
    app
}
