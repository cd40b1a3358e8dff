use super::*;
use crate::layout::store::ORDER_KEY;
use crossterm::event::MouseEventKind;

fn center(app: &App, id: WidgetId) -> (u16, u16) {
    let (_, area) = app
        .cell_areas
        .iter()
        .find(|(cell, _)| *cell == id)
        .copied()
        .expect("cell rendered");
    (area.x + area.width / 2, area.y + area.height / 2)
}

#[test]
fn test_keyboard_drag_moves_widget_and_persists() {
    let (layout, backend) = memory_layout();
    let mut app = App::new(layout, crate::tui::test_utils::offline_config());

    app.start_drag();
    assert_eq!(app.drag.map(|d| d.dragged), Some(WidgetId::Clock));
    app.move_drag_target(2);
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::Crypto));
    assert!(app.drop_drag());

    assert_eq!(
        &app.layout.order()[..3],
        &[WidgetId::Weather, WidgetId::Crypto, WidgetId::Clock]
    );
    assert_eq!(app.selected_id(), Some(WidgetId::Clock));
    assert!(app.drag.is_none());
    let saved = backend.raw(ORDER_KEY).expect("order persisted");
    assert!(saved.starts_with(r#"["weather","crypto","clock""#));
}

#[test]
fn test_drop_on_itself_changes_nothing() {
    let mut app = test_app();
    let before = app.layout.order().to_vec();

    app.start_drag();
    assert!(!app.drop_drag());

    assert_eq!(app.layout.order(), before.as_slice());
    assert!(app.drag.is_none());
}

#[test]
fn test_cancel_drag_keeps_order() {
    let mut app = test_app();
    let before = app.layout.order().to_vec();

    app.start_drag();
    app.move_drag_target(3);
    app.cancel_drag();

    assert!(app.drag.is_none());
    assert_eq!(app.layout.order(), before.as_slice());
    assert_eq!(app.active_status(), Some("Move cancelled"));
}

#[test]
fn test_drag_target_clamps_and_uses_row_stride() {
    let mut app = test_app();
    app.columns = 2;
    app.start_drag();

    app.move_drag_target(-5);
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::Clock));

    app.move_drag_target(app.row_stride());
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::Crypto));

    app.move_drag_target(100);
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::BiotechNews));
}

#[test]
fn test_drag_backward_lands_before_target() {
    let mut app = test_app();
    app.select_id(WidgetId::TechStocks);
    app.start_drag();
    app.move_drag_target(-2);
    assert!(app.drop_drag());

    assert_eq!(
        &app.layout.order()[..4],
        &[
            WidgetId::Clock,
            WidgetId::TechStocks,
            WidgetId::Weather,
            WidgetId::Crypto
        ]
    );
}

#[test]
fn test_reorder_skips_hidden_widgets_in_cursor_but_keeps_them_in_order() {
    let mut app = test_app();
    app.layout.toggle(WidgetId::Weather, false);

    app.start_drag();
    app.move_drag_target(1);
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::Crypto));
    assert!(app.drop_drag());

    assert_eq!(
        &app.layout.order()[..3],
        &[WidgetId::Weather, WidgetId::Crypto, WidgetId::Clock]
    );
    assert!(!app.layout.enabled().contains(&WidgetId::Weather));
}

#[test]
fn test_mouse_press_and_release_on_other_cell_moves() {
    let mut app = rendered_app(80, 40);
    let (x1, y1) = center(&app, WidgetId::Clock);
    let (x2, y2) = center(&app, WidgetId::Crypto);

    app.handle_mouse_event(left_mouse(MouseEventKind::Down, x1, y1));
    assert_eq!(app.drag.map(|d| d.source), Some(DragSource::Mouse));
    app.handle_mouse_event(left_mouse(MouseEventKind::Drag, x2, y2));
    assert_eq!(app.drag.and_then(|d| d.target), Some(WidgetId::Crypto));
    app.handle_mouse_event(left_mouse(MouseEventKind::Up, x2, y2));

    assert!(app.drag.is_none());
    assert_eq!(
        &app.layout.order()[..3],
        &[WidgetId::Weather, WidgetId::Crypto, WidgetId::Clock]
    );
}

#[test]
fn test_mouse_release_without_drag_events_still_drops() {
    let mut app = rendered_app(80, 40);
    let (x1, y1) = center(&app, WidgetId::Weather);
    let (x2, y2) = center(&app, WidgetId::Clock);

    app.handle_mouse_event(left_mouse(MouseEventKind::Down, x1, y1));
    app.handle_mouse_event(left_mouse(MouseEventKind::Up, x2, y2));

    assert_eq!(
        &app.layout.order()[..2],
        &[WidgetId::Weather, WidgetId::Clock]
    );
}

#[test]
fn test_mouse_click_only_selects() {
    let mut app = rendered_app(80, 40);
    let before = app.layout.order().to_vec();
    let (x, y) = center(&app, WidgetId::HackerNews);

    app.handle_mouse_event(left_mouse(MouseEventKind::Down, x, y));
    app.handle_mouse_event(left_mouse(MouseEventKind::Up, x, y));

    assert_eq!(app.selected_id(), Some(WidgetId::HackerNews));
    assert!(app.drag.is_none());
    assert_eq!(app.layout.order(), before.as_slice());
}

#[test]
fn test_mouse_release_outside_grid_cancels() {
    let mut app = rendered_app(80, 40);
    let before = app.layout.order().to_vec();
    let (x, y) = center(&app, WidgetId::Clock);

    app.handle_mouse_event(left_mouse(MouseEventKind::Down, x, y));
    // Row 0 is the header.
    app.handle_mouse_event(left_mouse(MouseEventKind::Up, x, 0));

    assert!(app.drag.is_none());
    assert_eq!(app.layout.order(), before.as_slice());
}

#[test]
fn test_mouse_ignored_while_settings_open() {
    let mut app = rendered_app(80, 40);
    app.open_settings();
    let (x, y) = center(&app, WidgetId::Crypto);

    app.handle_mouse_event(left_mouse(MouseEventKind::Down, x, y));

    assert!(app.drag.is_none());
    assert_eq!(app.selected_id(), Some(WidgetId::Clock));
}

#[test]
fn test_widget_at_uses_recorded_cells() {
    let app = rendered_app(80, 40);
    let (x, y) = center(&app, WidgetId::Weather);

    assert_eq!(app.widget_at(x, y), Some(WidgetId::Weather));
    assert_eq!(app.widget_at(0, 0), None);
}
