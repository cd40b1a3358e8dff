use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::*;

impl App {
    /// Widget whose cell contained (`column`, `row`) at the last render.
    pub fn widget_at(&self, column: u16, row: u16) -> Option<WidgetId> {
        self.cell_areas
            .iter()
            .find(|(_, area)| {
                column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
            })
            .map(|(id, _)| *id)
    }

    /// Mouse gestures: press on a cell to pick it up, release on another
    /// cell to drop it there. A press and release on the same cell only
    /// focuses it. The wheel moves the focus by rows.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.settings.is_some() {
            return;
        }
        let hovered = self.widget_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(id) = hovered else {
                    return;
                };
                self.select_id(id);
                self.drag = Some(Drag {
                    dragged: id,
                    target: Some(id),
                    source: DragSource::Mouse,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = self
                    .drag
                    .as_mut()
                    .filter(|d| d.source == DragSource::Mouse)
                {
                    drag.target = hovered;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.filter(|d| d.source == DragSource::Mouse) else {
                    return;
                };
                if hovered == Some(drag.dragged) {
                    self.drag = None;
                    return;
                }
                // Terminals may skip Drag events entirely; the release
                // position is authoritative.
                self.drag = Some(Drag {
                    target: hovered,
                    ..drag
                });
                self.drop_drag();
            }
            MouseEventKind::ScrollDown => self.select_offset(self.row_stride()),
            MouseEventKind::ScrollUp => self.select_offset(-self.row_stride()),
            _ => {}
        }
    }

    /// Empties the redraw hint channel. Returns how many hints were pending.
    pub fn drain_notifications(&mut self) -> usize {
        let mut pending = 0;
        while self.notify_rx.try_recv().is_ok() {
            pending += 1;
        }
        pending
    }
}
