//! Layout controller: current state plus persistence.
//!
//! Every mutation goes through here and is saved before the method returns.
//! The settings panel, the drag gesture layer and the CLI only ever see the
//! read accessors and the command methods below.

use std::collections::BTreeSet;

use tracing::info;

use super::{reorder, set_enabled, visible, LayoutState, LayoutStore};
use crate::registry::{Registry, WidgetDescriptor, WidgetId};

/// Owns the live [`LayoutState`] and its [`LayoutStore`].
pub struct LayoutController {
    state: LayoutState,
    store: LayoutStore,
}

impl LayoutController {
    /// Loads the persisted layout from `store`.
    pub fn load(store: LayoutStore) -> Self {
        let state = store.load();
        Self { state, store }
    }

    /// Current layout.
    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Every widget id in display order, hidden ones included.
    pub fn order(&self) -> &[WidgetId] {
        self.state.order()
    }

    /// The enabled set.
    pub fn enabled(&self) -> &BTreeSet<WidgetId> {
        self.state.enabled()
    }

    /// Widgets to render, in order.
    pub fn visible(&self) -> Vec<WidgetId> {
        visible(&self.state)
    }

    /// The registry backing this layout.
    pub fn registry(&self) -> &Registry {
        self.store.registry()
    }

    /// Registry entries in registration order, for the settings list.
    pub fn descriptors(&self) -> &[WidgetDescriptor] {
        self.store.registry().descriptors()
    }

    /// Shows or hides a widget. Returns `true` if the layout changed.
    pub fn toggle(&mut self, id: WidgetId, enabled: bool) -> bool {
        let next = set_enabled(&self.state, id, enabled);
        self.commit(next)
    }

    /// Applies a drop of `dragged` onto `target`. Returns `true` if the
    /// order changed.
    pub fn move_widget(&mut self, dragged: WidgetId, target: WidgetId) -> bool {
        let order = reorder(self.state.order(), dragged, target);
        let next = LayoutState::from_parts(order, self.state.enabled().iter().copied());
        self.commit(next)
    }

    /// Restores registry order with every widget visible.
    pub fn reset_layout(&mut self) {
        self.state = self.store.reset();
    }

    fn commit(&mut self, next: LayoutState) -> bool {
        if next == self.state {
            return false;
        }
        self.store.save(&next);
        info!(visible = visible(&next).len(), "layout updated");
        self.state = next;
        true
    }
}
