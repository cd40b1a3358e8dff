//! Enable/disable widgets and derive what is actually shown.

use super::LayoutState;
use crate::registry::WidgetId;

/// Returns a copy of `state` with `id` added to or removed from the enabled
/// set. Ids not present in the order are ignored.
pub fn set_enabled(state: &LayoutState, id: WidgetId, enabled: bool) -> LayoutState {
    let mut next = state.clone();
    if !next.order.contains(&id) {
        return next;
    }
    if enabled {
        next.enabled.insert(id);
    } else {
        next.enabled.remove(&id);
    }
    next
}

/// The render sequence: `order` filtered to enabled ids.
///
/// This is the only place the visible sequence is computed; the grid, the
/// drag layer and the CLI all go through it.
pub fn visible(state: &LayoutState) -> Vec<WidgetId> {
    state
        .order
        .iter()
        .copied()
        .filter(|id| state.enabled.contains(id))
        .collect()
}

/// Enables every widget in the order, leaving the order itself untouched.
pub fn reset_all(state: &LayoutState) -> LayoutState {
    LayoutState {
        order: state.order.clone(),
        enabled: state.order.iter().copied().collect(),
    }
}
