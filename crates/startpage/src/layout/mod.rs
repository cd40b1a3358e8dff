//! Layout system for the dashboard.
//!
//! A layout is the persisted pair of an ordered widget list and the set of
//! enabled widgets. The pieces are kept separate so each can be tested in
//! isolation:
//!
//! - [`store`]: load/save/reset against a key-value backend
//! - [`reorder`]: the pure drag-and-drop reducer
//! - [`visibility`]: enable/disable and the derived visible sequence
//! - [`controller`]: owns the current state and persists every mutation

pub mod controller;
pub mod reorder;
pub mod store;
pub mod visibility;

pub use controller::LayoutController;
pub use reorder::reorder;
pub use store::{JsonFileBackend, KeyValueBackend, LayoutStore, MemoryBackend, StoreError};
pub use visibility::{reset_all, set_enabled, visible};

use std::collections::BTreeSet;

use crate::registry::{Registry, WidgetId};

/// Ordered widget arrangement plus the enabled subset.
///
/// Invariants, upheld by every constructor and by the pure functions in
/// this module:
/// - `order` contains no duplicates
/// - `enabled` is a subset of `order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    order: Vec<WidgetId>,
    enabled: BTreeSet<WidgetId>,
}

impl LayoutState {
    /// Registry order with every widget enabled.
    pub fn default_for(registry: &Registry) -> Self {
        let order = registry.ids();
        let enabled = order.iter().copied().collect();
        Self { order, enabled }
    }

    /// Builds a state from parts, dropping duplicates from `order` and any
    /// `enabled` entry that is not in `order`.
    pub fn from_parts(order: Vec<WidgetId>, enabled: impl IntoIterator<Item = WidgetId>) -> Self {
        let mut seen = BTreeSet::new();
        let order: Vec<WidgetId> = order.into_iter().filter(|id| seen.insert(*id)).collect();
        let enabled = enabled.into_iter().filter(|id| order.contains(id)).collect();
        Self { order, enabled }
    }

    /// All widget ids, including disabled ones, in display order.
    pub fn order(&self) -> &[WidgetId] {
        &self.order
    }

    /// The enabled subset.
    pub fn enabled(&self) -> &BTreeSet<WidgetId> {
        &self.enabled
    }

    /// Whether `id` is enabled.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.enabled.contains(&id)
    }

    /// Whether every registered widget appears exactly once in `order`.
    pub fn covers(&self, registry: &Registry) -> bool {
        self.order.len() == registry.descriptors().len()
            && registry.ids().iter().all(|id| self.order.contains(id))
    }
}
