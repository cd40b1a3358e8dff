//! Drag-and-drop reducer.
//!
//! Pure function from (order, dragged, target) to a new order. Resolving a
//! pointer position or keyboard cursor to a target id is the caller's job.

use tracing::debug;

use crate::registry::WidgetId;

/// Moves `dragged` to the slot `target` occupied before the move.
///
/// The dragged element is removed and re-inserted at the target's original
/// index. Dragging forward therefore lands just after the target, dragging
/// backward lands just before it:
///
/// ```
/// use startpage::layout::reorder;
/// use startpage::registry::WidgetId::{Clock as A, Weather as B, Crypto as C, TechStocks as D};
///
/// assert_eq!(reorder(&[A, B, C, D], A, C), vec![B, C, A, D]);
/// assert_eq!(reorder(&[A, B, C, D], D, B), vec![A, D, B, C]);
/// ```
///
/// Returns `order` unchanged when `dragged == target` or when either id is
/// missing from `order`. Every other element keeps its relative position.
pub fn reorder(order: &[WidgetId], dragged: WidgetId, target: WidgetId) -> Vec<WidgetId> {
    if dragged == target {
        return order.to_vec();
    }
    let (Some(from), Some(to)) = (
        order.iter().position(|id| *id == dragged),
        order.iter().position(|id| *id == target),
    ) else {
        debug!(%dragged, %target, "drag ignored, id not in layout");
        return order.to_vec();
    };

    let mut next = order.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetId::{self, *};

    const A: WidgetId = Clock;
    const B: WidgetId = Weather;
    const C: WidgetId = Crypto;
    const D: WidgetId = TechStocks;

    fn sorted(mut ids: Vec<WidgetId>) -> Vec<WidgetId> {
        ids.sort();
        ids
    }

    #[test]
    fn test_single_hop_forward_move() {
        assert_eq!(reorder(&[A, B, C, D], A, C), vec![B, C, A, D]);
    }

    #[test]
    fn test_backward_move_lands_before_target() {
        assert_eq!(reorder(&[A, B, C, D], C, A), vec![C, A, B, D]);
    }

    #[test]
    fn test_adjacent_swap_forward_and_back() {
        assert_eq!(reorder(&[A, B, C, D], B, C), vec![A, C, B, D]);
        assert_eq!(reorder(&[A, C, B, D], B, C), vec![A, B, C, D]);
    }

    #[test]
    fn test_first_to_last() {
        assert_eq!(reorder(&[A, B, C, D], A, D), vec![B, C, D, A]);
    }

    #[test]
    fn test_last_to_first() {
        assert_eq!(reorder(&[A, B, C, D], D, A), vec![D, A, B, C]);
    }

    #[test]
    fn test_same_id_is_noop() {
        let order = [A, B, C, D];
        for id in order {
            assert_eq!(reorder(&order, id, id), order.to_vec());
        }
    }

    #[test]
    fn test_missing_ids_are_noop() {
        let order = [A, B, C];
        assert_eq!(reorder(&order, D, A), order.to_vec());
        assert_eq!(reorder(&order, A, D), order.to_vec());
        assert_eq!(reorder(&[], A, B), Vec::<WidgetId>::new());
    }

    #[test]
    fn test_every_move_preserves_multiset_and_relative_order() {
        let order = WidgetId::ALL;
        for dragged in order {
            for target in order {
                let next = reorder(&order, dragged, target);
                assert_eq!(sorted(next.clone()), sorted(order.to_vec()));

                let others_before: Vec<_> = order.iter().filter(|id| **id != dragged).collect();
                let others_after: Vec<_> = next.iter().filter(|id| **id != dragged).collect();
                assert_eq!(others_before, others_after, "{dragged} -> {target}");

                if dragged != target {
                    let to = order.iter().position(|id| *id == target).expect("present");
                    assert_eq!(next[to], dragged, "{dragged} -> {target}");
                }
            }
        }
    }
}
