//! Order consistency: dense, gapless integer ranks for every
//! section-entry list.
//!
//! Invariant: after any successful mutation of a list of length `n`,
//! the set of `order` values is exactly `{0, 1, …, n-1}`, and iterating
//! sorted by `order` reproduces the user's intended visual sequence.
//! Every function here operates against the `Orderable` capability,
//! never against concrete section types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};

/// The structural capability shared by every section-entry type:
/// a stable id and an integer rank.
pub trait Orderable {
    /// Stable wire identifier of this item
    fn order_id(&self) -> String;

    /// Current rank
    fn order(&self) -> u32;

    /// Assign a rank. Only the order functions in this module call
    /// this in bulk.
    fn set_order(&mut self, order: u32);
}

/// One persisted rank change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelta {
    pub id: String,
    pub order: u32,
}

/// The rank for a newly appended item: `max + 1`, or `0` when empty.
pub fn next_order<T: Orderable>(items: &[T]) -> u32 {
    items.iter().map(Orderable::order).max().map_or(0, |o| o + 1)
}

/// Ids in current rank order.
pub fn sequence<T: Orderable>(items: &[T]) -> Vec<String> {
    let mut ranked: Vec<(u32, String)> = items.iter().map(|i| (i.order(), i.order_id())).collect();
    ranked.sort_by_key(|(order, _)| *order);
    ranked.into_iter().map(|(_, id)| id).collect()
}

/// Close gaps after a deletion: reassign `0..n` without permuting the
/// relative sequence. Also sorts the backing vec into rank order.
pub fn compact<T: Orderable>(items: &mut Vec<T>) {
    items.sort_by_key(Orderable::order);
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as u32);
    }
}

/// Reassign ranks so the list matches `target`, the full drag-target
/// id sequence. Pure re-indexing: no storage calls. Returns only the
/// deltas whose rank actually changed, for persistence.
///
/// `target` must be a permutation of the list's current id set: a
/// length mismatch or duplicate id is an order conflict, and an id the
/// list does not contain (a cross-section drag, or a drag over an
/// entry deleted mid-gesture) is entry-not-found. The whole target is
/// validated before any rank is touched, so a rejected permutation
/// leaves the list exactly as it was.
pub fn apply_permutation<T: Orderable>(
    items: &mut Vec<T>,
    target: &[String],
    section: &str,
) -> Result<Vec<OrderDelta>> {
    if target.len() != items.len() {
        return Err(SectionError::order_conflict(
            section,
            format!(
                "permutation has {} ids but the list has {} entries",
                target.len(),
                items.len()
            ),
        ));
    }

    let mut seen = std::collections::HashSet::with_capacity(target.len());
    for id in target {
        if !seen.insert(id.as_str()) {
            return Err(SectionError::order_conflict(
                section,
                format!("duplicate id in permutation: {id}"),
            ));
        }
        if !items.iter().any(|i| &i.order_id() == id) {
            return Err(SectionError::entry_not_found(id));
        }
    }

    // Equal lengths, distinct ids, every id present: a bijection
    let mut deltas = Vec::new();
    for (index, id) in target.iter().enumerate() {
        let order = index as u32;
        if let Some(item) = items.iter_mut().find(|i| &i.order_id() == id) {
            if item.order() != order {
                item.set_order(order);
                deltas.push(OrderDelta {
                    id: id.clone(),
                    order,
                });
            }
        }
    }

    items.sort_by_key(Orderable::order);
    Ok(deltas)
}

/// The rank updates needed to bring a store in step after a local
/// mutation: every item in `current` whose rank differs from its rank
/// in `previous` (or that `previous` lacks).
pub fn changed_ranks<T: Orderable>(previous: &[T], current: &[T]) -> Vec<OrderDelta> {
    let before: std::collections::HashMap<String, u32> = previous
        .iter()
        .map(|item| (item.order_id(), item.order()))
        .collect();
    current
        .iter()
        .filter(|item| before.get(&item.order_id()) != Some(&item.order()))
        .map(|item| OrderDelta {
            id: item.order_id(),
            order: item.order(),
        })
        .collect()
}

/// Invariant check: sorted ranks equal `[0, 1, …, n-1]`.
pub fn is_dense<T: Orderable>(items: &[T]) -> bool {
    let mut orders: Vec<u32> = items.iter().map(Orderable::order).collect();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(index, order)| *order == index as u32)
}
