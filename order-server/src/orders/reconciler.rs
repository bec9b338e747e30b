//! Line-Item Reconciler
//!
//! Pure functions that turn an order's current lines plus add/remove
//! multisets into the desired set of lines. No I/O happens here; the
//! service pre-fetches catalog snapshots and persists the result.
//!
//! Rules:
//! - Adding an id that already has a line merges into it: quantity grows
//!   and the snapshot (name/description/price) refreshes to the current
//!   catalog values. Otherwise a new line is appended.
//! - Removing `n` occurrences of an id deletes the line outright when
//!   `n >= quantity`, else decrements and refreshes the snapshot if the
//!   item still exists in the catalog (best effort; a deleted item keeps
//!   its old snapshot).
//! - Lines whose `menu_item_id` is NULL (catalog item deleted) are never
//!   matched by id and are left untouched.

use rust_decimal::Decimal;
use shared::models::{MenuItemSnapshot, OrderLine};
use std::collections::HashMap;

/// Collapse a multiset of ids into id -> count
pub fn count_frequency(ids: &[i64]) -> HashMap<i64, i32> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(*id).or_insert(0) += 1;
    }
    counts
}

fn apply_snapshot(line: &mut OrderLine, snapshot: &MenuItemSnapshot) {
    line.menu_item_name = Some(snapshot.name.clone());
    line.menu_item_description = snapshot.description.clone();
    line.menu_item_price = snapshot.price;
}

/// Apply removals in place. Returns the ids of lines that must be deleted
/// from storage (already removed from `lines`).
pub fn remove_items(
    lines: &mut Vec<OrderLine>,
    remove_counts: &HashMap<i64, i32>,
    catalog: &HashMap<i64, MenuItemSnapshot>,
) -> Vec<i64> {
    let mut deleted = Vec::new();
    lines.retain_mut(|line| {
        let Some(menu_item_id) = line.menu_item_id else {
            return true;
        };
        let Some(&count) = remove_counts.get(&menu_item_id) else {
            return true;
        };
        if count >= line.quantity {
            deleted.push(line.id);
            return false;
        }
        line.quantity -= count;
        if let Some(snapshot) = catalog.get(&menu_item_id) {
            apply_snapshot(line, snapshot);
        }
        true
    });
    deleted
}

/// Apply additions in place. Every id in `add_counts` must have an entry
/// in `catalog` (the service enforces this before calling). Iterates ids
/// in sorted order so new-line order is deterministic.
pub fn add_items(
    lines: &mut Vec<OrderLine>,
    add_counts: &HashMap<i64, i32>,
    catalog: &HashMap<i64, MenuItemSnapshot>,
    order_id: i64,
) {
    let mut ids: Vec<i64> = add_counts.keys().copied().collect();
    ids.sort_unstable();

    for id in ids {
        let count = add_counts[&id];
        let snapshot = &catalog[&id];
        match lines
            .iter_mut()
            .find(|line| line.menu_item_id == Some(id))
        {
            Some(line) => {
                line.quantity += count;
                apply_snapshot(line, snapshot);
            }
            None => lines.push(OrderLine {
                id: 0,
                order_id,
                menu_item_id: Some(id),
                menu_item_name: Some(snapshot.name.clone()),
                menu_item_description: snapshot.description.clone(),
                menu_item_price: snapshot.price,
                quantity: count,
            }),
        }
    }
}

/// Sum of line subtotals, exact decimal arithmetic
pub fn order_total(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(OrderLine::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: i64, name: &str, price: &str) -> MenuItemSnapshot {
        MenuItemSnapshot {
            id,
            name: name.into(),
            description: None,
            price: price.parse().unwrap(),
        }
    }

    fn line(id: i64, menu_item_id: Option<i64>, price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            id,
            order_id: 1,
            menu_item_id,
            menu_item_name: menu_item_id.map(|m| format!("item-{m}")),
            menu_item_description: None,
            menu_item_price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_count_frequency() {
        let counts = count_frequency(&[5, 5, 7, 5]);
        assert_eq!(counts.get(&5), Some(&3));
        assert_eq!(counts.get(&7), Some(&1));
        assert_eq!(counts.get(&9), None);
    }

    #[test]
    fn test_add_creates_new_line() {
        let mut lines = Vec::new();
        let catalog = HashMap::from([(5, snapshot(5, "Carbonara", "12.50"))]);
        add_items(&mut lines, &count_frequency(&[5, 5]), &catalog, 1);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, 0);
        assert_eq!(lines[0].menu_item_id, Some(5));
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].menu_item_name.as_deref(), Some("Carbonara"));
    }

    #[test]
    fn test_add_merges_and_adopts_current_price() {
        let mut lines = vec![line(10, Some(5), "10.00", 2)];
        let catalog = HashMap::from([(5, snapshot(5, "Carbonara", "12.50"))]);
        add_items(&mut lines, &count_frequency(&[5]), &catalog, 1);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, 10);
        assert_eq!(lines[0].quantity, 3);
        // merged line takes the current catalog price, not the old snapshot
        assert_eq!(lines[0].menu_item_price, "12.50".parse().unwrap());
    }

    #[test]
    fn test_partial_remove_decrements_and_refreshes() {
        let mut lines = vec![line(10, Some(5), "10.00", 3)];
        let catalog = HashMap::from([(5, snapshot(5, "Carbonara", "12.50"))]);
        let deleted = remove_items(&mut lines, &count_frequency(&[5]), &catalog);

        assert!(deleted.is_empty());
        assert_eq!(lines[0].id, 10);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].menu_item_price, "12.50".parse().unwrap());
    }

    #[test]
    fn test_partial_remove_keeps_snapshot_when_item_deleted_from_catalog() {
        let mut lines = vec![line(10, Some(5), "10.00", 3)];
        let deleted = remove_items(&mut lines, &count_frequency(&[5]), &HashMap::new());

        assert!(deleted.is_empty());
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].menu_item_price, "10.00".parse().unwrap());
    }

    #[test]
    fn test_remove_whole_line_when_count_reaches_quantity() {
        let mut lines = vec![line(10, Some(5), "10.00", 2), line(11, Some(6), "4.00", 1)];
        let deleted = remove_items(&mut lines, &count_frequency(&[5, 5, 5]), &HashMap::new());

        assert_eq!(deleted, vec![10]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, 11);
    }

    #[test]
    fn test_remove_unknown_id_is_ignored() {
        let mut lines = vec![line(10, Some(5), "10.00", 2)];
        let deleted = remove_items(&mut lines, &count_frequency(&[99]), &HashMap::new());

        assert!(deleted.is_empty());
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_remove_never_touches_orphaned_lines() {
        // menu_item_id NULL after catalog deletion; only id-bearing lines match
        let mut lines = vec![line(10, None, "10.00", 2)];
        let deleted = remove_items(&mut lines, &count_frequency(&[5]), &HashMap::new());

        assert!(deleted.is_empty());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let lines = vec![line(1, Some(5), "12.50", 2), line(2, Some(6), "0.99", 3)];
        assert_eq!(order_total(&lines), "27.97".parse().unwrap());
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
