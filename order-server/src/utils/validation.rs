//! Input validation helpers
//!
//! Structural checks on request payloads, applied before any storage or
//! reconciler code runs. SQLite TEXT has no built-in length enforcement.

use rust_decimal::Decimal;
use shared::AppError;
use shared::models::OrderItemsUpdate;
use std::collections::HashSet;
use uuid::Uuid;

// ── Text length limits ──────────────────────────────────────────────

/// Menu item names
pub const MAX_NAME_LEN: usize = 255;

/// Menu item descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Domain checks ───────────────────────────────────────────────────

/// Prices must be positive with at most 2 fraction digits.
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::validation("price must be positive"));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::validation(
            "price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

/// A version token must be a real token, not the nil uuid.
pub fn validate_version(version: Uuid) -> Result<(), AppError> {
    if version.is_nil() {
        return Err(AppError::validation("version must not be empty"));
    }
    Ok(())
}

/// Structural checks on a line-item edit:
/// - the add/remove union must be non-empty
/// - the same id must not appear on both sides
/// - the version token must be non-nil
pub fn validate_items_update(payload: &OrderItemsUpdate) -> Result<(), AppError> {
    if payload.add_menu_item_ids.is_empty() && payload.remove_menu_item_ids.is_empty() {
        return Err(AppError::validation(
            "at least one menu item id to add or remove is required",
        ));
    }

    let add: HashSet<i64> = payload.add_menu_item_ids.iter().copied().collect();
    let remove: HashSet<i64> = payload.remove_menu_item_ids.iter().copied().collect();
    let mut overlap: Vec<i64> = add.intersection(&remove).copied().collect();
    if !overlap.is_empty() {
        overlap.sort_unstable();
        return Err(AppError::validation(format!(
            "menu item ids cannot be both added and removed: {overlap:?}"
        )));
    }

    validate_version(payload.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(add: Vec<i64>, remove: Vec<i64>) -> OrderItemsUpdate {
        OrderItemsUpdate {
            add_menu_item_ids: add,
            remove_menu_item_ids: remove,
            version: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_items_update_requires_nonempty_union() {
        assert!(validate_items_update(&update(vec![], vec![])).is_err());
        assert!(validate_items_update(&update(vec![1], vec![])).is_ok());
        assert!(validate_items_update(&update(vec![], vec![1])).is_ok());
    }

    #[test]
    fn test_items_update_rejects_overlap() {
        let err = validate_items_update(&update(vec![1, 2], vec![2, 3])).unwrap_err();
        assert!(err.message.contains("[2]"));
    }

    #[test]
    fn test_items_update_rejects_nil_version() {
        let mut payload = update(vec![1], vec![]);
        payload.version = Uuid::nil();
        assert!(validate_items_update(&payload).is_err());
    }

    #[test]
    fn test_price_limits() {
        assert!(validate_price("9.99".parse().unwrap()).is_ok());
        assert!(validate_price("10".parse().unwrap()).is_ok());
        assert!(validate_price("0".parse().unwrap()).is_err());
        assert!(validate_price("-1".parse().unwrap()).is_err());
        assert!(validate_price("9.999".parse().unwrap()).is_err());
        // trailing zeros beyond 2 places are fine once normalized
        assert!(validate_price("9.9900".parse().unwrap()).is_ok());
    }
}
