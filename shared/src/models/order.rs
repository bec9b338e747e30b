//! Order Model
//!
//! Orders carry an opaque version token used for optimistic concurrency:
//! every successful mutation mints a fresh token and a caller must present
//! the token it last observed for its write to be accepted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Processing,
    Billed,
    Canceled,
    Closed,
}

impl OrderStatus {
    /// Storage representation (TEXT column)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Processing => "PROCESSING",
            Self::Billed => "BILLED",
            Self::Canceled => "CANCELED",
            Self::Closed => "CLOSED",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATED" => Some(Self::Created),
            "PROCESSING" => Some(Self::Processing),
            "BILLED" => Some(Self::Billed),
            "CANCELED" => Some(Self::Canceled),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of an order: a quantity of a specific (possibly now-deleted)
/// menu item at a snapshotted price.
///
/// `menu_item_id` becomes `None` when the referenced menu item is deleted
/// from the catalog; the denormalized name/description/price survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// 0 until persisted
    #[serde(default)]
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: Option<i64>,
    pub menu_item_name: Option<String>,
    pub menu_item_description: Option<String>,
    /// Price snapshot taken when the item was added (or last touched)
    pub menu_item_price: Decimal,
    pub quantity: i32,
}

impl OrderLine {
    /// Line subtotal: price x quantity, exact decimal arithmetic
    pub fn subtotal(&self) -> Decimal {
        self.menu_item_price * Decimal::from(self.quantity)
    }
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Always equals the sum of line subtotals after a successful commit
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Opaque concurrency stamp, regenerated on every mutation
    pub version: Uuid,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

// ==================== Request payloads ====================

/// Create order payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, message = "at least 1 menu item id is required"))]
    pub menu_item_ids: Vec<i64>,
}

/// Incremental line-item edit payload
///
/// `add_menu_item_ids` and `remove_menu_item_ids` are multisets: repeating
/// an id requests that quantity. The two sets must not overlap and their
/// union must be non-empty (enforced at the validation layer, before the
/// reconciler runs).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemsUpdate {
    #[serde(default)]
    pub add_menu_item_ids: Vec<i64>,
    #[serde(default)]
    pub remove_menu_item_ids: Vec<i64>,
    /// Version token the caller last observed
    pub version: Uuid,
}

/// Operator status override payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    pub version: Uuid,
}

/// Payload for operations that only need the version token (cancel, pay, delete)
#[derive(Debug, Clone, Deserialize)]
pub struct VersionedRequest {
    pub version: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Created,
            OrderStatus::Processing,
            OrderStatus::Billed,
            OrderStatus::Canceled,
            OrderStatus::Closed,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("SHIPPED"), None);
    }

    #[test]
    fn test_status_serde_uses_screaming_case() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
        let status: OrderStatus = serde_json::from_str("\"CANCELED\"").unwrap();
        assert_eq!(status, OrderStatus::Canceled);
    }

    #[test]
    fn test_line_subtotal() {
        let line = OrderLine {
            id: 1,
            order_id: 1,
            menu_item_id: Some(7),
            menu_item_name: Some("Margherita".into()),
            menu_item_description: None,
            menu_item_price: "9.99".parse().unwrap(),
            quantity: 3,
        };
        assert_eq!(line.subtotal(), "29.97".parse::<Decimal>().unwrap());
    }
}
