//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum menu item name length
pub const MAX_NAME_LEN: u64 = 255;
/// Maximum menu item description length
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

/// Menu item entity
///
/// The authoritative catalog record. Order lines copy a snapshot of
/// name/description/price at the time an item is added, so editing or
/// deleting a menu item never rewrites order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Positive price with 2 fraction digits
    pub price: Decimal,
}

/// Point-in-time view of a menu item, copied into order lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemSnapshot {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl From<MenuItem> for MenuItemSnapshot {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
        }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub price: Decimal,
}

/// Update menu item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
}
