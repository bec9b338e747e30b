//! API Route Modules
//!
//! - [`health`] - health check
//! - [`users`] - registration, login, profile
//! - [`menu_items`] - menu catalog CRUD
//! - [`orders`] - order lifecycle and line-item edits

pub mod health;
pub mod menu_items;
pub mod orders;
pub mod users;
