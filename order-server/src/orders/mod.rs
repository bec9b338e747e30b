//! Order Engine
//!
//! Line-item reconciliation, lifecycle gates and optimistic concurrency
//! for orders. The flow for every mutation:
//!
//! 1. load the order and check ownership + lifecycle status
//! 2. resolve menu catalog snapshots (additions strict, removals best effort)
//! 3. run the pure reconciler over the in-memory lines
//! 4. compare-and-swap the header on its version token inside one
//!    transaction with the line writes

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod reconciler;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{DbCatalog, MenuCatalog};
pub use error::{OrderError, OrderResult};
pub use service::OrderService;
