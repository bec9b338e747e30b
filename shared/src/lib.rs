//! Shared domain types for the restaurant ordering backend.
//!
//! - [`models`] - Menu items, orders, users and their request payloads
//! - [`error`] - Unified error codes, [`AppError`] and [`ApiResponse`]

pub mod error;
pub mod models;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
