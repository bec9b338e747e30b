//! Utility Module

pub mod logger;
pub mod validation;

pub use shared::{AppError, AppResult};
