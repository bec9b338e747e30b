//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories are free functions:
//! read paths take `&SqlitePool`, write paths that must join a transaction
//! take `&mut SqliteConnection` so the caller controls commit/rollback.
//!
//! Decimal columns (prices, totals) are stored as TEXT and parsed at the
//! row boundary; sqlite has no native decimal type and floats would lose
//! cents.

pub mod menu_item;
pub mod order;
pub mod user;

use shared::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::already_exists(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a TEXT decimal column, surfacing corruption as a database error
pub(crate) fn parse_decimal(raw: &str, column: &str) -> RepoResult<rust_decimal::Decimal> {
    raw.parse()
        .map_err(|e| RepoError::Database(format!("Invalid decimal in {column}: {e}")))
}
