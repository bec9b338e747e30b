//! Order Engine Errors

use crate::db::repository::RepoError;
use serde_json::json;
use shared::models::OrderStatus;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Errors surfaced by the order engine
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("The following menu items do not exist: {0:?}")]
    MenuItemsNotFound(Vec<i64>),

    #[error("Order was modified by another request; fetch the latest version and retry")]
    VersionConflict,

    #[error("Order is {0} and can no longer be modified")]
    InvalidState(OrderStatus),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
            }
            OrderError::MenuItemsNotFound(ids) => AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("The following menu items do not exist: {ids:?}"),
            )
            .with_detail("missing_ids", json!(ids)),
            OrderError::VersionConflict => AppError::new(ErrorCode::VersionConflict),
            OrderError::InvalidState(status) => AppError::with_message(
                ErrorCode::InvalidOrderState,
                format!("Order is {status} and can no longer be modified"),
            ),
            OrderError::Forbidden(msg) => AppError::forbidden(msg),
            OrderError::Repo(repo) => repo.into(),
        }
    }
}
