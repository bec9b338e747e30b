//! Standardized error codes

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error classification by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// General request/resource errors
    General,
    /// Authentication errors (login, tokens)
    Auth,
    /// Permission / ownership errors
    Permission,
    /// Order domain errors
    Order,
    /// Menu domain errors
    Menu,
    /// System errors (database, internal)
    System,
}

/// Standardized error codes
///
/// Each code carries a stable numeric value, a default message and an
/// HTTP status mapping. Codes are grouped by thousand-ranges per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== General (0xxx) ====================
    /// Request validation failed (400)
    ValidationFailed = 2,
    /// Resource not found (404)
    NotFound = 3,
    /// Resource already exists (409)
    AlreadyExists = 4,
    /// Malformed request (400)
    InvalidRequest = 6,

    // ==================== Authentication (1xxx) ====================
    /// Not authenticated (401)
    NotAuthenticated = 1001,
    /// Invalid email or password (401)
    InvalidCredentials = 1002,
    /// Token expired (401)
    TokenExpired = 1003,
    /// Token invalid (401)
    TokenInvalid = 1004,

    // ==================== Permission (2xxx) ====================
    /// Permission denied (403)
    PermissionDenied = 2001,

    // ==================== Order (4xxx) ====================
    /// Order not found (404)
    OrderNotFound = 4001,
    /// Stale version token, order changed concurrently (409)
    VersionConflict = 4002,
    /// Mutation not allowed in the order's current status (422)
    InvalidOrderState = 4003,

    // ==================== Menu (6xxx) ====================
    /// One or more referenced menu items do not exist (404)
    MenuItemNotFound = 6001,

    // ==================== System (9xxx) ====================
    /// Internal server error (500)
    InternalError = 9001,
    /// Database error (500)
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::PermissionDenied => "Permission denied",
            Self::OrderNotFound => "Order not found",
            Self::VersionConflict => "Order was modified by another request",
            Self::InvalidOrderState => "Operation not allowed in the current order status",
            Self::MenuItemNotFound => "Menu item not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// HTTP status mapping
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound | Self::OrderNotFound | Self::MenuItemNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::VersionConflict => StatusCode::CONFLICT,
            Self::InvalidOrderState => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Domain category of this code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Order,
            6000..=6999 => ErrorCategory::Menu,
            _ => ErrorCategory::System,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error returned when converting an unknown numeric value to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            6 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            2001 => Self::PermissionDenied,
            4001 => Self::OrderNotFound,
            4002 => Self::VersionConflict,
            4003 => Self::InvalidOrderState,
            6001 => Self::MenuItemNotFound,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::VersionConflict,
            ErrorCode::InvalidOrderState,
            ErrorCode::MenuItemNotFound,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::VersionConflict.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::MenuItemNotFound.category(), ErrorCategory::Menu);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::VersionConflict.to_string(), "E4002");
    }
}
