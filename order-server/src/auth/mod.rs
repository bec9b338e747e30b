//! Authentication Module
//!
//! JWT tokens, argon2 password hashing and the request middleware that
//! gates /api/ routes.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use password::{hash_password, verify_password};
