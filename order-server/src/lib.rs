//! Order Server - restaurant ordering backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful routes for users, menu and orders
//! - **Authentication** (`auth`): JWT + Argon2
//! - **Database** (`db`): embedded SQLite via sqlx, migrations on startup
//! - **Order engine** (`orders`): line-item reconciliation with optimistic
//!   concurrency on an opaque version token
//!
//! # Module layout
//!
//! ```text
//! order-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, passwords, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool + repositories
//! ├── orders/        # reconciler, lifecycle, service
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use utils::{AppError, AppResult};

pub use shared::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};
