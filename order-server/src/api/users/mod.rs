//! Users API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/users/register | POST | none |
//! | /api/users/login | POST | none |
//! | /api/users/me | GET | token |
//! | /api/users/me | PUT | token |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me).put(handler::update_me))
}
