//! Orders API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | customer |
//! | /api/orders | GET | token (customers see only their own) |
//! | /api/orders/{id} | GET | token (scoped) |
//! | /api/orders/{id}/items | PATCH | token (scoped) |
//! | /api/orders/{id}/status | PUT | owner |
//! | /api/orders/{id}/cancel | POST | token (scoped) |
//! | /api/orders/{id}/pay | POST | token (scoped) |
//! | /api/orders/{id} | DELETE | owner |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::UserRole;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let scoped_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items", patch(handler::update_items))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/pay", post(handler::pay));

    // Operator routes: status override and hard delete
    let owner_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(UserRole::Owner)));

    scoped_routes.merge(owner_routes)
}
