//! Menu Items API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu-items | GET | token |
//! | /api/menu-items/{id} | GET | token |
//! | /api/menu-items | POST | owner |
//! | /api/menu-items/{id} | PUT | owner |
//! | /api/menu-items/{id} | DELETE | owner |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::UserRole;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    // Reads: any authenticated user can browse the menu
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // Writes: owner only
    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(UserRole::Owner)));

    read_routes.merge(write_routes)
}
