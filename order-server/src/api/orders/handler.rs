//! Orders API Handlers
//!
//! Handlers translate the authenticated caller into an order scope
//! (customers act on their own orders, the owner on all of them) and
//! delegate to the order service.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{validate_items_update, validate_version};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Order, OrderCreate, OrderItemsUpdate, OrderStatus, OrderStatusUpdate, VersionedRequest,
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    /// Owner only; customers are always scoped to themselves
    pub customer_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/orders - Create an order from a multiset of menu item ids
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state
        .orders
        .create(current_user.id, &payload.menu_item_ids)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders - List orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    // Customers always see their own orders; the owner may filter
    let customer_id = match current_user.order_scope() {
        Some(own_id) => Some(own_id),
        None => query.customer_id,
    };

    let orders = state
        .orders
        .list(query.status, customer_id, limit, offset)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(id, current_user.order_scope()).await?;
    Ok(Json(order))
}

/// PATCH /api/orders/:id/items - Incremental add/remove line edit
pub async fn update_items(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemsUpdate>,
) -> AppResult<Json<Order>> {
    validate_items_update(&payload)?;
    let order = state
        .orders
        .update_items(id, current_user.order_scope(), &payload)
        .await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - Operator status override
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    validate_version(payload.version)?;
    let order = state.orders.update_status(id, &payload).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<VersionedRequest>,
) -> AppResult<Json<Order>> {
    validate_version(payload.version)?;
    let order = state
        .orders
        .cancel(id, current_user.order_scope(), payload.version)
        .await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/pay
pub async fn pay(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<VersionedRequest>,
) -> AppResult<Json<Order>> {
    validate_version(payload.version)?;
    let order = state
        .orders
        .pay(id, current_user.order_scope(), payload.version)
        .await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - Version-guarded hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VersionedRequest>,
) -> AppResult<Json<()>> {
    validate_version(payload.version)?;
    state.orders.delete(id, payload.version).await?;
    Ok(Json(()))
}
