//! Users API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use validator::Validate;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::utils::{AppError, AppResult};
use shared::models::{AccessToken, LoginRequest, RegisterRequest, UserProfile, UserRole, UserUpdate};

/// POST /api/users/register - Register a customer account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<UserProfile>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let hash = hash_password(&payload.password)?;
    let created = user::create(
        &state.pool,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &hash,
        UserRole::Customer,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => {
            AppError::already_exists(format!("User with email {}", payload.email))
        }
        other => other.into(),
    })?;

    tracing::info!(user_id = created.id, "Customer registered");
    Ok(Json(created.into()))
}

/// POST /api/users/login - Exchange credentials for an access token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AccessToken>> {
    // Same error for unknown email and wrong password
    let found = user::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &found.password)? {
        tracing::warn!(email = %payload.email, "Failed login attempt");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(found.id, &found.email, found.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(Json(AccessToken {
        access_token: token,
    }))
}

/// GET /api/users/me - Current user's profile
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserProfile>> {
    let found = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?;
    Ok(Json(found.into()))
}

/// PUT /api/users/me - Update name and optionally password
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let hash = match &payload.new_password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let updated = user::update(
        &state.pool,
        current_user.id,
        &payload.first_name,
        &payload.last_name,
        hash.as_deref(),
    )
    .await?;

    Ok(Json(updated.into()))
}
