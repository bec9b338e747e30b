//! Authentication Middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;
use shared::models::UserRole;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;

/// Paths under /api/ that do not require a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/users/register", "/api/users/login", "/api/health"];

/// Require a valid `Authorization: Bearer <token>` header.
///
/// On success the parsed [`CurrentUser`] is injected into request
/// extensions for handlers and role middleware downstream.
///
/// Skipped for OPTIONS (CORS preflight), non-`/api/` paths and the
/// public routes above.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(path, "Request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|_| AppError::invalid_token("Invalid token claims"))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Require a specific role on routes layered below [`require_auth`].
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_role(UserRole::Owner)));
/// ```
pub fn require_role(
    role: UserRole,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if user.role != role {
                tracing::warn!(
                    user_id = user.id,
                    required = %role,
                    actual = %user.role,
                    "Role check failed"
                );
                return Err(AppError::forbidden(format!("Requires {role} role")));
            }

            Ok(next.run(req).await)
        })
    }
}
