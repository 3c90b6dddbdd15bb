//! Bearer-token authentication.
//!
//! Each protected request must carry `Authorization: Bearer <jwt>`.
//! After signature and expiry checks the account is re-read from the
//! database, so deleted users drop out immediately and handlers
//! receive a live [`User`](crate::models::User) extension instead of
//! stale claims.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::verify_token;

/// Rejects the request with 401 unless it carries a valid token that
/// maps to an existing account.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let claims = verify_token(token, &state.jwt.secret)?;

    // Tokens outlive account changes; a deleted account must not
    // authenticate even with a syntactically valid token.
    let user = state
        .services
        .users
        .find_active_user(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid token".to_string(),
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|raw| raw.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })
}
