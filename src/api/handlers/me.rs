//! Self-service profile endpoints.
//!
//! Both operate on the account resolved by the bearer middleware, so a
//! caller can never reach anyone else's row through this surface.

use axum::{Extension, Json, extract::State};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::USER_TAG;
use crate::api::dto::{UpdateMeRequest, UserResponse};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// `GET /me` and `PUT /me`, token required.
pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_me, update_me))
}

/// Get the caller's profile
///
/// The body reflects the live account row, not the token claims.
#[utoipa::path(
    get,
    path = "/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Update the caller's profile
///
/// Only `name` and `phone` are client-editable; email, password and
/// role changes go through dedicated flows.
#[utoipa::path(
    put,
    path = "/me",
    tag = USER_TAG,
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(payload): ValidatedJson<UpdateMeRequest>,
) -> AppResult<Json<UserResponse>> {
    let updated = state
        .services
        .users
        .update_me(&user, payload.into_changes())
        .await?;
    Ok(Json(UserResponse::from(updated)))
}
