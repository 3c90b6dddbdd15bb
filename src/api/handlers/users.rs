//! User administration request handlers.
//!
//! Listing, inspecting and deleting accounts is restricted to admins;
//! the service layer enforces the policy.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::USER_TAG;
use crate::api::dto::{MessageResponse, UserResponse};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

/// `GET /`, `GET /{id}` and `DELETE /{id}` over accounts, all admin
/// only.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(get_user, delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.list_users(&caller).await?;
    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// Show one user
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The requested user", body = UserResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.show_user(&caller, id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Soft-delete a user
///
/// The row is tombstoned rather than removed, so the account stops
/// resolving for reads and authentication but remains in storage.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete_user(&caller, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
