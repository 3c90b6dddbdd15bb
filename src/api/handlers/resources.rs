//! Bookable resource request handlers.
//!
//! Any authenticated user can read resources; mutations are admin-only.
//! Payloads deliberately arrive unvalidated so the service can apply
//! the admin check before field validation, matching the wire contract
//! where a non-admin gets 403 even for an invalid payload.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::RESOURCE_TAG;
use crate::api::dto::{
    CreateResourceRequest, MessageResponse, ResourceResponse, UpdateResourceRequest,
};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

/// Collection routes plus `GET`/`PUT`/`DELETE` on `/{id}`; reads are
/// open to any authenticated caller, writes are admin only.
pub fn resource_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_resources, create_resource))
        .routes(routes!(get_resource, update_resource, delete_resource))
}

/// List all resources
#[utoipa::path(
    get,
    path = "/",
    tag = RESOURCE_TAG,
    responses(
        (status = 200, description = "All resources", body = Vec<ResourceResponse>),
        (status = 401, description = "Invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_resources(
    State(state): State<AppState>,
    Extension(_caller): Extension<User>,
) -> AppResult<Json<Vec<ResourceResponse>>> {
    let resources = state.services.resources.list_resources().await?;
    let responses: Vec<ResourceResponse> =
        resources.into_iter().map(ResourceResponse::from).collect();
    Ok(Json(responses))
}

/// Create a resource
#[utoipa::path(
    post,
    path = "/",
    tag = RESOURCE_TAG,
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Created resource", body = ResourceResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Json(payload): Json<CreateResourceRequest>,
) -> AppResult<(StatusCode, Json<ResourceResponse>)> {
    let resource = state
        .services
        .resources
        .create_resource(&caller, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ResourceResponse::from(resource))))
}

/// Show one resource
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RESOURCE_TAG,
    params(
        ("id" = i64, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "The requested resource", body = ResourceResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 404, description = "Resource not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_resource(
    State(state): State<AppState>,
    Extension(_caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<ResourceResponse>> {
    let resource = state.services.resources.get_resource(id).await?;
    Ok(Json(ResourceResponse::from(resource)))
}

/// Update a resource
///
/// A missing id answers 404 before the role check runs, even for
/// non-admin callers.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = RESOURCE_TAG,
    params(
        ("id" = i64, Path, description = "Resource ID")
    ),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Updated resource", body = ResourceResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Resource not found"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateResourceRequest>,
) -> AppResult<Json<ResourceResponse>> {
    let resource = state
        .services
        .resources
        .update_resource(&caller, id, payload)
        .await?;
    Ok(Json(ResourceResponse::from(resource)))
}

/// Soft-delete a resource
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RESOURCE_TAG,
    params(
        ("id" = i64, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Resource not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.resources.delete_resource(&caller, id).await?;
    Ok(Json(MessageResponse::new("Erőforrás törölve.")))
}
