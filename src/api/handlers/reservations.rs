//! Reservation request handlers.
//!
//! Listing is automatically scoped: admins see every reservation,
//! everyone else sees only their own. Per-record access goes through
//! the ownership policy in the service layer.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    routing::patch,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::RESERVATION_TAG;
use crate::api::dto::{
    CreateReservationRequest, MessageResponse, ReservationResponse, UpdateReservationRequest,
};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Collection routes plus `GET`/`PUT`/`PATCH`/`DELETE` on `/{id}`;
/// per-record access is owner-or-admin.
pub fn reservation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_reservations, create_reservation))
        .routes(routes!(
            get_reservation,
            update_reservation,
            delete_reservation
        ))
        // PUT and PATCH are interchangeable for partial updates.
        .route("/{id}", patch(update_reservation))
}

/// List reservations
///
/// Admins receive every live reservation; other callers receive only
/// the ones they own.
#[utoipa::path(
    get,
    path = "/",
    tag = RESERVATION_TAG,
    responses(
        (status = 200, description = "Reservations visible to the caller", body = Vec<ReservationResponse>),
        (status = 401, description = "Invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_reservations(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let reservations = state
        .services
        .reservations
        .list_reservations(&caller)
        .await?;
    let responses: Vec<ReservationResponse> = reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Ok(Json(responses))
}

/// Create a reservation
///
/// The reservation is created for the caller and always starts out
/// pending, whatever the payload says.
#[utoipa::path(
    post,
    path = "/",
    tag = RESERVATION_TAG,
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Created reservation", body = ReservationResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    ValidatedJson(payload): ValidatedJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    let reservation = state
        .services
        .reservations
        .create_reservation(&caller, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

/// Show one reservation
#[utoipa::path(
    get,
    path = "/{id}",
    tag = RESERVATION_TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "The requested reservation", body = ReservationResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = state
        .services
        .reservations
        .get_reservation(&caller, id)
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// Update a reservation
///
/// Non-admin callers may move their own reservation; a `status` field
/// in their payload is dropped silently and the call still succeeds.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = RESERVATION_TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ReservationResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = state
        .services
        .reservations
        .update_reservation(&caller, id, payload)
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// Soft-delete a reservation
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RESERVATION_TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 401, description = "Invalid or missing token"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .reservations
        .delete_reservation(&caller, id)
        .await?;
    Ok(Json(MessageResponse::new("Foglalás törölve.")))
}
