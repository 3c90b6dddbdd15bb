//! Reservation wire types.
//!
//! Timestamps travel as RFC 3339 strings; parsing and the temporal rules
//! live in `ReservationService`. A `status` key on the create payload is
//! deliberately not modeled: new reservations always start as `pending`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Reservation, ReservationStatus};

// ============================================================================
// Request payloads
// ============================================================================

/// Body of `POST /reservations`.
#[derive(Debug, Validate, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(required(message = "The resource id field is required."))]
    #[schema(example = 1)]
    pub resource_id: Option<i64>,
    #[validate(required(message = "The start time field is required."))]
    #[schema(example = "2026-09-01T10:00:00Z")]
    pub start_time: Option<String>,
    #[validate(required(message = "The end time field is required."))]
    #[schema(example = "2026-09-01T11:00:00Z")]
    pub end_time: Option<String>,
}

/// Body of `PUT`/`PATCH /reservations/{id}`.
///
/// Every field is optional; `status` only takes effect for admins and is
/// silently dropped for other callers.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    #[schema(example = 2)]
    pub resource_id: Option<i64>,
    #[schema(example = "2026-09-01T14:00:00Z")]
    pub start_time: Option<String>,
    #[schema(example = "2026-09-01T15:00:00Z")]
    pub end_time: Option<String>,
    #[schema(example = "approved")]
    pub status: Option<String>,
}

// ============================================================================
// Response payloads
// ============================================================================

/// A reservation as clients see it.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = 1)]
    pub resource_id: i64,
    #[schema(example = "2026-09-01T10:00:00Z")]
    pub start_time: String,
    #[schema(example = "2026-09-01T11:00:00Z")]
    pub end_time: String,
    #[schema(example = "pending")]
    pub status: ReservationStatus,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub updated_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            resource_id: reservation.resource_id,
            start_time: jiff::Timestamp::from(reservation.start_time).to_string(),
            end_time: jiff::Timestamp::from(reservation.end_time).to_string(),
            status: reservation.status,
            created_at: jiff::Timestamp::from(reservation.created_at).to_string(),
            updated_at: jiff::Timestamp::from(reservation.updated_at).to_string(),
        }
    }
}
