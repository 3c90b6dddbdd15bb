//! Reservation service.
//!
//! Owns the booking rules: ownership checks through the policy module,
//! temporal validation of the reserved interval, and the admin-only
//! status field. Non-admin status changes are dropped without an error,
//! which is the intended permission model rather than a rejection.

use crate::api::dto::{CreateReservationRequest, UpdateReservationRequest};
use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::models::{NewReservation, Reservation, ReservationStatus, UpdateReservation, User};
use crate::policy::{self, Action};
use crate::repositories::{ReservationRepo, ResourceRepo};

/// Reservation service coordinating the reservation and resource
/// repositories.
///
/// Cloning is cheap since both repositories hold pooled connection
/// handles.
#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepo,
    resources: ResourceRepo,
}

impl ReservationService {
    pub fn new(reservations: ReservationRepo, resources: ResourceRepo) -> Self {
        Self {
            reservations,
            resources,
        }
    }

    /// Lists reservations scoped to the caller: admins see everything,
    /// everyone else sees only their own records.
    pub async fn list_reservations(&self, caller: &User) -> AppResult<Vec<Reservation>> {
        if caller.is_admin {
            self.reservations.list().await
        } else {
            self.reservations.list_by_user(caller.id).await
        }
    }

    /// Gets a single reservation, enforcing the owner-or-admin rule.
    pub async fn get_reservation(&self, caller: &User, id: i64) -> AppResult<Reservation> {
        let reservation = self.find_existing(id).await?;
        policy::authorize(caller, Action::ViewReservation(&reservation))?;
        Ok(reservation)
    }

    /// Creates a reservation owned by the caller.
    ///
    /// The stored status is always `pending`; any client-supplied status
    /// never reaches this point because the payload does not model one.
    pub async fn create_reservation(
        &self,
        caller: &User,
        payload: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        let resource_id = payload.resource_id.ok_or_else(|| {
            AppError::invalid_field("resource_id", "The resource id field is required.")
        })?;
        let start_raw = payload.start_time.ok_or_else(|| {
            AppError::invalid_field("start_time", "The start time field is required.")
        })?;
        let end_raw = payload.end_time.ok_or_else(|| {
            AppError::invalid_field("end_time", "The end time field is required.")
        })?;

        let mut failures = Vec::new();
        if !self.resources.exists(resource_id).await? {
            failures.push(ValidationFieldError::new(
                "resource_id",
                "The selected resource id is invalid.",
            ));
        }
        let (start_time, end_time) =
            match check_create_times(jiff::Timestamp::now(), &start_raw, &end_raw) {
                Ok(pair) => pair,
                Err(mut time_failures) => {
                    failures.append(&mut time_failures);
                    return Err(AppError::validation_errors(failures));
                }
            };
        if !failures.is_empty() {
            return Err(AppError::validation_errors(failures));
        }

        self.reservations
            .create(NewReservation {
                user_id: caller.id,
                resource_id,
                start_time: start_time.into(),
                end_time: end_time.into(),
                status: ReservationStatus::Pending,
            })
            .await
    }

    /// Partially updates a reservation under the owner-or-admin rule.
    ///
    /// Present fields are validated; a provided start must not lie in
    /// the past, and the interval rule compares a provided side against
    /// the stored value of the missing side. For non-admin callers a
    /// validated `status` is discarded and the update still succeeds.
    pub async fn update_reservation(
        &self,
        caller: &User,
        id: i64,
        payload: UpdateReservationRequest,
    ) -> AppResult<Reservation> {
        let reservation = self.find_existing(id).await?;
        policy::authorize(caller, Action::UpdateReservation(&reservation))?;

        let mut failures = Vec::new();
        if let Some(resource_id) = payload.resource_id {
            if !self.resources.exists(resource_id).await? {
                failures.push(ValidationFieldError::new(
                    "resource_id",
                    "The selected resource id is invalid.",
                ));
            }
        }
        let status = match resolve_status(caller.is_admin, payload.status.as_deref()) {
            Ok(status) => status,
            Err(failure) => {
                failures.push(failure);
                None
            }
        };
        let (start_time, end_time) = match check_update_times(
            jiff::Timestamp::now(),
            jiff::Timestamp::from(reservation.start_time.clone()),
            jiff::Timestamp::from(reservation.end_time.clone()),
            payload.start_time.as_deref(),
            payload.end_time.as_deref(),
        ) {
            Ok(pair) => pair,
            Err(mut time_failures) => {
                failures.append(&mut time_failures);
                (None, None)
            }
        };
        if !failures.is_empty() {
            return Err(AppError::validation_errors(failures));
        }

        let update_data = UpdateReservation {
            resource_id: payload.resource_id,
            start_time: start_time.map(Into::into),
            end_time: end_time.map(Into::into),
            status,
        };
        if update_data.is_empty() {
            return Ok(reservation);
        }
        self.reservations.update(id, update_data).await
    }

    /// Soft-deletes a reservation under the owner-or-admin rule.
    pub async fn delete_reservation(&self, caller: &User, id: i64) -> AppResult<()> {
        let reservation = self.find_existing(id).await?;
        policy::authorize(caller, Action::DeleteReservation(&reservation))?;
        let affected = self.reservations.soft_delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("Reservation", "id", id));
        }
        Ok(())
    }

    async fn find_existing(&self, id: i64) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation", "id", id))
    }
}

/// Resolves a raw `status` value into the changeset entry. An invalid
/// value is rejected for every caller; a valid value is applied for
/// admins and dropped for everyone else, so the update still succeeds
/// without a status change.
fn resolve_status(
    is_admin: bool,
    raw: Option<&str>,
) -> Result<Option<ReservationStatus>, ValidationFieldError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let status = raw
        .parse::<ReservationStatus>()
        .map_err(|_| ValidationFieldError::new("status", "The selected status is invalid."))?;
    Ok(is_admin.then_some(status))
}

fn parse_timestamp(field: &str, raw: &str) -> Result<jiff::Timestamp, ValidationFieldError> {
    raw.parse::<jiff::Timestamp>().map_err(|_| {
        ValidationFieldError::new(
            field,
            &format!("The {} field must be a valid date.", field.replace('_', " ")),
        )
    })
}

/// Parses and checks the create-time temporal rules: both bounds must be
/// valid timestamps, the start must not lie in the past and the end must
/// come after the start.
fn check_create_times(
    now: jiff::Timestamp,
    start_raw: &str,
    end_raw: &str,
) -> Result<(jiff::Timestamp, jiff::Timestamp), Vec<ValidationFieldError>> {
    let mut failures = Vec::new();
    let start = match parse_timestamp("start_time", start_raw) {
        Ok(ts) => {
            if ts < now {
                failures.push(ValidationFieldError::new(
                    "start_time",
                    "The start time field must be a date after or equal to now.",
                ));
            }
            Some(ts)
        }
        Err(failure) => {
            failures.push(failure);
            None
        }
    };
    let end = match parse_timestamp("end_time", end_raw) {
        Ok(ts) => Some(ts),
        Err(failure) => {
            failures.push(failure);
            None
        }
    };
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            failures.push(ValidationFieldError::new(
                "end_time",
                "The end time field must be a date after start time.",
            ));
        }
    }
    match (start, end) {
        (Some(start), Some(end)) if failures.is_empty() => Ok((start, end)),
        _ => Err(failures),
    }
}

/// Parses provided bounds and checks the update-time temporal rules. A
/// provided start must not lie in the past, and the interval rule runs
/// against the effective pair: a provided side is compared with the
/// stored value of the missing side. Returns the parsed values for the
/// changeset.
fn check_update_times(
    now: jiff::Timestamp,
    stored_start: jiff::Timestamp,
    stored_end: jiff::Timestamp,
    start_raw: Option<&str>,
    end_raw: Option<&str>,
) -> Result<(Option<jiff::Timestamp>, Option<jiff::Timestamp>), Vec<ValidationFieldError>> {
    let mut failures = Vec::new();
    let start = match start_raw {
        None => None,
        Some(raw) => match parse_timestamp("start_time", raw) {
            Ok(ts) => Some(ts),
            Err(failure) => {
                failures.push(failure);
                None
            }
        },
    };
    let end = match end_raw {
        None => None,
        Some(raw) => match parse_timestamp("end_time", raw) {
            Ok(ts) => Some(ts),
            Err(failure) => {
                failures.push(failure);
                None
            }
        },
    };
    if !failures.is_empty() {
        return Err(failures);
    }
    if let Some(ts) = start {
        if ts < now {
            failures.push(ValidationFieldError::new(
                "start_time",
                "The start time field must be a date after or equal to now.",
            ));
        }
    }
    if start_raw.is_some() || end_raw.is_some() {
        let effective_start = start.unwrap_or(stored_start);
        let effective_end = end.unwrap_or(stored_end);
        if effective_end <= effective_start {
            failures.push(ValidationFieldError::new(
                "end_time",
                "The end time field must be a date after start time.",
            ));
        }
    }
    if failures.is_empty() {
        Ok((start, end))
    } else {
        Err(failures)
    }
}
