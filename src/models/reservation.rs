use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Lifecycle state of a reservation, stored as lowercase text
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "rejected" => Ok(ReservationStatus::Rejected),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Unrecognized reservation status: {}", s)),
        }
    }
}

impl diesel::query_builder::QueryId for ReservationStatus {
    type QueryId = ReservationStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for ReservationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for ReservationStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        ReservationStatus::from_str(&s).map_err(Into::into)
    }
}

/// Booking row linking a user to a resource over a time interval.
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub resource_id: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: ReservationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Insert payload. `status` is always written explicitly so creation
/// cannot inherit a caller-provided state.
#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::reservations)]
pub struct NewReservation {
    pub user_id: i64,
    pub resource_id: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: ReservationStatus,
}

/// Partial-update changeset.
#[derive(Clone, Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::reservations)]
pub struct UpdateReservation {
    pub resource_id: Option<i64>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub status: Option<ReservationStatus>,
}

impl UpdateReservation {
    /// True when no field is set, in which case no UPDATE should be issued.
    pub fn is_empty(&self) -> bool {
        self.resource_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Approved,
            ReservationStatus::Rejected,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(ReservationStatus::from_str("confirmed").is_err());
        assert!(ReservationStatus::from_str("PENDING").is_err());
        assert!(ReservationStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }

    #[test]
    fn test_empty_changeset_is_detected() {
        let update = UpdateReservation::default();
        assert!(update.is_empty());

        let update = UpdateReservation {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
