//! Async data access for the `reservations` table.
//!
//! Every read filters out soft-deleted rows. Deletion only stamps
//! `deleted_at`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewReservation, Reservation, UpdateReservation};
use crate::repositories::checkout;
use crate::schema::reservations;

/// Cloning shares the underlying bb8 pool.
#[derive(Clone)]
pub struct ReservationRepo {
    pool: AsyncDbPool,
}

impl ReservationRepo {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: NewReservation) -> Result<Reservation, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let reservation = diesel::insert_into(reservations::table)
            .values(&record)
            .returning(Reservation::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(reservation)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let reservation = reservations::table
            .filter(reservations::id.eq(id))
            .filter(reservations::deleted_at.is_null())
            .select(Reservation::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(reservation)
    }

    /// Callers gate this behind an admin check; non-admins go through
    /// [`Self::list_by_user`] instead.
    pub async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let rows = reservations::table
            .filter(reservations::deleted_at.is_null())
            .order(reservations::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows)
    }

    pub async fn list_by_user(&self, owner_id: i64) -> Result<Vec<Reservation>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let rows = reservations::table
            .filter(reservations::user_id.eq(owner_id))
            .filter(reservations::deleted_at.is_null())
            .order(reservations::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows)
    }

    /// Applies the non-`None` fields of `changes` to a live row.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateReservation,
    ) -> Result<Reservation, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let target = reservations::table
            .filter(reservations::id.eq(id))
            .filter(reservations::deleted_at.is_null());
        let reservation = diesel::update(target)
            .set(&changes)
            .returning(Reservation::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(reservation)
    }

    /// Stamps `deleted_at`; returns the number of affected rows.
    /// Rows already deleted are not matched again.
    pub async fn soft_delete(&self, id: i64) -> Result<usize, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let now = jiff::Timestamp::now();
        let target = reservations::table
            .filter(reservations::id.eq(id))
            .filter(reservations::deleted_at.is_null());
        let affected = diesel::update(target)
            .set((
                reservations::deleted_at.eq(Some(Timestamp::from(now))),
                reservations::updated_at.eq(Timestamp::from(now)),
            ))
            .execute(&mut conn)
            .await?;

        Ok(affected)
    }
}
