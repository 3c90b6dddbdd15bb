//! Async data access for the `users` table.
//!
//! Every read filters out soft-deleted rows. Deletion only stamps
//! `deleted_at`, so unique constraints keep covering removed accounts.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::checkout;
use crate::schema::users;

/// Cloning shares the underlying bb8 pool.
#[derive(Clone)]
pub struct UserRepo {
    pool: AsyncDbPool,
}

impl UserRepo {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a user whose password has already been hashed.
    pub async fn create(&self, record: NewUser) -> Result<User, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let user = diesel::insert_into(users::table)
            .values(&record)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let user = users::table
            .filter(users::id.eq(id))
            .filter(users::deleted_at.is_null())
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(user)
    }

    /// Soft-deleted accounts are invisible here, so their credentials
    /// no longer authenticate.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let user = users::table
            .filter(users::email.eq(email))
            .filter(users::deleted_at.is_null())
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let rows = users::table
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows)
    }

    /// Applies the non-`None` fields of `changes` to a live row.
    pub async fn update(&self, id: i64, changes: UpdateUser) -> Result<User, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let target = users::table
            .filter(users::id.eq(id))
            .filter(users::deleted_at.is_null());
        let user = diesel::update(target)
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(user)
    }

    /// Stamps `deleted_at`; returns the number of affected rows.
    /// Rows already deleted are not matched again.
    pub async fn soft_delete(&self, id: i64) -> Result<usize, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let now = jiff::Timestamp::now();
        let target = users::table
            .filter(users::id.eq(id))
            .filter(users::deleted_at.is_null());
        let affected = diesel::update(target)
            .set((
                users::deleted_at.eq(Some(Timestamp::from(now))),
                users::updated_at.eq(Timestamp::from(now)),
            ))
            .execute(&mut conn)
            .await?;

        Ok(affected)
    }
}
