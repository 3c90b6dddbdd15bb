//! Async data access for the `resources` table.
//!
//! Every read filters out soft-deleted rows. Deletion only stamps
//! `deleted_at`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewResource, Resource, UpdateResource};
use crate::repositories::checkout;
use crate::schema::resources;

/// Cloning shares the underlying bb8 pool.
#[derive(Clone)]
pub struct ResourceRepo {
    pool: AsyncDbPool,
}

impl ResourceRepo {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: NewResource) -> Result<Resource, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let resource = diesel::insert_into(resources::table)
            .values(&record)
            .returning(Resource::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(resource)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Resource>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let resource = resources::table
            .filter(resources::id.eq(id))
            .filter(resources::deleted_at.is_null())
            .select(Resource::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(resource)
    }

    /// Existence probe for reservation validation, which only needs the
    /// answer and not the row.
    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let found = resources::table
            .filter(resources::id.eq(id))
            .filter(resources::deleted_at.is_null())
            .select(resources::id)
            .first::<i64>(&mut conn)
            .await
            .optional()?;

        Ok(found.is_some())
    }

    pub async fn list(&self) -> Result<Vec<Resource>, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let rows = resources::table
            .filter(resources::deleted_at.is_null())
            .order(resources::id.asc())
            .select(Resource::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows)
    }

    /// Applies the non-`None` fields of `changes` to a live row.
    pub async fn update(&self, id: i64, changes: UpdateResource) -> Result<Resource, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let target = resources::table
            .filter(resources::id.eq(id))
            .filter(resources::deleted_at.is_null());
        let resource = diesel::update(target)
            .set(&changes)
            .returning(Resource::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(resource)
    }

    /// Stamps `deleted_at`; returns the number of affected rows.
    /// Rows already deleted are not matched again.
    pub async fn soft_delete(&self, id: i64) -> Result<usize, AppError> {
        let mut conn = checkout(&self.pool).await?;

        let now = jiff::Timestamp::now();
        let target = resources::table
            .filter(resources::id.eq(id))
            .filter(resources::deleted_at.is_null());
        let affected = diesel::update(target)
            .set((
                resources::deleted_at.eq(Some(Timestamp::from(now))),
                resources::updated_at.eq(Timestamp::from(now)),
            ))
            .execute(&mut conn)
            .await?;

        Ok(affected)
    }
}
