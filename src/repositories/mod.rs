//! Data access layer. Each repository owns a handle to the shared
//! connection pool and speaks Diesel; nothing above this module
//! touches the schema directly.

mod reservation_repo;
mod resource_repo;
mod user_repo;

pub use reservation_repo::ReservationRepo;
pub use resource_repo::ResourceRepo;
pub use user_repo::UserRepo;

use crate::db::{AsyncDbPool, PooledConn};
use crate::error::AppError;

/// One checkout per query keeps transactions short and lets bb8
/// multiplex the pool across concurrent requests.
async fn checkout(pool: &AsyncDbPool) -> Result<PooledConn<'_>, AppError> {
    pool.get().await.map_err(AppError::from)
}

/// One repository per aggregate, bundled for the service layer.
///
/// All members share the same bb8 pool, so `Clone` is a handful of
/// `Arc` bumps.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepo,
    pub resources: ResourceRepo,
    pub reservations: ReservationRepo,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepo::new(pool.clone()),
            resources: ResourceRepo::new(pool.clone()),
            reservations: ReservationRepo::new(pool),
        }
    }
}
