//! Connection pooling and embedded migrations.

mod pool;

pub use pool::{
    AsyncDbPool, MIGRATIONS, PooledConn, apply_pending_migrations, build_connection_pool,
};
