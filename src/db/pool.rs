//! bb8 pool construction over `diesel-async`, plus the embedded
//! migration set.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};

/// SQL migrations compiled into the binary. Applied by the `migrate`
/// subcommand and, when `database.auto_migrate` is set, at server
/// startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Shared pool handle. `Clone` bumps an internal `Arc`, so the alias
/// can be stored directly in state structs.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// A connection checked out of [`AsyncDbPool`], returned on drop.
pub type PooledConn<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Builds the pool described by `[database]`. Sizing and the checkout
/// timeout come from configuration, so the same binary runs with a
/// single connection in tests and a full pool in production.
pub async fn build_connection_pool(config: &DatabaseSettings) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
}

/// Applies every pending embedded migration and returns their
/// versions, oldest first.
///
/// The diesel harness is synchronous, so the work runs on a blocking
/// thread over its own short-lived connection.
pub async fn apply_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        use diesel::{Connection, PgConnection};
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&url).map_err(|e| AppError::Database {
            operation: "connect for migrations".to_string(),
            source: anyhow::Error::new(e),
        })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!(e),
            })?;

        Ok(applied.into_iter().map(|v| v.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?
}
