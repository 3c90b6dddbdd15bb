//! The `migrate` subcommand.
//!
//! Applies, previews, or rolls back embedded schema migrations. The
//! diesel migration harness is synchronous, so database work runs on a
//! blocking thread.

use diesel::Connection;
use diesel::migration::Migration;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

pub struct MigrateCommand {
    settings: Settings,
}

impl MigrateCommand {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs the requested migration operation.
    ///
    /// `dry_run` lists pending migrations without touching the schema.
    /// `rollback` reverts that many of the most recent migrations.
    /// Without either, all pending migrations are applied.
    pub async fn run(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.settings.database.validate()?;

        if dry_run {
            return self.preview().await;
        }

        match rollback {
            Some(steps) => self.rollback(steps).await,
            None => self.apply_all().await,
        }
    }

    async fn preview(&self) -> AppResult<()> {
        println!("Inspecting schema state...");

        let pending = self
            .with_sync_connection(|conn| {
                let pending = conn
                    .pending_migrations(MIGRATIONS)
                    .map_err(|e| AppError::Database {
                        operation: "check pending migrations".to_string(),
                        source: anyhow::anyhow!("Migration error: {}", e),
                    })?;
                Ok(pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
            })
            .await?;

        if pending.is_empty() {
            println!("✓ Schema is up to date");
        } else {
            println!("{} migration(s) waiting to be applied:", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRe-run without --dry-run to apply them");
        }

        Ok(())
    }

    async fn apply_all(&self) -> AppResult<()> {
        println!("Applying migrations...");

        let applied = crate::db::apply_pending_migrations(&self.settings.database.url).await?;

        if applied.is_empty() {
            println!("✓ Nothing to apply, schema is current");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {}", name);
            }
        }

        Ok(())
    }

    async fn rollback(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Reverting {} migration(s)...", steps);

        self.with_sync_connection(move |conn| {
            let applied = conn
                .applied_migrations()
                .map_err(|e| AppError::Database {
                    operation: "list applied migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                })?;

            let available = applied.len();
            if available < steps as usize {
                return Err(AppError::Validation {
                    field: "rollback_steps".to_string(),
                    reason: format!(
                        "Cannot rollback {} migration(s), only {} have been applied",
                        steps, available
                    ),
                });
            }

            for _ in 0..steps {
                conn.revert_last_migration(MIGRATIONS)
                    .map_err(|e| AppError::Database {
                        operation: "revert last migration".to_string(),
                        source: anyhow::anyhow!("Rollback error: {}", e),
                    })?;
            }

            Ok(())
        })
        .await?;

        println!("✓ Reverted {} migration(s)", steps);

        Ok(())
    }

    /// Opens a synchronous connection on a blocking thread and hands it
    /// to `task`.
    async fn with_sync_connection<T, F>(&self, task: F) -> AppResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let database_url = self.settings.database.url.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: "establish migration connection".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                })?;
            task(&mut conn)
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }
}
