//! HTTP server lifecycle.
//!
//! Owns startup ordering: configuration checks, optional migrations,
//! pool construction, then the axum serve loop with graceful shutdown.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::build_router;
use crate::config::Environment;
use crate::config::settings::Settings;
use crate::db::{apply_pending_migrations, build_connection_pool};
use crate::state::AppState;

/// Runs the server until a shutdown signal arrives.
///
/// Fails fast on invalid JWT or database configuration, on pool
/// construction errors, and on bind errors.
pub async fn start(settings: Settings) -> anyhow::Result<()> {
    log_startup(&settings);
    check_required_sections(&settings)?;

    let state = build_state(&settings).await?;
    let router = build_router(state);

    serve(&settings, router).await
}

fn log_startup(settings: &Settings) {
    let environment = Environment::detect();
    tracing::info!(
        app_name = %settings.application.name,
        app_version = %settings.application.version,
        environment = %environment.as_str(),
        "Application starting"
    );

    // Secrets stay out of the log; only their presence is recorded.
    tracing::info!(
        host = %settings.server.host,
        port = %settings.server.port,
        request_timeout = %settings.server.request_timeout,
        keep_alive_timeout = %settings.server.keep_alive_timeout,
        db_max_connections = %settings.database.max_connections,
        db_min_connections = %settings.database.min_connections,
        auto_migrate = %settings.database.auto_migrate,
        log_level = %settings.logger.level,
        log_format = %settings.logger.format,
        token_expiration = %settings.jwt.token_expiration,
        jwt_secret_configured = %(!settings.jwt.secret.is_empty()),
        "Configuration loaded"
    );
}

/// JWT is excluded from `Settings::validate`, so the startup path checks
/// it here together with a fresh database check.
fn check_required_sections(settings: &Settings) -> anyhow::Result<()> {
    settings
        .jwt
        .validate()
        .inspect_err(|e| tracing::error!(error = %e, "JWT configuration rejected"))
        .context("JWT configuration validation failed")?;

    settings
        .database
        .validate()
        .inspect_err(|e| tracing::error!(error = %e, "Database configuration rejected"))
        .context("Database configuration validation failed")?;

    Ok(())
}

async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    if settings.database.auto_migrate {
        let applied = apply_pending_migrations(&settings.database.url).await?;
        tracing::info!(count = applied.len(), "Pending migrations applied");
    }

    let pool = build_connection_pool(&settings.database).await?;
    tracing::info!("Database connection pool ready");

    Ok(AppState::new(pool, settings.jwt.clone()))
}

async fn serve(settings: &Settings, router: axum::Router) -> anyhow::Result<()> {
    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .inspect_err(|e| tracing::error!(error = %e, address = %address, "Bind failed"))
        .with_context(|| format!("Failed to bind to {}", address))?;

    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Resolves when Ctrl+C or, on unix, SIGTERM is received.
async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c().await.expect("Ctrl+C handler install failed");
    };

    #[cfg(unix)]
    let sigterm = async {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler install failed");
        stream.recv().await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "Ctrl+C",
        _ = sigterm => "SIGTERM",
    };

    tracing::info!(signal = received, "Shutdown signal received, draining connections");
}
