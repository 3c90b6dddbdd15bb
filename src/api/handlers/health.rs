//! Health and probe endpoints.
//!
//! Load balancers and orchestrators poll these. Database connectivity
//! is tested against the pool directly rather than through the service
//! layer, so a probe reflects raw pool health.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// `GET /health`, `GET /health/ready` and `GET /health/live`.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Full health report including database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy, database reachable", body = HealthResponse),
        (status = 503, description = "Degraded, database unreachable", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state).await;
    let status = database.status;

    let report = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks: HashMap::from([("database".to_string(), database)]),
    };

    (status_code_for(status), Json(report))
}

/// Readiness probe: can the service reach its database.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Ready to accept traffic"),
        (status = 503, description = "Not ready, database unreachable")
    ),
    tag = HEALTH_TAG
)]
async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    status_code_for(probe_database(&state).await.status)
}

/// Liveness probe: touches no external dependency.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Process is up")
    ),
    tag = HEALTH_TAG
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn status_code_for(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn probe_database(state: &AppState) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let started = std::time::Instant::now();

    let outcome = match state.db_pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };

    let (status, message) = match outcome {
        Ok(()) => (HealthStatus::Healthy, "Connected".to_string()),
        Err(message) => (HealthStatus::Unhealthy, message),
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: Some(started.elapsed().as_millis() as u64),
    }
}
