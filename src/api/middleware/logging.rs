//! Per-request log lines.
//!
//! Opens one span per request carrying the method, path and request
//! id, then emits an event on entry and another on completion with the
//! status and elapsed time. The span fields make both events
//! correlatable without repeating themselves.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;

use super::RequestId;

pub async fn log_request(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map_or_else(|| "unknown".to_string(), |id| id.as_str().to_owned());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!("request", %method, %path, %request_id);

    // Span::enter guards are !Send; instrument the future instead.
    async move {
        tracing::info!("request started");

        let start = Instant::now();
        let response = next.run(request).await;

        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request finished"
        );

        response
    }
    .instrument(span)
    .await
}
