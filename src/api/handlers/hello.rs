//! Hello endpoint handler.
//!
//! A public smoke-test endpoint for checking that the API is routable
//! without credentials.

use axum::Json;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::MessageResponse;
use crate::state::AppState;

pub fn hello_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(hello))
}

/// Public smoke test
#[utoipa::path(
    get,
    path = "/hello",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "API is reachable", body = MessageResponse)
    )
)]
async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("API works!"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hello_message() {
        let Json(response) = hello().await;
        assert_eq!(response.message, "API works!");
    }
}
