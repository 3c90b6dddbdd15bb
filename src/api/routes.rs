//! Route table and middleware stack.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{assign_request_id, log_request, require_auth};
use crate::state::AppState;

/// Assembles the application router.
///
/// # Route Groups
/// - `/api/hello`, `/api/register`, `/api/login` - public
/// - `/api/logout`, `/api/refresh` - bearer token required
/// - `/api/users`, `/api/resources`, `/api/reservations` - bearer token required
/// - `/health` - liveness and readiness probes, public
/// - `/swagger-ui` - interactive API documentation
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added
/// runs first): request IDs are assigned before logging so every log
/// line carries one, and the bearer gate wraps only the protected
/// route group.
pub fn build_router(state: AppState) -> Router {
    let account_routes = OpenApiRouter::new()
        .merge(handlers::me::me_routes())
        .merge(handlers::users::user_routes());

    let protected_routes = OpenApiRouter::new()
        .merge(handlers::auth::session_routes())
        .nest("/users", account_routes)
        .nest("/resources", handlers::resources::resource_routes())
        .nest("/reservations", handlers::reservations::reservation_routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = OpenApiRouter::new()
        .merge(handlers::hello::hello_routes())
        .merge(handlers::auth::credential_routes())
        .merge(protected_routes);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Logging runs after assign_request_id has set the ID
        .layer(middleware::from_fn(log_request))
        .layer(middleware::from_fn(assign_request_id))
        .with_state(state)
}
