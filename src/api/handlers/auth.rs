//! Registration, login and the token lifecycle.
//!
//! `credential_routes` is mounted without middleware; `session_routes` sits
//! behind the bearer check, so its handlers can rely on the `User`
//! extension being present.

use axum::{Extension, Json, extract::State, http::StatusCode};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, TokenResponse,
};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// `POST /register` and `POST /login`, callable without a token.
pub fn credential_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
}

/// `POST /logout` and `POST /refresh` for authenticated callers.
pub fn session_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(logout))
        .routes(routes!(refresh))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 422, description = "Validation failed or email already taken")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.services.auth.register(payload).await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let issued = state.services.auth.login(payload).await?;
    Ok(Json(TokenResponse::bearer(
        issued.access_token,
        issued.expires_in,
    )))
}

/// End the current session
///
/// Tokens are stateless, so logout is a client-side discard; the
/// endpoint exists so clients get a positive confirmation.
#[utoipa::path(
    post,
    path = "/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn logout(Extension(_user): Extension<User>) -> Json<MessageResponse> {
    Json(MessageResponse::new("Successfully logged out"))
}

/// Issue a fresh token for the current session
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Fresh token issued", body = TokenResponse),
        (status = 401, description = "Invalid or missing token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn refresh(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> AppResult<Json<TokenResponse>> {
    let issued = state.services.auth.refresh(&user)?;
    Ok(Json(TokenResponse::bearer(
        issued.access_token,
        issued.expires_in,
    )))
}
