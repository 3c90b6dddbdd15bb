//! Renders [`AppError`] values as JSON responses.
//!
//! The response body mirrors what clients of the previous PHP edition
//! of this service already parse: a top-level `message` plus, for
//! validation failures, an `errors` map of field name to message list.
//! Infrastructure failures are logged in full and sanitized down to a
//! generic body.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        (status, Json(body_for(&self))).into_response()
    }
}

/// Status mapping. Everything the client can fix by editing the
/// payload lands on 422; only malformed requests get 400.
fn status_for(error: &AppError) -> StatusCode {
    use AppError::*;

    match error {
        NotFound { .. } => StatusCode::NOT_FOUND,
        BadRequest { .. } => StatusCode::BAD_REQUEST,
        Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        Forbidden { .. } => StatusCode::FORBIDDEN,
        Duplicate { .. }
        | Validation { .. }
        | ValidationErrors { .. }
        | UnprocessableContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Database { .. } | Configuration { .. } | Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn body_for(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound { entity, .. } => {
            ErrorResponse::new(&format!("{} not found.", capitalize(entity)))
        }
        AppError::Duplicate { field, .. } => {
            let message = format!("The {} has already been taken.", field.replace('_', " "));
            let fields = BTreeMap::from([(field.clone(), vec![message.clone()])]);
            ErrorResponse::with_errors(&message, fields)
        }
        AppError::Validation { field, reason } => {
            let fields = BTreeMap::from([(field.clone(), vec![reason.clone()])]);
            ErrorResponse::with_errors(reason, fields)
        }
        AppError::ValidationErrors { errors } => {
            // Clients display the message of the first failing field.
            let message = errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "The given data was invalid.".to_string());

            let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for error in errors {
                fields
                    .entry(error.field.clone())
                    .or_default()
                    .push(error.message.clone());
            }
            ErrorResponse::with_errors(&message, fields)
        }
        AppError::BadRequest { message }
        | AppError::UnprocessableContent { message }
        | AppError::Unauthorized { message }
        | AppError::Forbidden { message } => ErrorResponse::new(message),
        AppError::ConnectionPool { .. } => ErrorResponse::new("Database connection unavailable"),
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            ErrorResponse::new("Server Error")
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
