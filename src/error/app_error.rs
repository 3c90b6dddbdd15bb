use axum::extract::rejection::JsonRejection;
use thiserror::Error;

use crate::error::diesel_errors::map_diesel_error;

/// Every failure the service can produce.
///
/// Variants carry what the response renderer needs and nothing more;
/// the underlying cause rides along as an `anyhow` source where one
/// exists. HTTP mapping lives in the middleware layer, so this type
/// stays usable from the CLI as well.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// Lookup missed. `entity` is the client-facing name ("User"),
    /// `field`/`value` record what was searched.
    #[error("{entity} not found ({field}={value})")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    #[error("unprocessable content: {message}")]
    UnprocessableContent { message: String },

    /// Unique constraint hit.
    #[error("{entity}.{field} already taken: '{value}'")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Single-field rule failure raised outside the `validator` derive.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// One or more request fields failed validation.
    #[error("request validation failed")]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Query or statement failure. `operation` names what was being
    /// attempted in log-friendly words.
    #[error("database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// No connection could be checked out of the pool.
    #[error("connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    #[error("configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single field failure inside `AppError::ValidationErrors`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl ValidationFieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl AppError {
    pub fn not_found(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::Duplicate {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Builds a `ValidationErrors` carrying exactly one field failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::ValidationErrors {
            errors: vec![ValidationFieldError::new(field, message)],
        }
    }

    /// Wraps collected field failures, sorted by field for stable output.
    pub fn validation_errors(mut errors: Vec<ValidationFieldError>) -> Self {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self::ValidationErrors { errors }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal { source: value }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        Self::Configuration {
            key: "config".to_string(),
            source: anyhow::Error::new(value),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(value: diesel::result::Error) -> Self {
        map_diesel_error(value, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(value: diesel_async::pooled_connection::bb8::RunError) -> Self {
        Self::ConnectionPool {
            source: anyhow::Error::new(value),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = Vec::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", field));
                fields.push(ValidationFieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        // HashMap iteration order is unstable, keep responses deterministic
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::JsonDataError(err) => Self::UnprocessableContent {
                message: err.body_text(),
            },
            JsonRejection::JsonSyntaxError(err) => Self::BadRequest {
                message: err.body_text(),
            },
            other => Self::BadRequest {
                message: other.body_text(),
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct SampleRequest {
        #[validate(email(message = "The email field must be a valid email address."))]
        email: String,
        #[validate(length(
            max = 255,
            message = "The name field must not be greater than 255 characters."
        ))]
        name: String,
    }

    #[test]
    fn test_validator_errors_are_flattened_and_sorted() {
        let request = SampleRequest {
            email: "not-an-email".to_string(),
            name: "x".repeat(300),
        };

        let error = AppError::from(request.validate().unwrap_err());
        let AppError::ValidationErrors { errors } = error else {
            panic!("expected ValidationErrors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(
            errors[0].message,
            "The email field must be a valid email address."
        );
        assert_eq!(errors[1].field, "name");
    }

    #[test]
    fn test_not_found_accepts_numeric_values() {
        let error = AppError::not_found("Reservation", "id", 42);
        let AppError::NotFound {
            entity,
            field,
            value,
        } = error
        else {
            panic!("expected NotFound");
        };
        assert_eq!(entity, "Reservation");
        assert_eq!(field, "id");
        assert_eq!(value, "42");
    }

    #[test]
    fn test_invalid_field_builds_single_entry() {
        let error = AppError::invalid_field("status", "The selected status is invalid.");
        let AppError::ValidationErrors { errors } = error else {
            panic!("expected ValidationErrors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "status");
        assert_eq!(errors[0].message, "The selected status is invalid.");
    }

    #[test]
    fn test_anyhow_becomes_internal() {
        let error = AppError::from(anyhow::anyhow!("boom"));
        assert!(matches!(error, AppError::Internal { .. }));
    }
}
