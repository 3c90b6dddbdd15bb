use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON extractor that applies `validator` rules before the handler
/// runs.
///
/// Body problems arrive as [`JsonRejection`] and convert to the
/// matching `AppError`; rule violations become
/// `AppError::ValidationErrors`, one entry per offending field.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> AppResult<Self> {
        let Json(payload) = Json::<T>::from_request(request, state).await?;
        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Validate, Deserialize)]
    struct Applicant {
        #[validate(required(message = "The name field is required."))]
        name: Option<String>,
        #[validate(
            required(message = "The email field is required."),
            email(message = "The email field must be a valid email address.")
        )]
        email: Option<String>,
        #[validate(range(min = 18, max = 100, message = "The age field must be between 18 and 100."))]
        age: Option<u8>,
    }

    async fn extract(body: &str) -> Result<Applicant, AppError> {
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/probe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        ValidatedJson::<Applicant>::from_request(request, &())
            .await
            .map(|ValidatedJson(payload)| payload)
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_the_handler() {
        let applicant = extract(r#"{"name":"Anna","email":"anna@example.com","age":25}"#)
            .await
            .unwrap();

        assert_eq!(applicant.name.as_deref(), Some("Anna"));
        assert_eq!(applicant.email.as_deref(), Some("anna@example.com"));
        assert_eq!(applicant.age, Some(25));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_reported_by_name() {
        let error = extract(r#"{"email":"anna@example.com"}"#).await.unwrap_err();

        let AppError::ValidationErrors { errors } = error else {
            panic!("expected ValidationErrors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "The name field is required.");
    }

    #[tokio::test]
    async fn test_format_rule_failure_carries_its_message() {
        let error = extract(r#"{"name":"Anna","email":"not-an-email"}"#)
            .await
            .unwrap_err();

        let AppError::ValidationErrors { errors } = error else {
            panic!("expected ValidationErrors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(
            errors[0].message,
            "The email field must be a valid email address."
        );
    }

    #[tokio::test]
    async fn test_field_errors_are_sorted_alphabetically() {
        let error = extract(r#"{"email":"not-an-email","age":150}"#)
            .await
            .unwrap_err();

        let AppError::ValidationErrors { errors } = error else {
            panic!("expected ValidationErrors");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "email", "name"]);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_unprocessable() {
        let error = extract(r#"{"name":"Anna","email":"anna@example.com","age":"old"}"#)
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::UnprocessableContent { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_bad_request() {
        let error = extract(r#"{"name": "Anna", "#).await.unwrap_err();

        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_a_bad_request() {
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/probe")
            .body(Body::from(r#"{"name":"Anna"}"#))
            .unwrap();

        let error = ValidatedJson::<Applicant>::from_request(request, &())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadRequest { .. }));
    }
}
