//! Registration, login and token wire types.
//!
//! Every request field is `Option` so a missing key becomes a
//! validation message instead of a deserialization error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

/// Body of `POST /register`.
#[derive(Debug, Validate, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    #[schema(example = "Kiss Anna", max_length = 255)]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    #[schema(example = "anna@example.com", format = "email")]
    pub email: Option<String>,
    /// Plaintext on the wire; hashed before it reaches storage.
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    #[schema(example = "titkos-jelszo", format = "password", min_length = 8)]
    pub password: Option<String>,
}

/// Body of `POST /login`.
#[derive(Debug, Validate, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address.")
    )]
    #[schema(example = "anna@example.com", format = "email")]
    pub email: Option<String>,
    #[validate(required(message = "The password field is required."))]
    #[schema(example = "titkos-jelszo", format = "password")]
    pub password: Option<String>,
}

/// Body of the 201 answer to registration.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: RegisteredUser,
}

/// The freshly created account, stripped to what the client needs.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Kiss Anna")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Body returned by login and refresh.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Lifetime in seconds.
    #[schema(example = 3600)]
    pub expires_in: i64,
}

impl TokenResponse {
    /// Wraps a freshly issued token with its lifetime in seconds.
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_missing_fields_fail_validation() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_request_short_password_fails() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"Anna","email":"anna@example.com","password":"short"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        let messages: Vec<_> = fields["password"]
            .iter()
            .filter_map(|e| e.message.as_ref())
            .collect();
        assert_eq!(
            messages,
            vec!["The password field must be at least 8 characters."]
        );
    }

    #[test]
    fn test_login_request_rejects_invalid_email() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"not-an-email","password":"x"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse::bearer("abc".to_string(), 3600);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#
        );
    }
}
