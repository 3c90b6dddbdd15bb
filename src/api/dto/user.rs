//! Wire shapes for the profile and user-directory endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{UpdateUser, User};

// ============================================================================
// Request payloads
// ============================================================================

/// Body of `PUT /me`.
///
/// All fields are optional; absent fields are left untouched.
#[derive(Debug, Validate, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    #[validate(length(
        max = 255,
        message = "The name field must not be greater than 255 characters."
    ))]
    #[schema(example = "Kiss Anna", max_length = 255)]
    pub name: Option<String>,
    #[validate(length(
        max = 50,
        message = "The phone field must not be greater than 50 characters."
    ))]
    #[schema(example = "+36 30 123 4567", max_length = 50)]
    pub phone: Option<String>,
}

impl UpdateMeRequest {
    pub fn into_changes(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            phone: self.phone,
        }
    }
}

// ============================================================================
// Response payloads
// ============================================================================

/// Public view of an account. The password hash never leaves the
/// model layer.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Kiss Anna")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
    #[schema(example = "+36 30 123 4567")]
    pub phone: Option<String>,
    #[schema(example = false)]
    pub is_admin: bool,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            is_admin: user.is_admin,
            created_at: jiff::Timestamp::from(user.created_at).to_string(),
            updated_at: jiff::Timestamp::from(user.updated_at).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Kiss Anna".to_string(),
            email: "anna@example.com".to_string(),
            password: "$argon2id$v=19$secret-hash".to_string(),
            phone: None,
            is_admin: false,
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
            updated_at: jiff::Timestamp::UNIX_EPOCH.into(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_password_is_never_serialized() {
        let response = UserResponse::from(sample_user());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_timestamps_render_as_rfc3339() {
        let response = UserResponse::from(sample_user());
        assert_eq!(response.created_at, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_oversized_name_fails_validation() {
        let request = UpdateMeRequest {
            name: Some("x".repeat(256)),
            phone: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_empty_update_converts_to_empty_changeset() {
        let request: UpdateMeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.into_changes().is_empty());
    }
}
