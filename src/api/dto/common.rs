//! Shared response DTOs used across several endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Response carrying only a confirmation message.
///
/// Used by the hello probe, logout and the delete endpoints.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "API works!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
