//! The error body every failing endpoint answers with.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Plain failures carry only `message`; validation failures add
/// `errors`, a map from field name to that field's messages. A
/// `BTreeMap` keeps the key order stable across responses.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Reservation not found.")]
    pub message: String,
    /// Present on 422 responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn with_errors(message: &str, errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            message: message.to_string(),
            errors: Some(errors),
        }
    }
}
