//! Resource wire types.
//!
//! The `type` column is called `kind` in Rust code; serde renames keep
//! the wire name `type`. Validation for these payloads lives in
//! `ResourceService`, which runs after the admin check and reports
//! failures under the wire field name.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::{NewResource, Resource, UpdateResource};

// ============================================================================
// Request payloads
// ============================================================================

/// Body of `POST /resources`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    #[schema(example = "Tárgyaló A", max_length = 255)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "room", max_length = 255)]
    pub kind: Option<String>,
    #[schema(example = "Elsőemeleti tárgyaló projektorral")]
    pub description: Option<String>,
    /// Defaults to true when omitted
    #[schema(example = true)]
    pub available: Option<bool>,
}

impl CreateResourceRequest {
    /// Callers must have run validation first; missing required fields
    /// fall back to empty strings rather than panicking.
    pub fn into_record(self) -> NewResource {
        NewResource {
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            description: self.description,
            available: self.available,
        }
    }
}

/// Body of `PUT /resources/{id}`.
///
/// `description` distinguishes "absent" from "set to null": an absent key
/// leaves the column untouched, an explicit null clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateResourceRequest {
    #[schema(example = "Tárgyaló B", max_length = 255)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "equipment", max_length = 255)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(example = false)]
    pub available: Option<bool>,
}

impl UpdateResourceRequest {
    pub fn into_changes(self) -> UpdateResource {
        UpdateResource {
            name: self.name,
            kind: self.kind,
            description: self.description,
            available: self.available,
        }
    }
}

/// Deserializes a nullable field into `Some(None)` for explicit null and
/// `Some(Some(v))` for a value, while `#[serde(default)]` supplies `None`
/// for an absent key.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ============================================================================
// Response payloads
// ============================================================================

/// A resource as clients see it.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ResourceResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Tárgyaló A")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "room")]
    pub kind: String,
    #[schema(example = "Elsőemeleti tárgyaló projektorral")]
    pub description: Option<String>,
    #[schema(example = true)]
    pub available: bool,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub updated_at: String,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            kind: resource.kind,
            description: resource.description,
            available: resource.available,
            created_at: jiff::Timestamp::from(resource.created_at).to_string(),
            updated_at: jiff::Timestamp::from(resource.updated_at).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_to_wire_name_type() {
        let request: CreateResourceRequest =
            serde_json::from_str(r#"{"name":"Tárgyaló A","type":"room"}"#).unwrap();
        assert_eq!(request.kind.as_deref(), Some("room"));

        let response = ResourceResponse {
            id: 1,
            name: "Tárgyaló A".to_string(),
            kind: "room".to_string(),
            description: None,
            available: true,
            created_at: "2026-01-01T12:00:00Z".to_string(),
            updated_at: "2026-01-01T12:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""type":"room""#));
        assert!(!json.contains("kind"));
    }

    #[test]
    fn test_description_absent_vs_null() {
        let absent: UpdateResourceRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: UpdateResourceRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let value: UpdateResourceRequest =
            serde_json::from_str(r#"{"description":"frissítve"}"#).unwrap();
        assert_eq!(value.description, Some(Some("frissítve".to_string())));
    }

    #[test]
    fn test_update_changeset_carries_explicit_null() {
        let request: UpdateResourceRequest =
            serde_json::from_str(r#"{"description":null,"available":false}"#).unwrap();
        let changeset = request.into_changes();
        assert_eq!(changeset.description, Some(None));
        assert_eq!(changeset.available, Some(false));
        assert!(!changeset.is_empty());
    }
}
