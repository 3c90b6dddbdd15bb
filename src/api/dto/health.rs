//! Health probe response payloads.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.3.1",
    "timestamp": "2026-03-14T09:26:53Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 12
        }
    }
}))]
pub struct HealthResponse {
    /// Aggregate verdict over every probed component
    pub status: HealthStatus,
    /// Version of the binary answering the probe
    #[schema(example = "0.3.1")]
    pub version: String,
    /// When the check ran (RFC 3339)
    #[schema(value_type = String, format = DateTime, example = "2026-03-14T09:26:53Z")]
    pub timestamp: String,
    /// Per-component results, keyed by component name
    pub checks: HashMap<String, ComponentHealth>,
}

/// Binary health verdict, serialized lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing a single component.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    /// Human-readable detail, present on failures
    #[schema(example = "Connected")]
    pub message: Option<String>,
    #[schema(example = 12)]
    pub response_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_response_serializes_component_map() {
        let report = HealthResponse {
            status: HealthStatus::Unhealthy,
            version: "0.3.1".to_string(),
            timestamp: "2026-03-14T09:26:53Z".to_string(),
            checks: HashMap::from([(
                "database".to_string(),
                ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some("Connection failed: timeout".to_string()),
                    response_time_ms: Some(5000),
                },
            )]),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["checks"]["database"]["response_time_ms"], 5000);
        assert_eq!(
            json["checks"]["database"]["message"],
            "Connection failed: timeout"
        );
    }
}
