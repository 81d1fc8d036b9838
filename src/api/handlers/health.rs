//! Health check endpoint.
//!
//! Reports liveness only; the in-process user store has no external
//! dependency to probe.

use axum::{Json, Router, routing::get};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process can answer
    pub status: String,
    pub version: String,
    pub timestamp: Timestamp,
}

/// Creates health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::pkg_version().to_string(),
        timestamp: Timestamp::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let before = Timestamp::now();
        let Json(response) = health_check().await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
        assert!(response.timestamp >= before);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: "2024-01-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["timestamp"], "2024-01-01T12:00:00Z");
    }
}
