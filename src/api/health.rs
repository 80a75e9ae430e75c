//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check for process supervisors
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness check: verifies the catalogue stores answer queries
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks = Vec::new();
    let mut overall_status = HealthStatus::Healthy;

    for check in [
        check_actor_store(&state).await,
        check_movie_store(&state).await,
    ] {
        if check.status != HealthStatus::Healthy {
            overall_status = HealthStatus::Unhealthy;
        }
        checks.push(check);
    }

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn check_actor_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.actor_service.list().await;
    build_check("actor_store", result.err().map(|e| e.to_string()), start)
}

async fn check_movie_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.movie_service.list().await;
    build_check("movie_store", result.err().map(|e| e.to_string()), start)
}

fn build_check(name: &str, error: Option<String>, start: Instant) -> HealthCheck {
    HealthCheck {
        name: name.to_string(),
        status: if error.is_none() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
        message: error,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
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
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            checks: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(!json.contains("checks"));
    }

    #[test]
    fn test_build_check() {
        let healthy = build_check("actor_store", None, Instant::now());
        assert_eq!(healthy.status, HealthStatus::Healthy);
        assert!(healthy.message.is_none());

        let unhealthy = build_check("actor_store", Some("down".to_string()), Instant::now());
        assert_eq!(unhealthy.status, HealthStatus::Unhealthy);
        assert_eq!(unhealthy.message, Some("down".to_string()));
    }
}
