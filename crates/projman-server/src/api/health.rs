//! Health check endpoint

use crate::ProjmanServer;
use axum::{Json, extract::State, http::StatusCode};
use projman_core::Collection;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Version information
    pub version: String,
    /// Deployment mode
    pub environment: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Document store status
    pub store: StoreStatus,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    /// All systems healthy
    Healthy,
    /// System unhealthy
    Unhealthy,
}

/// Document store status
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    /// Adapter name
    pub kind: &'static str,
    /// Probe result
    pub status: HealthStatus,
    /// Probe time in milliseconds
    pub response_time_ms: f64,
    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Get health status
///
/// Probes the store with a lookup of an id that never exists; any answer
/// other than an error counts as healthy.
pub async fn health_check(
    State(server): State<Arc<ProjmanServer>>,
) -> (StatusCode, Json<HealthResponse>) {
    let repository = &server.repository;

    let probe_start = Instant::now();
    let probe = repository
        .store()
        .find_by_id(Collection::Clients, "__health_probe__")
        .await;
    let response_time_ms = probe_start.elapsed().as_secs_f64() * 1000.0;

    let (status, error) = match probe {
        Ok(_) => (HealthStatus::Healthy, None),
        Err(e) => {
            tracing::warn!("Health probe failed: {}", e);
            (HealthStatus::Unhealthy, Some(e.to_string()))
        }
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: server.config.environment.to_string(),
            uptime_seconds: server.uptime().as_secs(),
            store: StoreStatus {
                kind: repository.store_kind(),
                status,
                response_time_ms,
                error,
            },
        }),
    )
}
