use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use ultravox_backend::BackendClient;

/// Result of probing the backend
///
/// Any HTTP answer counts as healthy; only a transport failure is unhealthy.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy { vllm_status: u16 },
    Unhealthy { error: String },
}

/// Health check handler
///
/// Always answers 200; backend trouble is reported in the body.
pub async fn health_handler(State(backend): State<Arc<BackendClient>>) -> Json<HealthStatus> {
    let status = match backend.health().await {
        Ok(code) => HealthStatus::Healthy {
            vllm_status: code.as_u16(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "backend health probe failed");
            HealthStatus::Unhealthy { error: e.to_string() }
        }
    };

    Json(status)
}
