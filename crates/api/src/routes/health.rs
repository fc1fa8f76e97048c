//! Health and Metrics Routes

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Health check response for load balancers and monitoring
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub api: &'static str,
    pub model: &'static str,
    pub simulator: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub total_requests: u64,
    pub total_predictions: u64,
    pub total_alerts: u64,
    pub active_websocket_connections: usize,
}

/// Health check. Returns 200 when fully healthy, 503 with the same body
/// when a component is degraded, so orchestration can see the detail either
/// way.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.repository.record_request();

    let model = if state.model_degraded {
        "degraded"
    } else {
        "healthy"
    };
    let simulator = if state.dataset.is_some() {
        "healthy"
    } else {
        "error"
    };
    let healthy = !state.model_degraded && state.dataset.is_some();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            api: "healthy",
            model,
            simulator,
        },
        metrics: SystemMetrics {
            total_requests: state.repository.total_requests(),
            total_predictions: state.repository.total_predictions(),
            total_alerts: state.repository.total_alerts(),
            active_websocket_connections: state.active_streams.load(Ordering::Relaxed),
        },
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(response))
}

/// Prometheus exposition endpoint
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
