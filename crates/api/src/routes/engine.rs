//! Engine Selection Route

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Request body for engine selection
#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    pub unit_id: u32,
}

/// Response for engine selection
#[derive(Debug, Serialize)]
pub struct EngineResponse {
    pub status: &'static str,
    pub message: String,
}

/// Select the engine unit replayed for newly opened streams.
///
/// Live connections switch engines through their own socket (a
/// `{"engine": n}` message), which swaps the cursor and rolling-feature
/// window together inside that connection's session. An unknown unit id is
/// accepted here and yields an explicit empty stream, not an error.
pub async fn set_engine(
    State(state): State<Arc<AppState>>,
    Json(config): Json<EngineConfig>,
) -> impl IntoResponse {
    state.repository.record_request();
    metrics::counter!("aegisflow_requests_total").increment(1);

    match state.default_unit.write() {
        Ok(mut unit) => {
            *unit = config.unit_id;
            info!("default engine switched to {}", config.unit_id);
            (
                StatusCode::OK,
                Json(EngineResponse {
                    status: "ok",
                    message: format!("Switched to Engine {}", config.unit_id),
                }),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EngineResponse {
                status: "error",
                message: "engine selection unavailable".to_string(),
            }),
        ),
    }
}
