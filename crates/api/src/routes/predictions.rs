//! Prediction Log Routes

use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::PredictionRecord;

/// Query parameters for the predictions endpoint
#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the predictions endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub data: Vec<PredictionRecord>,
    pub count: usize,
}

/// Get recent predictions, newest first
pub async fn get_predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictionQuery>,
) -> Json<PredictionResponse> {
    state.repository.record_request();
    let limit = params.limit.min(500);

    let data = state.repository.recent_predictions(limit).unwrap_or_default();

    Json(PredictionResponse {
        count: data.len(),
        data,
    })
}
