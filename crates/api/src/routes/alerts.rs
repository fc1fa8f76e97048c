//! Alert Routes

use crate::AppState;
use alerting::Alert;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for the alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Maximum number of alerts to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the alerts endpoint
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub total: usize,
    pub alerts: Vec<Alert>,
}

/// Get recent alert history, oldest first
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AlertQuery>,
) -> Json<AlertResponse> {
    state.repository.record_request();
    let limit = params.limit.min(storage::ALERT_HISTORY_CAPACITY);

    let alerts = state.repository.recent_alerts(limit).unwrap_or_default();

    Json(AlertResponse {
        total: state.repository.alert_count(),
        alerts,
    })
}
