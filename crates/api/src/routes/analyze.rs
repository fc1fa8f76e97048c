//! Batch Analysis Route

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Analyze an uploaded raw C-MAPSS dataset and return one report row per
/// engine, most urgent first. Malformed uploads come back as a structured
/// error object with a 400, never a crash.
pub async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    body: String,
) -> impl IntoResponse {
    state.repository.record_request();
    metrics::counter!("aegisflow_requests_total").increment(1);

    let outcome = {
        let mut alerts = match state.alert_manager.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        batch_analyzer::analyze(&body, state.model.as_ref(), &mut alerts)
    };

    match outcome {
        Ok(outcome) => {
            for alert in outcome.alerts {
                let _ = state.repository.push_alert(alert);
            }
            metrics::counter!("aegisflow_predictions_total")
                .increment(outcome.rows.len() as u64);
            info!("batch analysis complete: {} engines", outcome.rows.len());
            (StatusCode::OK, Json(json!(outcome.rows)))
        }
        Err(e) => {
            warn!("upload analysis error: {e}");
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
        }
    }
}
