//! Real-Time Streaming Route
//!
//! One WebSocket connection drives one isolated [`StreamingSession`]: its
//! own engine cursor and rolling-feature window, never shared with other
//! connections. The loop suspends on a fixed inter-cycle delay to simulate
//! live sensor arrival, and pauses (without closing) when the series is
//! exhausted so clients can re-engage or switch engines.

use crate::session::{StreamingSession, Tick};
use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use storage::PredictionRecord;
use tracing::{debug, info, warn};

/// In-stream command: switch this connection's session to another engine
#[derive(Debug, Deserialize)]
struct StreamCommand {
    engine: u32,
}

/// Upgrade to a streaming session
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_telemetry(socket, state))
}

async fn stream_telemetry(socket: WebSocket, state: Arc<AppState>) {
    let Some(dataset) = state.dataset.as_ref() else {
        let (mut sender, _) = socket.split();
        let _ = sender
            .send(Message::Text(
                json!({ "error": "telemetry dataset unavailable" }).to_string(),
            ))
            .await;
        return;
    };

    let active = state.active_streams.fetch_add(1, Ordering::Relaxed) + 1;
    metrics::gauge!("aegisflow_active_streams").increment(1.0);
    info!("streaming client connected ({active} active)");

    let unit = state
        .default_unit
        .read()
        .map(|u| *u)
        .unwrap_or(simulator::DEFAULT_UNIT);
    let mut session =
        StreamingSession::new(dataset, unit, state.model.clone(), state.model_degraded);

    let cycle_delay = Duration::from_millis(state.settings.stream_delay_ms);
    let finished_pause = Duration::from_millis(state.settings.finished_pause_ms);
    let (mut sender, mut receiver) = socket.split();

    loop {
        let delay = if session.is_finished() {
            finished_pause
        } else {
            cycle_delay
        };

        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<StreamCommand>(&text) {
                            Ok(command) => session.set_engine(dataset, command.engine),
                            Err(_) => debug!("ignoring unrecognized client message"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("websocket receive error: {e}");
                        break;
                    }
                }
            }
            _ = tokio::time::sleep(delay) => {
                let tick = {
                    let mut alerts = match state.alert_manager.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    session.tick(&mut alerts)
                };

                match tick {
                    Ok(Tick::Cycle(payload)) => {
                        if let Some(alert) = &payload.alert {
                            let _ = state.repository.push_alert(alert.clone());
                        }
                        let _ = state.repository.push_prediction(PredictionRecord {
                            timestamp_ms: Utc::now().timestamp_millis(),
                            engine_id: session.unit(),
                            cycle: payload.cycle,
                            rul: payload.rul,
                            status: payload.status.to_string(),
                            degraded: payload.degraded,
                        });
                        metrics::counter!("aegisflow_predictions_total").increment(1);

                        let text = match serde_json::to_string(&payload) {
                            Ok(text) => text,
                            Err(e) => {
                                warn!("payload serialization failed: {e}");
                                break;
                            }
                        };
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Ok(Tick::Finished) => {
                        let text = json!({ "finished": true }).to_string();
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("streaming tick failed: {e}");
                        let text = json!({ "error": e.to_string() }).to_string();
                        let _ = sender.send(Message::Text(text)).await;
                        break;
                    }
                }
            }
        }
    }

    let active = state.active_streams.fetch_sub(1, Ordering::Relaxed) - 1;
    metrics::gauge!("aegisflow_active_streams").decrement(1.0);
    info!("streaming client disconnected ({active} active)");
}
