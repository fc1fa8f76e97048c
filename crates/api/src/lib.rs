//! AegisFlow RUL Monitoring API
//!
//! REST API and WebSocket server for turbofan remaining-useful-life
//! monitoring. Per-connection streaming sessions replay recorded telemetry
//! through the feature/inference/alerting pipeline; batch uploads produce a
//! fleet-wide urgency report.

use alerting::{AlertConfig, AlertManager};
use axum::routing::{get, post};
use axum::Router;
use fallback::HeuristicBaseline;
use inference_engine::{OnnxRulModel, RulModel};
use metrics_exporter_prometheus::PrometheusHandle;
use simulator::EngineDataset;
use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex, RwLock};
use storage::Repository;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod config;
mod rate_limit;
mod routes;
mod session;

pub use crate::config::Settings;
pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use session::{CyclePayload, StreamState, StreamingSession, Tick};

/// Shared application state
///
/// The dataset and model are read-only after load and shared freely; the
/// repository and alert manager serialize their own mutations. Streaming
/// session state is deliberately NOT here: each connection owns its own
/// [`StreamingSession`].
pub struct AppState {
    /// Replayed telemetry; `None` leaves streaming degraded but the process up
    pub dataset: Option<EngineDataset>,
    /// The serving regressor (trained artifact or heuristic baseline)
    pub model: Arc<dyn RulModel>,
    /// Whether predictions come from the fallback baseline
    pub model_degraded: bool,
    /// Bounded alert/prediction retention and process counters
    pub repository: Repository,
    /// Alert condition evaluation and cooldown dedup
    pub alert_manager: Mutex<AlertManager>,
    /// Runtime settings
    pub settings: Settings,
    /// Engine replayed for connections that never select one
    pub default_unit: RwLock<u32>,
    /// Open WebSocket connections
    pub active_streams: AtomicUsize,
    /// Process start, for uptime reporting
    pub start_time: std::time::Instant,
    /// Prometheus render handle, when the recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from settings, loading the dataset and model artifact.
    /// Either failing leaves the process serving in a degraded mode that the
    /// health endpoint surfaces, rather than refusing to start.
    pub fn from_settings(settings: Settings) -> Self {
        let dataset = match EngineDataset::load(&settings.dataset_path) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!("dataset unavailable ({e}); streaming disabled");
                None
            }
        };

        let (model, model_degraded): (Arc<dyn RulModel>, bool) =
            match OnnxRulModel::load(&settings.model_path, &settings.feature_manifest_path) {
                Ok(model) => (Arc::new(model), false),
                Err(e) => {
                    warn!("model artifact unavailable ({e}); serving heuristic baseline");
                    (Arc::new(HeuristicBaseline::new()), true)
                }
            };

        let alert_manager = AlertManager::new(AlertConfig {
            cooldown_seconds: settings.alert_cooldown_seconds,
        });
        let default_unit = RwLock::new(settings.default_unit);

        Self {
            dataset,
            model,
            model_degraded,
            repository: Repository::new(),
            alert_manager: Mutex::new(alert_manager),
            settings,
            default_unit,
            active_streams: AtomicUsize::new(0),
            start_time: std::time::Instant::now(),
            prometheus: None,
        }
    }

    /// Attach a Prometheus render handle
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(routes::health::health))
        .route("/api/v1/metrics", get(routes::health::prometheus_metrics))
        .route("/api/v1/alerts", get(routes::alerts::get_alerts))
        .route("/api/v1/predictions", get(routes::predictions::get_predictions))
        .route("/api/v1/engine", post(routes::engine::set_engine))
        .route("/api/v1/analyze", post(routes::analyze::analyze_upload))
        .route("/api/v1/ws", get(routes::ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Run the server until shutdown
pub async fn run_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let bind_addr = state.settings.bind_addr.clone();
    let mut app = create_router(state);

    if let Some(governor) = create_governor_config(&RateLimitConfig::default()) {
        app = app.layer(GovernorLayer { config: governor });
    } else {
        warn!("rate limiter configuration invalid; serving without throttling");
    }

    info!("starting API server on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
