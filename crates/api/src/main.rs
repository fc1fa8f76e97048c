//! AegisFlow Server - Main Entry Point

use api::{init_logging, run_server, AppState, Settings};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== AegisFlow RUL Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("settings unavailable ({e}); using defaults");
            Settings::default()
        }
    };

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    let state = Arc::new(AppState::from_settings(settings).with_prometheus(prometheus));

    run_server(state).await
}
