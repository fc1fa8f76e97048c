//! Server Settings
//!
//! Layered configuration: optional `config/aegisflow.*` file overridden by
//! `AEGISFLOW_`-prefixed environment variables.

use serde::{Deserialize, Serialize};

/// Runtime settings for the serving process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address to bind
    pub bind_addr: String,
    /// Training file replayed by the streaming simulator
    pub dataset_path: String,
    /// ONNX regressor artifact
    pub model_path: String,
    /// Ordered feature-name manifest shipped with the artifact
    pub feature_manifest_path: String,
    /// Inter-cycle emission delay, simulating real-time sensor arrival
    pub stream_delay_ms: u64,
    /// Pause between `finished` notifications once a series is exhausted
    pub finished_pause_ms: u64,
    /// Minimum re-alert interval per (engine, severity); 0 re-alerts every tick
    pub alert_cooldown_seconds: u64,
    /// Engine replayed for connections that never select one
    pub default_unit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            dataset_path: "dataset/train_FD001.txt".to_string(),
            model_path: "models/rul_predictor.onnx".to_string(),
            feature_manifest_path: "models/feature_manifest.json".to_string(),
            stream_delay_ms: 300,
            finished_pause_ms: 2000,
            alert_cooldown_seconds: 60,
            default_unit: simulator::DEFAULT_UNIT,
        }
    }
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name("config/aegisflow").required(false))
            .add_source(::config::Environment::with_prefix("AEGISFLOW"))
            .build()?
            .try_deserialize()
    }
}
