//! Alert Manager

use crate::classifier::{CRITICAL_RUL, WARNING_RUL};
use chrono::{DateTime, Utc};
use cmapss::{SensorChannel, SensorReading};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Alert severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// One alert event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub engine_id: u32,
    #[serde(rename = "alert_type")]
    pub severity: AlertSeverity,
    pub rul: f64,
    pub cycle: u32,
    pub message: String,
    pub sensors: SensorReading,
}

/// Alert manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Minimum interval before the same (engine, severity) pair re-alerts.
    /// 0 restores re-alerting on every tick while conditions persist.
    pub cooldown_seconds: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 60,
        }
    }
}

/// Evaluates alert conditions and deduplicates by (engine, severity)
pub struct AlertManager {
    config: AlertConfig,
    last_fired: HashMap<(u32, AlertSeverity), Instant>,
}

impl AlertManager {
    pub fn new(config: AlertConfig) -> Self {
        info!(
            "creating alert manager (cooldown {}s)",
            config.cooldown_seconds
        );
        Self {
            config,
            last_fired: HashMap::new(),
        }
    }

    /// Check the alert conditions for one prediction. Critical RUL, warning
    /// RUL, or an elevated LPT outlet temperature on its own each trigger;
    /// within the cooldown window a repeat for the same engine and severity
    /// is suppressed.
    pub fn evaluate(
        &mut self,
        engine_id: u32,
        cycle: u32,
        rul: f64,
        sensors: &SensorReading,
    ) -> Option<Alert> {
        let (severity, message) = self.triggered_condition(engine_id, rul, sensors)?;

        if !self.cooldown_elapsed(engine_id, severity) {
            debug!(
                "alert suppressed for engine {engine_id} ({}) during cooldown",
                severity.as_str()
            );
            return None;
        }
        self.last_fired.insert((engine_id, severity), Instant::now());

        info!(
            "ALERT: {} - Engine {engine_id} - RUL {rul:.1} cycles",
            severity.as_str().to_uppercase()
        );

        Some(Alert {
            timestamp: Utc::now(),
            engine_id,
            severity,
            rul,
            cycle,
            message,
            sensors: *sensors,
        })
    }

    fn triggered_condition(
        &self,
        engine_id: u32,
        rul: f64,
        sensors: &SensorReading,
    ) -> Option<(AlertSeverity, String)> {
        if rul < CRITICAL_RUL {
            return Some((
                AlertSeverity::Critical,
                format!(
                    "CRITICAL: Engine {engine_id} requires immediate maintenance. RUL: {rul:.1} cycles remaining."
                ),
            ));
        }
        if rul < WARNING_RUL {
            return Some((
                AlertSeverity::Warning,
                format!(
                    "WARNING: Engine {engine_id} approaching maintenance window. RUL: {rul:.1} cycles remaining."
                ),
            ));
        }

        let lpt = SensorChannel::LptOutletTemp;
        if let Some(cutoff) = lpt.thresholds().criticality_cutoff {
            if sensors.get(lpt) > cutoff {
                return Some((
                    AlertSeverity::Warning,
                    format!("WARNING: High LPT temperature detected on Engine {engine_id}"),
                ));
            }
        }

        None
    }

    fn cooldown_elapsed(&self, engine_id: u32, severity: AlertSeverity) -> bool {
        if self.config.cooldown_seconds == 0 {
            return true;
        }
        match self.last_fired.get(&(engine_id, severity)) {
            Some(fired) => fired.elapsed() >= Duration::from_secs(self.config.cooldown_seconds),
            None => true,
        }
    }

    /// Forget all cooldown state
    pub fn clear(&mut self) {
        self.last_fired.clear();
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_rul_fires_critical_alert() {
        let mut manager = AlertManager::default();
        let alert = manager
            .evaluate(5, 180, 12.0, &SensorReading::default())
            .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.engine_id, 5);
        assert!(alert.message.contains("immediate maintenance"));
    }

    #[test]
    fn test_warning_rul_fires_warning_alert() {
        let mut manager = AlertManager::default();
        let alert = manager
            .evaluate(5, 100, 35.0, &SensorReading::default())
            .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_healthy_rul_without_hot_lpt_is_silent() {
        let mut manager = AlertManager::default();
        assert!(manager
            .evaluate(5, 10, 90.0, &SensorReading::default())
            .is_none());
    }

    #[test]
    fn test_hot_lpt_alone_fires_warning() {
        let mut sensors = SensorReading::default();
        sensors.set(SensorChannel::LptOutletTemp, 1440.0);

        let mut manager = AlertManager::default();
        let alert = manager.evaluate(2, 40, 90.0, &sensors).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert!(alert.message.contains("High LPT temperature"));
    }

    #[test]
    fn test_cooldown_suppresses_repeat_for_same_engine() {
        let mut manager = AlertManager::default();
        assert!(manager
            .evaluate(5, 180, 12.0, &SensorReading::default())
            .is_some());
        assert!(manager
            .evaluate(5, 181, 11.0, &SensorReading::default())
            .is_none());

        // A different engine is a different dedup key.
        assert!(manager
            .evaluate(6, 50, 12.0, &SensorReading::default())
            .is_some());
    }

    #[test]
    fn test_zero_cooldown_realerts_every_tick() {
        let mut manager = AlertManager::new(AlertConfig {
            cooldown_seconds: 0,
        });
        assert!(manager
            .evaluate(5, 180, 12.0, &SensorReading::default())
            .is_some());
        assert!(manager
            .evaluate(5, 181, 11.0, &SensorReading::default())
            .is_some());
    }
}
