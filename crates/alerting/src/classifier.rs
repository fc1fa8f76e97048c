//! Health Classification

use cmapss::{SensorChannel, SensorReading};
use serde::{Deserialize, Serialize};

/// RUL below this is Critical
pub const CRITICAL_RUL: f64 = 20.0;

/// RUL below this (and at or above [`CRITICAL_RUL`]) is Warning
pub const WARNING_RUL: f64 = 50.0;

/// Health tier for an engine, a monotone function of the RUL estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Wire/display representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }

    /// Classify an RUL estimate. First match wins, most severe first.
    pub fn from_rul(rul: f64) -> Self {
        if rul < CRITICAL_RUL {
            HealthStatus::Critical
        } else if rul < WARNING_RUL {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Classification of one prediction
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Health tier from the RUL estimate
    pub status: HealthStatus,
    /// Channels exceeding their criticality cutoff, as factor labels.
    /// Empty means normal wear.
    pub factors: Vec<&'static str>,
}

impl HealthReport {
    /// Factor list for the streaming payload; never empty
    pub fn stream_factors(&self) -> Vec<&'static str> {
        if self.factors.is_empty() {
            vec!["Normal operation"]
        } else {
            self.factors.clone()
        }
    }

    /// Joined factor string for the batch report
    pub fn failure_reason(&self) -> String {
        if self.factors.is_empty() {
            "Normal wear and tear".to_string()
        } else {
            self.factors.join(", ")
        }
    }
}

/// Classify a prediction: RUL drives the status tier, and each channel's
/// criticality cutoff (not its valid range, which serves data quality)
/// contributes named factors independently of the tier.
pub fn classify(rul: f64, sensors: &SensorReading) -> HealthReport {
    let mut factors = Vec::new();
    for (channel, value) in sensors.iter() {
        if let Some(cutoff) = channel.thresholds().criticality_cutoff {
            if value > cutoff {
                if let Some(label) = channel.factor_label() {
                    factors.push(label);
                }
            }
        }
    }

    HealthReport {
        status: HealthStatus::from_rul(rul),
        factors,
    }
}
