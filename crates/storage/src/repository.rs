//! Repository Implementation

use crate::StorageError;
use alerting::Alert;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Alerts retained in memory; the oldest is dropped past this
pub const ALERT_HISTORY_CAPACITY: usize = 100;

/// Predictions retained in memory
const PREDICTION_LOG_CAPACITY: usize = 10_000;

/// One logged prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub timestamp_ms: i64,
    pub engine_id: u32,
    pub cycle: u32,
    pub rul: f64,
    pub status: String,
    pub degraded: bool,
}

/// Process-wide bounded record store
pub struct Repository {
    alerts: Mutex<VecDeque<Alert>>,
    predictions: Mutex<VecDeque<PredictionRecord>>,
    total_requests: AtomicU64,
    total_predictions: AtomicU64,
    total_alerts: AtomicU64,
}

impl Repository {
    pub fn new() -> Self {
        info!("creating in-memory repository");
        Self {
            alerts: Mutex::new(VecDeque::with_capacity(ALERT_HISTORY_CAPACITY)),
            predictions: Mutex::new(VecDeque::with_capacity(1024)),
            total_requests: AtomicU64::new(0),
            total_predictions: AtomicU64::new(0),
            total_alerts: AtomicU64::new(0),
        }
    }

    /// Append an alert, dropping the oldest past capacity
    pub fn push_alert(&self, alert: Alert) -> Result<(), StorageError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        while alerts.len() >= ALERT_HISTORY_CAPACITY {
            alerts.pop_front();
        }
        alerts.push_back(alert);
        self.total_alerts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Most recent alerts, newest last, up to `limit`
    pub fn recent_alerts(&self, limit: usize) -> Result<Vec<Alert>, StorageError> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let skip = alerts.len().saturating_sub(limit);
        Ok(alerts.iter().skip(skip).cloned().collect())
    }

    /// Alerts currently retained
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or(0)
    }

    /// Append a prediction record, dropping the oldest past capacity
    pub fn push_prediction(&self, record: PredictionRecord) -> Result<(), StorageError> {
        let mut predictions = self
            .predictions
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        while predictions.len() >= PREDICTION_LOG_CAPACITY {
            predictions.pop_front();
        }
        predictions.push_back(record);
        self.total_predictions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Most recent predictions, newest first, up to `limit`
    pub fn recent_predictions(
        &self,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, StorageError> {
        let predictions = self
            .predictions
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(predictions.iter().rev().take(limit).cloned().collect())
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn total_predictions(&self) -> u64 {
        self.total_predictions.load(Ordering::Relaxed)
    }

    pub fn total_alerts(&self) -> u64 {
        self.total_alerts.load(Ordering::Relaxed)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
