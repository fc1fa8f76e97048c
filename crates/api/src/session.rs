//! Streaming Session
//!
//! Orchestrates one engine's replay for a single connection: incremental
//! feature state, regressor, classifier, and validator, producing one
//! annotated payload per cycle. Every connection owns its own instance;
//! nothing here is shared across sessions.

use alerting::{classify, Alert, AlertManager};
use cmapss::SensorReading;
use data_validator::Validator;
use feature_engine::IncrementalFeatureState;
use inference_engine::{clamp_rul, InferenceError, RulModel};
use serde::Serialize;
use simulator::{EngineDataset, EngineSession};
use std::sync::Arc;
use tracing::debug;

/// Out-of-range warnings included per payload, at most
const MAX_STREAM_WARNINGS: usize = 3;

/// Lifecycle of one streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Created or switched, no cycle emitted yet
    Idle,
    /// Emitting cycles
    Streaming,
    /// Series exhausted; paused, not terminated
    Finished,
}

/// One cycle's annotated prediction, as sent over the socket
#[derive(Debug, Clone, Serialize)]
pub struct CyclePayload {
    pub finished: bool,
    pub cycle: u32,
    #[serde(rename = "RUL")]
    pub rul: f64,
    pub status: &'static str,
    pub degraded: bool,
    pub sensors: SensorReading,
    pub failure_reasons: Vec<&'static str>,
    pub data_quality: &'static str,
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Result of one tick
#[derive(Debug)]
pub enum Tick {
    /// A cycle was processed and should be emitted
    Cycle(Box<CyclePayload>),
    /// The series is exhausted (or the engine is unknown); emit the
    /// finished signal and pause
    Finished,
}

/// Per-connection orchestration of cursor + features + model + classifier
pub struct StreamingSession {
    engine: EngineSession,
    features: IncrementalFeatureState,
    validator: Validator,
    model: Arc<dyn RulModel>,
    degraded: bool,
    state: StreamState,
}

impl StreamingSession {
    /// Create a session for one engine, starting at cycle 0 with a clean
    /// feature window
    pub fn new(
        dataset: &EngineDataset,
        unit: u32,
        model: Arc<dyn RulModel>,
        degraded: bool,
    ) -> Self {
        Self {
            engine: dataset.session(unit),
            features: IncrementalFeatureState::new(),
            validator: Validator::new(),
            model,
            degraded,
            state: StreamState::Idle,
        }
    }

    /// Switch to a different engine. The cursor and the rolling-feature
    /// window are replaced together; resetting one without the other would
    /// contaminate the new engine's early rolling means.
    pub fn set_engine(&mut self, dataset: &EngineDataset, unit: u32) {
        debug!("session switching to engine {unit}");
        self.engine = dataset.session(unit);
        self.features.reset();
        self.state = StreamState::Idle;
    }

    pub fn unit(&self) -> u32 {
        self.engine.unit()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Finished
    }

    /// Process the next cycle: transform, predict, clamp, classify, check
    /// alert conditions, package.
    pub fn tick(&mut self, alerts: &mut AlertManager) -> Result<Tick, InferenceError> {
        let Some(record) = self.engine.next_cycle() else {
            self.state = StreamState::Finished;
            return Ok(Tick::Finished);
        };
        self.state = StreamState::Streaming;

        let reading = SensorReading::from_raw(&record);
        let features = self.features.observe(reading);
        let rul = clamp_rul(self.model.predict(&features)?);

        let report = classify(rul, &reading);
        let validation = self.validator.validate(&reading);
        let alert = alerts.evaluate(self.engine.unit(), record.cycle, rul, &reading);

        let warnings = (!validation.valid).then(|| {
            validation
                .out_of_range
                .iter()
                .take(MAX_STREAM_WARNINGS)
                .map(|w| w.to_string())
                .collect()
        });

        Ok(Tick::Cycle(Box::new(CyclePayload {
            finished: false,
            cycle: record.cycle,
            rul: (rul * 100.0).round() / 100.0,
            status: report.status.as_str(),
            degraded: self.degraded,
            sensors: reading,
            failure_reasons: report.stream_factors(),
            data_quality: validation.stream_flag(),
            alert,
            warnings,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::AlertConfig;
    use cmapss::{parse_records, SensorChannel};
    use fallback::HeuristicBaseline;

    fn row_at(unit: u32, cycle: u32, frac: f64) -> String {
        let mut sensors = [0.0f64; 21];
        for ch in SensorChannel::ALL {
            let (min, max) = ch.thresholds().valid_range;
            sensors[ch.raw_index()] = min + frac * (max - min);
        }
        let mut fields = vec![unit.to_string(), cycle.to_string()];
        fields.extend(std::iter::repeat("0.0".to_string()).take(3));
        fields.extend(sensors.iter().map(|v| format!("{v:.4}")));
        fields.join(" ")
    }

    fn dataset(cycles: u32, frac: f64) -> EngineDataset {
        let mut input = String::new();
        for cycle in 1..=cycles {
            input.push_str(&row_at(34, cycle, frac));
            input.push('\n');
        }
        EngineDataset::from_records(parse_records(&input).unwrap())
    }

    fn manager() -> AlertManager {
        AlertManager::new(AlertConfig {
            cooldown_seconds: 0,
        })
    }

    fn session(dataset: &EngineDataset, unit: u32) -> StreamingSession {
        StreamingSession::new(dataset, unit, Arc::new(HeuristicBaseline::new()), true)
    }

    #[test]
    fn test_tick_emits_annotated_cycles_then_finishes() {
        let data = dataset(2, 0.1);
        let mut session = session(&data, 34);
        let mut alerts = manager();

        assert_eq!(session.state(), StreamState::Idle);

        match session.tick(&mut alerts).unwrap() {
            Tick::Cycle(payload) => {
                assert!(!payload.finished);
                assert_eq!(payload.cycle, 1);
                assert_eq!(payload.status, "Healthy");
                assert_eq!(payload.data_quality, "valid");
                assert_eq!(payload.failure_reasons, vec!["Normal operation"]);
                assert!(payload.degraded);
            }
            Tick::Finished => panic!("expected a cycle"),
        }
        assert_eq!(session.state(), StreamState::Streaming);

        session.tick(&mut alerts).unwrap();
        assert!(matches!(
            session.tick(&mut alerts).unwrap(),
            Tick::Finished
        ));
        assert!(session.is_finished());
    }

    #[test]
    fn test_unknown_engine_finishes_immediately() {
        let data = dataset(2, 0.1);
        let mut session = session(&data, 999);
        assert!(matches!(
            session.tick(&mut manager()).unwrap(),
            Tick::Finished
        ));
    }

    #[test]
    fn test_engine_switch_resets_cursor_and_window_together() {
        let data = dataset(12, 0.9);
        let mut session = session(&data, 34);
        let mut alerts = manager();
        for _ in 0..5 {
            session.tick(&mut alerts).unwrap();
        }

        session.set_engine(&data, 34);
        assert_eq!(session.state(), StreamState::Idle);

        // First cycle after the switch: rolling mean must equal the raw
        // value, i.e. no history leaked across the reset.
        match session.tick(&mut alerts).unwrap() {
            Tick::Cycle(payload) => {
                assert_eq!(payload.cycle, 1);
                let lpt = payload.sensors.get(SensorChannel::LptOutletTemp);
                let (min, max) = SensorChannel::LptOutletTemp.thresholds().valid_range;
                assert!((lpt - (min + 0.9 * (max - min))).abs() < 1e-6);
            }
            Tick::Finished => panic!("expected a cycle"),
        }
    }

    #[test]
    fn test_degraded_engine_ticks_carry_alert() {
        // Every channel near its range top: the baseline predicts critical
        // RUL and the alert conditions fire.
        let data = dataset(3, 0.99);
        let mut session = session(&data, 34);

        match session.tick(&mut manager()).unwrap() {
            Tick::Cycle(payload) => {
                assert_eq!(payload.status, "Critical");
                assert!(payload.alert.is_some());
            }
            Tick::Finished => panic!("expected a cycle"),
        }
    }

    #[test]
    fn test_out_of_range_warnings_are_capped() {
        // frac > 1 pushes every channel above its valid max.
        let data = dataset(1, 1.5);
        let mut session = session(&data, 34);

        match session.tick(&mut manager()).unwrap() {
            Tick::Cycle(payload) => {
                assert_eq!(payload.data_quality, "anomaly");
                let warnings = payload.warnings.unwrap();
                assert_eq!(warnings.len(), MAX_STREAM_WARNINGS);
            }
            Tick::Finished => panic!("expected a cycle"),
        }
    }
}
