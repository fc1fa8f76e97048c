//! Upload Analysis

use alerting::{classify, Alert, AlertManager};
use cmapss::{parse_records, DatasetError, RawRecord, SensorReading};
use data_validator::{OutOfRangeWarning, Validator};
use feature_engine::IncrementalFeatureState;
use inference_engine::{clamp_rul, InferenceError, RulModel};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors during batch analysis. Each is reported back to the caller as a
/// structured error object; a malformed upload never takes down the service.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("uploaded dataset contains no records")]
    Empty,
}

/// One engine's row in the fleet report
#[derive(Debug, Clone, Serialize)]
pub struct EngineReportRow {
    pub engine_id: u32,
    pub current_cycle: u32,
    #[serde(rename = "predicted_RUL")]
    pub predicted_rul: f64,
    pub estimated_failure_cycle: i64,
    pub status: String,
    pub failure_reason: String,
    pub data_quality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<OutOfRangeWarning>>,
}

/// Full result of analyzing one upload
#[derive(Debug)]
pub struct BatchOutcome {
    /// Report rows sorted ascending by predicted RUL (most urgent first)
    pub rows: Vec<EngineReportRow>,
    /// Alerts triggered during analysis, after deduplication
    pub alerts: Vec<Alert>,
}

/// Analyze an uploaded raw dataset.
///
/// Records are grouped by engine unit; each unit's rolling features are
/// computed over its own history only, and the last recorded cycle is taken
/// as the current snapshot.
pub fn analyze(
    input: &str,
    model: &dyn RulModel,
    alert_manager: &mut AlertManager,
) -> Result<BatchOutcome, AnalyzeError> {
    let records = parse_records(input)?;
    if records.is_empty() {
        return Err(AnalyzeError::Empty);
    }

    // Group per unit, preserving row order within each unit.
    let mut units: BTreeMap<u32, Vec<RawRecord>> = BTreeMap::new();
    for record in records {
        units.entry(record.unit).or_default().push(record);
    }
    info!("analyzing upload: {} engines", units.len());

    let validator = Validator::new();
    let mut rows = Vec::with_capacity(units.len());
    let mut alerts = Vec::new();

    for (engine_id, series) in &units {
        // Fresh feature state per engine; rolling windows never carry over
        // from another unit.
        let mut state = IncrementalFeatureState::new();
        let mut snapshot = None;
        for record in series {
            let reading = SensorReading::from_raw(record);
            let features = state.observe(reading);
            snapshot = Some((record.cycle, reading, features));
        }
        let Some((current_cycle, reading, features)) = snapshot else {
            continue;
        };

        let rul = clamp_rul(model.predict(&features)?);
        let report = classify(rul, &reading);
        let validation = validator.validate(&reading);

        if let Some(alert) = alert_manager.evaluate(*engine_id, current_cycle, rul, &reading) {
            alerts.push(alert);
        }

        debug!(
            "engine {engine_id}: cycle {current_cycle}, RUL {rul:.1}, {}",
            report.status.as_str()
        );

        rows.push(EngineReportRow {
            engine_id: *engine_id,
            current_cycle,
            predicted_rul: (rul * 10.0).round() / 10.0,
            estimated_failure_cycle: i64::from(current_cycle) + rul as i64,
            status: report.status.as_str().to_string(),
            failure_reason: report.failure_reason(),
            data_quality: validation.quality_flag().to_string(),
            warnings: (!validation.valid).then_some(validation.out_of_range),
        });
    }

    // Most urgent engines first.
    rows.sort_by(|a, b| {
        a.predicted_rul
            .partial_cmp(&b.predicted_rul)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(BatchOutcome { rows, alerts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::AlertConfig;
    use cmapss::SensorChannel;
    use fallback::HeuristicBaseline;

    /// Render one raw row whose canonical channels sit at `frac` of their
    /// valid range (0.0 = low bound, 1.0 = high bound).
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

    fn upload(units: &[(u32, f64)]) -> String {
        let mut input = String::new();
        for (unit, frac) in units {
            for cycle in 1..=5 {
                input.push_str(&row_at(*unit, cycle, *frac));
                input.push('\n');
            }
        }
        input
    }

    fn manager() -> AlertManager {
        AlertManager::new(AlertConfig {
            cooldown_seconds: 0,
        })
    }

    #[test]
    fn test_report_sorted_most_urgent_first() {
        // Unit 1 near-pristine (baseline predicts high RUL), unit 2 at the
        // top of every range (baseline predicts exhaustion).
        let input = upload(&[(1, 0.05), (2, 0.99)]);
        let outcome = analyze(&input, &HeuristicBaseline::new(), &mut manager()).unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].engine_id, 2);
        assert_eq!(outcome.rows[0].status, "Critical");
        assert!(outcome.rows[0].predicted_rul < 20.0);
        assert_eq!(outcome.rows[1].engine_id, 1);
        assert_eq!(outcome.rows[1].status, "Healthy");
        assert!(outcome.rows[1].predicted_rul >= 50.0);
    }

    #[test]
    fn test_failure_cycle_extends_current_cycle() {
        let input = upload(&[(1, 0.05)]);
        let outcome = analyze(&input, &HeuristicBaseline::new(), &mut manager()).unwrap();

        let row = &outcome.rows[0];
        assert_eq!(row.current_cycle, 5);
        assert_eq!(
            row.estimated_failure_cycle,
            5 + row.predicted_rul.trunc() as i64
        );
    }

    #[test]
    fn test_out_of_range_sensor_flags_data_quality() {
        let mut input = upload(&[(1, 0.5)]);
        // Append a final cycle with an implausible LPT outlet temperature.
        let mut hot = row_at(1, 6, 0.5);
        let fields: Vec<String> = hot
            .split_whitespace()
            .enumerate()
            .map(|(i, f)| {
                if i == 5 + SensorChannel::LptOutletTemp.raw_index() {
                    "2000.0".to_string()
                } else {
                    f.to_string()
                }
            })
            .collect();
        hot = fields.join(" ");
        input.push_str(&hot);
        input.push('\n');

        let outcome = analyze(&input, &HeuristicBaseline::new(), &mut manager()).unwrap();
        let row = &outcome.rows[0];

        assert_eq!(row.data_quality, "anomaly_detected");
        let warnings = row.warnings.as_ref().unwrap();
        assert!(warnings.iter().any(|w| w.sensor == "LPT_Outlet_Temp"));
        assert!(warnings
            .iter()
            .any(|w| w.expected_range == "1020-1445"));
    }

    #[test]
    fn test_critical_engine_produces_alert() {
        let input = upload(&[(7, 0.99)]);
        let outcome = analyze(&input, &HeuristicBaseline::new(), &mut manager()).unwrap();

        assert!(!outcome.alerts.is_empty());
        assert_eq!(outcome.alerts[0].engine_id, 7);
    }

    #[test]
    fn test_malformed_upload_is_structured_error() {
        let err = analyze("1 2 3\n", &HeuristicBaseline::new(), &mut manager()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::Dataset(DatasetError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let err = analyze("", &HeuristicBaseline::new(), &mut manager()).unwrap_err();
        assert!(matches!(err, AnalyzeError::Empty));
    }
}
