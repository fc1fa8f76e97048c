//! Batch Feature Transformer
//!
//! Whole-table form of the feature pipeline, used for training data
//! preparation and uploaded-dataset analysis. Rolling means and first
//! differences are computed per engine unit; neither ever crosses a unit
//! boundary.

use crate::features::FeatureVector;
use cmapss::{RawRecord, SensorChannel, SensorReading};
use ring_buffer::HistoryWindow;
use std::collections::HashMap;
use tracing::debug;

/// One transformed row, aligned by index with the input records
#[derive(Debug, Clone)]
pub struct TransformedRow {
    /// Engine unit id
    pub unit: u32,
    /// Cycle index
    pub cycle: u32,
    /// Canonical channel values for the row
    pub reading: SensorReading,
    /// Training-form features: [raw | rolling means | first differences]
    pub features: FeatureVector,
}

/// Per-unit rolling state carried across rows
struct UnitState {
    window: HistoryWindow,
    prev: Option<SensorReading>,
}

impl UnitState {
    fn new() -> Self {
        Self {
            window: HistoryWindow::with_default_capacity(),
            prev: None,
        }
    }
}

/// Transform a batch of raw records into training-form feature rows.
///
/// Output order matches input order. The trailing rolling mean uses a
/// 10-cycle window with a minimum window of 1; the first difference is 0.0
/// at each unit's first cycle (the NaN-fill convention from training).
pub fn transform_batch(records: &[RawRecord]) -> Vec<TransformedRow> {
    let mut states: HashMap<u32, UnitState> = HashMap::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let state = states.entry(record.unit).or_insert_with(UnitState::new);
        let reading = SensorReading::from_raw(record);

        state.window.push(reading);
        let means = state.window.means();

        let mut diffs = SensorReading::default();
        if let Some(prev) = state.prev {
            for ch in SensorChannel::ALL {
                diffs.set(ch, reading.get(ch) - prev.get(ch));
            }
        }
        state.prev = Some(reading);

        rows.push(TransformedRow {
            unit: record.unit,
            cycle: record.cycle,
            reading,
            features: FeatureVector::training(&reading, &means, &diffs),
        });
    }

    debug!(
        "transformed {} records across {} units",
        rows.len(),
        states.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{SERVING_DIMENSION, TRAINING_DIMENSION};
    use crate::incremental::IncrementalFeatureState;
    use cmapss::CHANNEL_COUNT;

    fn record(unit: u32, cycle: u32, base: f64) -> RawRecord {
        let mut sensors = [0.0; 21];
        for (i, s) in sensors.iter_mut().enumerate() {
            *s = base + i as f64;
        }
        RawRecord {
            unit,
            cycle,
            settings: [0.0; 3],
            sensors,
        }
    }

    #[test]
    fn test_field_order_identical_for_single_row_and_full_table() {
        let table = vec![record(1, 1, 100.0), record(1, 2, 101.0)];

        let full = transform_batch(&table);
        let single = transform_batch(&table[..1]);

        assert_eq!(full[0].features, single[0].features);
        assert_eq!(full[0].features.len(), TRAINING_DIMENSION);
    }

    #[test]
    fn test_first_cycle_mean_equals_raw_and_diff_is_zero() {
        let rows = transform_batch(&[record(7, 1, 200.0)]);
        let values = rows[0].features.values();

        for i in 0..CHANNEL_COUNT {
            assert_eq!(values[i], values[CHANNEL_COUNT + i]);
            assert_eq!(values[SERVING_DIMENSION + i], 0.0);
        }
    }

    #[test]
    fn test_rolling_never_crosses_unit_boundary() {
        let table = vec![
            record(1, 1, 100.0),
            record(1, 2, 110.0),
            record(2, 1, 500.0),
        ];
        let rows = transform_batch(&table);

        // Unit 2's first row behaves exactly like a fresh series.
        let values = rows[2].features.values();
        for i in 0..CHANNEL_COUNT {
            assert_eq!(values[i], values[CHANNEL_COUNT + i]);
            assert_eq!(values[SERVING_DIMENSION + i], 0.0);
        }
    }

    #[test]
    fn test_diff_is_cycle_over_cycle_change() {
        let rows = transform_batch(&[record(1, 1, 100.0), record(1, 2, 103.5)]);
        let values = rows[1].features.values();
        for i in 0..CHANNEL_COUNT {
            assert!((values[SERVING_DIMENSION + i] - 3.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_determinism_on_rerun() {
        let table: Vec<RawRecord> = (1..=30).map(|c| record(4, c, 100.0 + c as f64)).collect();
        let first = transform_batch(&table);
        let second = transform_batch(&table);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.features, b.features);
        }
    }

    #[test]
    fn test_incremental_state_matches_batch_rolling_means() {
        // Ten cycles of one unit: the online path must land on the same
        // rolling means as the whole-table computation at cycle 10.
        let table: Vec<RawRecord> = (1..=10)
            .map(|c| record(34, c, 640.0 + (c as f64) * 0.3))
            .collect();

        let batch = transform_batch(&table);
        let batch_last = batch.last().unwrap();

        let mut state = IncrementalFeatureState::new();
        let mut online_last = None;
        for r in &table {
            online_last = Some(state.observe(SensorReading::from_raw(r)));
        }
        let online_last = online_last.unwrap();

        // Compare the serving prefix: raw block and rolling-mean block.
        for i in 0..SERVING_DIMENSION {
            assert!(
                (batch_last.features.values()[i] - online_last.values()[i]).abs() < 1e-9,
                "feature {i} diverged between batch and incremental paths"
            );
        }
    }
}
