//! Incremental Feature State
//!
//! Reproduces the batch rolling-mean feature online, one cycle at a time,
//! over a bounded history window. One instance exists per streaming session;
//! sharing an instance across sessions contaminates early-cycle means with
//! another engine's late-life readings.

use crate::features::FeatureVector;
use cmapss::SensorReading;
use ring_buffer::HistoryWindow;
use tracing::debug;

/// Per-session state for online feature construction
#[derive(Debug, Clone, Default)]
pub struct IncrementalFeatureState {
    window: HistoryWindow,
}

impl IncrementalFeatureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one cycle: append the reading to the window and return the
    /// serving feature vector [raw | rolling means] in model order. With a
    /// single observed cycle the rolling mean equals the raw value.
    pub fn observe(&mut self, reading: SensorReading) -> FeatureVector {
        self.window.push(reading);
        let means = self.window.means();
        FeatureVector::serving(&reading, &means)
    }

    /// Clear the history window. Must be invoked at the start of every new
    /// session or engine switch.
    pub fn reset(&mut self) {
        debug!("resetting incremental feature state");
        self.window.clear();
    }

    /// Number of cycles currently held in the window
    pub fn history_len(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmapss::{SensorChannel, CHANNEL_COUNT};

    fn uniform(value: f64) -> SensorReading {
        let mut r = SensorReading::default();
        for ch in SensorChannel::ALL {
            r.set(ch, value);
        }
        r
    }

    #[test]
    fn test_first_observation_mean_equals_raw() {
        let mut state = IncrementalFeatureState::new();
        let features = state.observe(uniform(42.0));

        assert_eq!(features.values()[0], 42.0);
        assert_eq!(features.values()[CHANNEL_COUNT], 42.0);
    }

    #[test]
    fn test_window_is_bounded_at_ten() {
        let mut state = IncrementalFeatureState::new();
        for i in 0..15 {
            state.observe(uniform(i as f64));
        }
        assert_eq!(state.history_len(), 10);

        // Mean over cycles 5..=14
        let features = state.observe(uniform(15.0));
        let expected: f64 = (6..=15).sum::<i64>() as f64 / 10.0;
        assert!((features.values()[CHANNEL_COUNT] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reset_discards_previous_engine_history() {
        let mut state = IncrementalFeatureState::new();
        for _ in 0..10 {
            state.observe(uniform(1400.0));
        }

        state.reset();
        assert_eq!(state.history_len(), 0);

        // First cycle of the next engine: no contamination, mean == raw.
        let features = state.observe(uniform(600.0));
        assert_eq!(features.values()[CHANNEL_COUNT], 600.0);
    }
}
