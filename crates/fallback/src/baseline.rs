//! Heuristic RUL Baseline

use cmapss::{SensorChannel, CHANNEL_COUNT, RUL_CEILING};
use feature_engine::{FeatureVector, SERVING_DIMENSION};
use inference_engine::{validate_feature_count, InferenceError, RulModel};
use tracing::warn;

/// Rule-based stand-in for the trained regressor.
///
/// Scores degradation from the rolling-mean block: each channel with an
/// alert policy is normalized to its position inside the valid range, and
/// the worst channel drives the estimate linearly down from the RUL
/// ceiling. Far coarser than the trained model, which is why the serving
/// layer flags its output degraded.
pub struct HeuristicBaseline {
    feature_names: Vec<String>,
}

impl HeuristicBaseline {
    pub fn new() -> Self {
        warn!("serving heuristic baseline instead of a trained regressor");
        Self {
            feature_names: FeatureVector::serving_feature_names(),
        }
    }

    /// Normalized severity of one channel's rolling mean inside its valid
    /// range: 0.0 at the low bound, 1.0 at the high bound.
    fn channel_severity(features: &FeatureVector, channel: SensorChannel) -> f64 {
        let mean = features.values()[CHANNEL_COUNT + channel.index()];
        let (min, max) = channel.thresholds().valid_range;
        ((mean - min) / (max - min)).clamp(0.0, 1.0)
    }
}

impl Default for HeuristicBaseline {
    fn default() -> Self {
        Self::new()
    }
}

impl RulModel for HeuristicBaseline {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        validate_feature_count(features, SERVING_DIMENSION)?;

        let severity = SensorChannel::ALL
            .iter()
            .filter(|ch| ch.thresholds().criticality_cutoff.is_some())
            .map(|ch| Self::channel_severity(features, *ch))
            .fold(0.0f64, f64::max);

        Ok((1.0 - severity) * RUL_CEILING)
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
