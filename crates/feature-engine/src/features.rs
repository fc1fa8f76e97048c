//! Feature Vector Assembly

use cmapss::{SensorChannel, SensorReading, CHANNEL_COUNT};
use serde::{Deserialize, Serialize};

/// Serving features: raw block + rolling-mean block
pub const SERVING_DIMENSION: usize = CHANNEL_COUNT * 2;

/// Training features: raw + rolling-mean + first-difference blocks
pub const TRAINING_DIMENSION: usize = CHANNEL_COUNT * 3;

/// Ordered feature values for the regressor
///
/// Field order is the order the model was fit with: all raw channel values
/// in canonical order, then the rolling mean of each channel in the same
/// order, then (training form only) the first difference of each channel.
/// There is no runtime order check in this type; the inference layer
/// compares [`FeatureVector::serving_feature_names`] against the artifact's
/// manifest at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Assemble the serving form: [raw | rolling means]
    pub fn serving(raw: &SensorReading, means: &SensorReading) -> Self {
        let mut values = Vec::with_capacity(SERVING_DIMENSION);
        values.extend_from_slice(raw.values());
        values.extend_from_slice(means.values());
        Self { values }
    }

    /// Assemble the training form: [raw | rolling means | first differences]
    pub fn training(raw: &SensorReading, means: &SensorReading, diffs: &SensorReading) -> Self {
        let mut values = Vec::with_capacity(TRAINING_DIMENSION);
        values.extend_from_slice(raw.values());
        values.extend_from_slice(means.values());
        values.extend_from_slice(diffs.values());
        Self { values }
    }

    /// Feature values in model order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ordered names of the serving features, e.g. `LPT_Outlet_Temp`
    /// followed later by `LPT_Outlet_Temp_mean`
    pub fn serving_feature_names() -> Vec<String> {
        let mut names: Vec<String> = SensorChannel::ALL
            .iter()
            .map(|ch| ch.name().to_string())
            .collect();
        names.extend(
            SensorChannel::ALL
                .iter()
                .map(|ch| format!("{}_mean", ch.name())),
        );
        names
    }

    /// Ordered names of the training features
    pub fn training_feature_names() -> Vec<String> {
        let mut names = Self::serving_feature_names();
        names.extend(
            SensorChannel::ALL
                .iter()
                .map(|ch| format!("{}_diff", ch.name())),
        );
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_layout_is_raw_then_means() {
        let mut raw = SensorReading::default();
        raw.set(SensorChannel::LpcOutletTemp, 641.0);
        let mut means = SensorReading::default();
        means.set(SensorChannel::LpcOutletTemp, 640.0);

        let features = FeatureVector::serving(&raw, &means);
        assert_eq!(features.len(), SERVING_DIMENSION);
        assert_eq!(features.values()[0], 641.0);
        assert_eq!(features.values()[CHANNEL_COUNT], 640.0);
    }

    #[test]
    fn test_serving_names_align_with_values() {
        let names = FeatureVector::serving_feature_names();
        assert_eq!(names.len(), SERVING_DIMENSION);
        assert_eq!(names[0], "LPC_Outlet_Temp");
        assert_eq!(names[CHANNEL_COUNT], "LPC_Outlet_Temp_mean");
        assert_eq!(names[SERVING_DIMENSION - 1], "LPT_Coolant_Bleed_mean");
    }

    #[test]
    fn test_training_names_append_diff_block() {
        let names = FeatureVector::training_feature_names();
        assert_eq!(names.len(), TRAINING_DIMENSION);
        assert_eq!(names[SERVING_DIMENSION], "LPC_Outlet_Temp_diff");
        assert_eq!(names[TRAINING_DIMENSION - 1], "LPT_Coolant_Bleed_diff");
    }
}
