//! Regressor Capability Interface

use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A trained RUL regressor: a pure function of the feature vector.
///
/// Implementations are stateless after load and safe to share across
/// concurrent sessions without locking. Output is unclamped; callers apply
/// [`crate::clamp_rul`] at the serving boundary.
pub trait RulModel: Send + Sync {
    /// Predict remaining useful life in cycles
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// The ordered feature names the model was fit with
    fn feature_names(&self) -> &[String];
}

/// Guard against a feature vector of the wrong width
pub fn validate_feature_count(
    features: &FeatureVector,
    expected: usize,
) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError::FeatureCountMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Sidecar manifest shipped with the artifact: the ordered feature-name list
/// the regressor was fit with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureManifest {
    pub features: Vec<String>,
}

impl FeatureManifest {
    /// Load the manifest JSON from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ManifestError(format!("{}: {e}", path.display()))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| InferenceError::ManifestError(e.to_string()))
    }

    /// Compare against the feature order the pipeline produces. Any
    /// divergence is a loud error; a silent mismatch here would corrupt
    /// every downstream prediction.
    pub fn validate_against(&self, produced: &[String]) -> Result<(), InferenceError> {
        if self.features.len() != produced.len() {
            return Err(InferenceError::FeatureCountMismatch {
                expected: self.features.len(),
                actual: produced.len(),
            });
        }
        for (position, (expected, actual)) in
            self.features.iter().zip(produced.iter()).enumerate()
        {
            if expected != actual {
                return Err(InferenceError::FeatureOrderMismatch {
                    position,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }
}
