//! RUL Inference Engine
//!
//! Wraps the trained regression artifact behind a capability interface:
//! `predict(FeatureVector) -> RUL estimate`. The artifact is an ONNX file
//! plus a feature manifest (ordered name list) that is validated against the
//! feature pipeline at load time, so column-order drift fails loudly instead
//! of silently mis-aligning predictions.

mod model;
mod onnx;

pub use model::{validate_feature_count, FeatureManifest, RulModel};
pub use onnx::OnnxRulModel;

use thiserror::Error;

/// Errors during model loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The artifact is missing or could not be deserialized
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The feature manifest is missing or malformed
    #[error("feature manifest error: {0}")]
    ManifestError(String),

    /// The artifact expects a different feature at this position
    #[error("feature order mismatch at position {position}: model expects {expected:?}, pipeline produces {actual:?}")]
    FeatureOrderMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    /// The artifact expects a different number of features
    #[error("feature count mismatch: model expects {expected}, pipeline produces {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// Inference itself failed
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// Clamp a raw model output to the served RUL range [0, ceiling].
///
/// Applied at the serving boundary, not inside the regressor, so display and
/// alerting logic stay bounded regardless of the artifact in use.
pub fn clamp_rul(value: f64) -> f64 {
    value.clamp(0.0, cmapss::RUL_CEILING)
}
