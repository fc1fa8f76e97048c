//! ONNX Regressor via tract

use crate::model::{validate_feature_count, FeatureManifest, RulModel};
use crate::InferenceError;
use feature_engine::FeatureVector;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// RUL regressor backed by an exported ONNX model
pub struct OnnxRulModel {
    plan: OnnxPlan,
    feature_names: Vec<String>,
}

impl std::fmt::Debug for OnnxRulModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxRulModel")
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl OnnxRulModel {
    /// Load the artifact and its feature manifest. The manifest must match
    /// the pipeline's serving feature order exactly; otherwise loading fails
    /// with a [`InferenceError::FeatureOrderMismatch`].
    pub fn load(
        model_path: impl AsRef<Path>,
        manifest_path: impl AsRef<Path>,
    ) -> Result<Self, InferenceError> {
        let model_path = model_path.as_ref();

        let manifest = FeatureManifest::load(manifest_path)?;
        manifest.validate_against(&FeatureVector::serving_feature_names())?;
        let width = manifest.features.len();

        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .map_err(|e| InferenceError::ModelUnavailable(format!("{}: {e}", model_path.display())))?
            .with_input_fact(0, f32::fact([1, width]).into())
            .map_err(|e| InferenceError::ModelUnavailable(e.to_string()))?
            .into_optimized()
            .map_err(|e| InferenceError::ModelUnavailable(e.to_string()))?
            .into_runnable()
            .map_err(|e| InferenceError::ModelUnavailable(e.to_string()))?;

        info!(
            "loaded ONNX regressor from {} ({} features)",
            model_path.display(),
            width
        );

        Ok(Self {
            plan,
            feature_names: manifest.features,
        })
    }
}

impl RulModel for OnnxRulModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        validate_feature_count(features, self.feature_names.len())?;

        let values: Vec<f32> = features.values().iter().map(|&v| v as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, values.len()), values)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        view.iter()
            .next()
            .map(|&v| f64::from(v))
            .ok_or_else(|| InferenceError::InferenceFailed("empty model output".to_string()))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
