//! Feature Engineering Engine
//!
//! Converts raw sensor records into the exact feature vectors the RUL
//! regressor was fit with: canonical channel selection, trailing rolling
//! means, and (in the training path) first differences, in a fixed field
//! order that must never drift from the trained artifact.

mod features;
mod incremental;
mod transformer;

pub use features::{FeatureVector, SERVING_DIMENSION, TRAINING_DIMENSION};
pub use incremental::IncrementalFeatureState;
pub use transformer::{transform_batch, TransformedRow};
