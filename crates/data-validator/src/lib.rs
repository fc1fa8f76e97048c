//! Data Validation
//!
//! Checks sensor readings against each channel's valid range and produces
//! data-quality flags. Valid ranges bound plausible readings; they are a
//! different purpose from the criticality cutoffs used for alert factors and
//! the two must not be conflated.

mod validator;

pub use validator::{OutOfRangeWarning, ValidationResult, Validator};

use thiserror::Error;

/// Errors during data validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value outside its channel's valid range
    #[error("{channel} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        channel: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
