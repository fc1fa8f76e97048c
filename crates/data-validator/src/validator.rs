//! Reading Validator

use crate::ValidationError;
use cmapss::{SensorChannel, SensorReading};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// One out-of-range observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutOfRangeWarning {
    /// Wire name of the offending channel
    pub sensor: &'static str,
    /// Observed value
    pub value: f64,
    /// Expected range, formatted `min-max` for display
    pub expected_range: String,
}

impl fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} (expected {})",
            self.sensor, self.value, self.expected_range
        )
    }
}

/// Result of validating one reading
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether every channel was inside its valid range
    pub valid: bool,
    /// Channels that fell outside their valid range
    pub out_of_range: Vec<OutOfRangeWarning>,
}

impl ValidationResult {
    /// Data-quality flag for the batch report
    pub fn quality_flag(&self) -> &'static str {
        if self.valid {
            "valid"
        } else {
            "anomaly_detected"
        }
    }

    /// Data-quality flag for the streaming payload
    pub fn stream_flag(&self) -> &'static str {
        if self.valid {
            "valid"
        } else {
            "anomaly"
        }
    }
}

/// Validator for canonical sensor readings
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check one channel's value against its valid range
    pub fn validate_channel(
        &self,
        channel: SensorChannel,
        value: f64,
    ) -> Result<(), ValidationError> {
        let (min, max) = channel.thresholds().valid_range;
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                channel: channel.name(),
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Check every channel of a reading, collecting out-of-range warnings
    pub fn validate(&self, reading: &SensorReading) -> ValidationResult {
        let mut out_of_range = Vec::new();

        for (channel, value) in reading.iter() {
            if self.validate_channel(channel, value).is_err() {
                let (min, max) = channel.thresholds().valid_range;
                out_of_range.push(OutOfRangeWarning {
                    sensor: channel.name(),
                    value,
                    expected_range: format!("{min}-{max}"),
                });
            }
        }

        if !out_of_range.is_empty() {
            debug!("{} channel(s) out of range", out_of_range.len());
        }

        ValidationResult {
            valid: out_of_range.is_empty(),
            out_of_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A reading with every channel at the midpoint of its valid range
    fn nominal_reading() -> SensorReading {
        let mut reading = SensorReading::default();
        for ch in SensorChannel::ALL {
            let (min, max) = ch.thresholds().valid_range;
            reading.set(ch, (min + max) / 2.0);
        }
        reading
    }

    #[test]
    fn test_nominal_reading_is_valid() {
        let result = Validator::new().validate(&nominal_reading());
        assert!(result.valid);
        assert!(result.out_of_range.is_empty());
        assert_eq!(result.quality_flag(), "valid");
    }

    #[test]
    fn test_out_of_range_lpt_temp_is_flagged() {
        let mut reading = nominal_reading();
        reading.set(SensorChannel::LptOutletTemp, 2000.0);

        let result = Validator::new().validate(&reading);
        assert!(!result.valid);
        assert_eq!(result.quality_flag(), "anomaly_detected");
        assert_eq!(result.out_of_range.len(), 1);

        let warning = &result.out_of_range[0];
        assert_eq!(warning.sensor, "LPT_Outlet_Temp");
        assert_eq!(warning.expected_range, "1020-1445");
        assert_eq!(warning.to_string(), "LPT_Outlet_Temp: 2000.00 (expected 1020-1445)");
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let validator = Validator::new();
        let (min, max) = SensorChannel::CombustionPressure.thresholds().valid_range;
        assert!(validator
            .validate_channel(SensorChannel::CombustionPressure, min)
            .is_ok());
        assert!(validator
            .validate_channel(SensorChannel::CombustionPressure, max)
            .is_ok());
        assert!(validator
            .validate_channel(SensorChannel::CombustionPressure, max + 0.01)
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_in_range_values_always_validate(frac in 0.0f64..=1.0) {
            let validator = Validator::new();
            for ch in SensorChannel::ALL {
                let (min, max) = ch.thresholds().valid_range;
                let value = min + frac * (max - min);
                prop_assert!(validator.validate_channel(ch, value).is_ok());
            }
        }
    }
}
