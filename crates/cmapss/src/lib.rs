//! NASA C-MAPSS Dataset Schema and Parsing
//!
//! Defines the canonical sensor channels for the turbofan degradation
//! datasets, the fixed 26-column raw text layout, and run-to-failure RUL
//! labeling.

mod channel;
mod dataset;
mod reading;
mod score;

pub use channel::{ChannelThresholds, SensorChannel, CHANNEL_COUNT};
pub use dataset::{
    label_rul, load_dataset, parse_records, RawRecord, RAW_COLUMN_COUNT, RUL_CEILING,
};
pub use reading::SensorReading;
pub use score::nasa_score;

use thiserror::Error;

/// Errors while loading or parsing a C-MAPSS dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The requested input source does not exist
    #[error("dataset not found: {0}")]
    NotFound(String),

    /// A row did not match the fixed 26-column layout
    #[error("schema mismatch at line {line}: expected {expected} columns, got {actual}")]
    SchemaMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A column could not be parsed as a number
    #[error("invalid value at line {line}, column {column}: {value:?}")]
    InvalidValue {
        line: usize,
        column: usize,
        value: String,
    },
}
