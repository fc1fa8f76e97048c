//! Storage Layer
//!
//! Bounded in-memory retention for alert history and the prediction log,
//! plus the process-wide counters surfaced by the health endpoint. All
//! shared mutable state is serialized behind simple locks; no
//! high-contention path exists.

mod repository;

pub use repository::{PredictionRecord, Repository, ALERT_HISTORY_CAPACITY};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock was poisoned by a panicking writer
    #[error("storage lock poisoned: {0}")]
    Lock(String),
}
