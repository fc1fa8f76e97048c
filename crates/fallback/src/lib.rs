//! Rule-Based Fallback Regressor
//!
//! Coarse heuristic RUL baseline served when the trained artifact is missing
//! or incompatible. Predictions from this path are flagged degraded by the
//! serving layer; the process keeps running instead of crashing on a missing
//! operational dependency.

mod baseline;

pub use baseline::HeuristicBaseline;
