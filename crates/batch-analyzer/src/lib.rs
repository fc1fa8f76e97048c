//! Batch Analyzer
//!
//! Runs the full feature/inference/classification pipeline over an uploaded
//! multi-engine dataset and produces one report row per engine, most urgent
//! first.

mod analyzer;

pub use analyzer::{analyze, AnalyzeError, BatchOutcome, EngineReportRow};
