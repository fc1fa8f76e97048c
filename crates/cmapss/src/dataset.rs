//! Raw Dataset Parsing and RUL Labeling
//!
//! C-MAPSS files are whitespace-delimited text with no header and a fixed
//! 26-column layout: unit id, cycle index, 3 operating-condition settings,
//! then 21 raw sensor channels in numeric order.

use crate::DatasetError;
use std::path::Path;
use tracing::{debug, info};

/// Fixed column count of a raw row
pub const RAW_COLUMN_COUNT: usize = 26;

/// Training-time RUL ceiling, in cycles. Degradation further from failure
/// than this carries no usable signal, so targets are clipped here and
/// predictions are re-clipped at the serving boundary.
pub const RUL_CEILING: f64 = 125.0;

/// One parsed row of a C-MAPSS file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    /// Engine unit id
    pub unit: u32,
    /// Cycle index (1-based in the source data)
    pub cycle: u32,
    /// Operating-condition settings (excluded from modeling)
    pub settings: [f64; 3],
    /// All 21 raw sensor values, in numeric order
    pub sensors: [f64; 21],
}

/// Parse whitespace-delimited rows. Blank lines are skipped; a row with the
/// wrong column count is a schema error, never silently truncated.
pub fn parse_records(input: &str) -> Result<Vec<RawRecord>, DatasetError> {
    let mut records = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != RAW_COLUMN_COUNT {
            return Err(DatasetError::SchemaMismatch {
                line: line_no + 1,
                expected: RAW_COLUMN_COUNT,
                actual: fields.len(),
            });
        }

        let parse = |column: usize| -> Result<f64, DatasetError> {
            fields[column]
                .parse::<f64>()
                .map_err(|_| DatasetError::InvalidValue {
                    line: line_no + 1,
                    column: column + 1,
                    value: fields[column].to_string(),
                })
        };

        let unit = parse(0)? as u32;
        let cycle = parse(1)? as u32;
        let mut settings = [0.0; 3];
        for (i, s) in settings.iter_mut().enumerate() {
            *s = parse(2 + i)?;
        }
        let mut sensors = [0.0; 21];
        for (i, s) in sensors.iter_mut().enumerate() {
            *s = parse(5 + i)?;
        }

        records.push(RawRecord {
            unit,
            cycle,
            settings,
            sensors,
        });
    }

    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Load and parse a dataset file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, DatasetError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|_| DatasetError::NotFound(path.display().to_string()))?;

    let records = parse_records(&contents)?;
    info!(
        "loaded {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Run-to-failure RUL labels, aligned by index with `records`.
///
/// The last recorded cycle of a unit is its failure point, so
/// RUL at cycle t is (max cycle for the unit) - t, clipped at [`RUL_CEILING`].
pub fn label_rul(records: &[RawRecord]) -> Vec<f64> {
    let mut max_cycle = std::collections::HashMap::new();
    for r in records {
        let entry = max_cycle.entry(r.unit).or_insert(0u32);
        *entry = (*entry).max(r.cycle);
    }

    records
        .iter()
        .map(|r| {
            let rul = f64::from(max_cycle[&r.unit] - r.cycle);
            rul.min(RUL_CEILING)
        })
        .collect()
}
