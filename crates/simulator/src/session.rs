//! Engine Dataset and Session Cursor

use cmapss::{load_dataset, DatasetError, RawRecord};
use std::path::Path;
use tracing::{info, warn};

/// Demonstration engine used when a client connects without selecting one
pub const DEFAULT_UNIT: u32 = 34;

/// A loaded multi-engine dataset, read once at startup
#[derive(Debug, Clone)]
pub struct EngineDataset {
    records: Vec<RawRecord>,
}

impl EngineDataset {
    /// Load a training file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let records = load_dataset(path)?;
        Ok(Self { records })
    }

    /// Build a dataset from already-parsed records
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Distinct unit ids, ascending
    pub fn unit_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.records.iter().map(|r| r.unit).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Create an isolated session cursor for one engine. An unknown unit
    /// yields an explicit empty session rather than an error.
    pub fn session(&self, unit: u32) -> EngineSession {
        let series: Vec<RawRecord> = self
            .records
            .iter()
            .filter(|r| r.unit == unit)
            .copied()
            .collect();

        if series.is_empty() {
            warn!("no data found for engine {unit}");
        } else {
            info!("session created for engine {unit} ({} cycles)", series.len());
        }

        EngineSession {
            unit,
            series,
            cursor: 0,
        }
    }
}

/// Per-connection simulation cursor over one engine's time series
#[derive(Debug, Clone)]
pub struct EngineSession {
    unit: u32,
    series: Vec<RawRecord>,
    cursor: usize,
}

impl EngineSession {
    /// Engine unit id this session replays
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// Total cycles in the series
    pub fn total_cycles(&self) -> usize {
        self.series.len()
    }

    /// Zero-based position of the cursor
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Whether the session has no data (unknown unit)
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Yield the next cycle's record, or `None` once the series is
    /// exhausted (the stop signal, not an error)
    pub fn next_cycle(&mut self) -> Option<RawRecord> {
        let record = self.series.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(record)
    }

    /// Rewind to cycle 0 for the current engine. Called at the start of
    /// every new connection so each stream replays the full lifecycle.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmapss::parse_records;

    fn dataset() -> EngineDataset {
        let mut input = String::new();
        for unit in [1u32, 34] {
            for cycle in 1..=4 {
                let mut fields = vec![unit.to_string(), cycle.to_string()];
                fields.extend(std::iter::repeat("0.0".to_string()).take(3));
                fields.extend((1..=21).map(|i| format!("{}", unit as f64 * 1000.0 + i as f64)));
                input.push_str(&fields.join(" "));
                input.push('\n');
            }
        }
        EngineDataset::from_records(parse_records(&input).unwrap())
    }

    #[test]
    fn test_session_replays_one_unit_in_order() {
        let mut session = dataset().session(34);
        assert_eq!(session.total_cycles(), 4);

        let first = session.next_cycle().unwrap();
        assert_eq!(first.unit, 34);
        assert_eq!(first.cycle, 1);

        let second = session.next_cycle().unwrap();
        assert_eq!(second.cycle, 2);
    }

    #[test]
    fn test_exhausted_session_yields_none() {
        let mut session = dataset().session(1);
        for _ in 0..4 {
            assert!(session.next_cycle().is_some());
        }
        assert!(session.next_cycle().is_none());
        // Still None on further polls; the stream pauses rather than errors.
        assert!(session.next_cycle().is_none());
    }

    #[test]
    fn test_reset_rewinds_to_first_cycle() {
        let mut session = dataset().session(1);
        session.next_cycle();
        session.next_cycle();
        session.reset();

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.next_cycle().unwrap().cycle, 1);
    }

    #[test]
    fn test_unknown_unit_is_explicit_empty_session() {
        let mut session = dataset().session(99);
        assert!(session.is_empty());
        assert!(session.next_cycle().is_none());
    }

    #[test]
    fn test_unit_ids_are_sorted_and_deduped() {
        assert_eq!(dataset().unit_ids(), vec![1, 34]);
    }
}
