//! Sensor Reading
//!
//! One cycle's worth of canonical channel values, stored in canonical order.

use crate::channel::{SensorChannel, CHANNEL_COUNT};
use crate::dataset::RawRecord;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Values for all 14 canonical channels at a single cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    values: [f64; CHANNEL_COUNT],
}

impl SensorReading {
    /// Build a reading by selecting the canonical channels out of a raw row
    pub fn from_raw(record: &RawRecord) -> Self {
        let mut values = [0.0; CHANNEL_COUNT];
        for (i, ch) in SensorChannel::ALL.iter().enumerate() {
            values[i] = record.sensors[ch.raw_index()];
        }
        Self { values }
    }

    /// Build a reading from a name/value map. Channels absent from the map
    /// default to 0.0 rather than erroring; the regressor requires a complete
    /// vector, so this is lossy but never silent corruption.
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let mut values = [0.0; CHANNEL_COUNT];
        for (i, ch) in SensorChannel::ALL.iter().enumerate() {
            values[i] = map.get(ch.name()).copied().unwrap_or(0.0);
        }
        Self { values }
    }

    /// Value for one channel
    pub fn get(&self, channel: SensorChannel) -> f64 {
        self.values[channel.index()]
    }

    /// Set the value for one channel
    pub fn set(&mut self, channel: SensorChannel, value: f64) {
        self.values[channel.index()] = value;
    }

    /// Values in canonical order
    pub fn values(&self) -> &[f64; CHANNEL_COUNT] {
        &self.values
    }

    /// Iterate (channel, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (SensorChannel, f64)> + '_ {
        SensorChannel::ALL
            .iter()
            .zip(self.values.iter())
            .map(|(ch, v)| (*ch, *v))
    }
}

impl Serialize for SensorReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CHANNEL_COUNT))?;
        for (ch, value) in self.iter() {
            map.serialize_entry(ch.name(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SensorReading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, f64>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}
