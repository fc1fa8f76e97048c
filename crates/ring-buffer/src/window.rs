//! History Window Implementation

use cmapss::{SensorChannel, SensorReading};

/// Default window capacity (10 cycles, matching the rolling window the
/// regressor was trained with)
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded FIFO of the most recent sensor readings
///
/// Storage is pre-allocated; pushing past capacity overwrites the oldest
/// reading. One window exists per streaming session and must be cleared when
/// the session switches engines.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    /// Pre-allocated storage
    storage: Box<[SensorReading]>,
    /// Index of the oldest reading
    head: usize,
    /// Number of readings currently held
    len: usize,
}

impl HistoryWindow {
    /// Create a window with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: vec![SensorReading::default(); capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Create a window with the training-time capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Append a reading, evicting the oldest if the window is full
    pub fn push(&mut self, reading: SensorReading) {
        let capacity = self.storage.len();
        if self.len < capacity {
            let idx = (self.head + self.len) % capacity;
            self.storage[idx] = reading;
            self.len += 1;
        } else {
            self.storage[self.head] = reading;
            self.head = (self.head + 1) % capacity;
        }
    }

    /// Number of readings currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window holds no readings
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Window capacity
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Drop all readings. Must run between unrelated time series so early
    /// rolling means are not contaminated by a previous engine's history.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Iterate readings oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &SensorReading> {
        (0..self.len).map(move |i| &self.storage[(self.head + i) % self.storage.len()])
    }

    /// Arithmetic mean of one channel over the readings currently held.
    /// Returns 0.0 for an empty window.
    pub fn channel_mean(&self, channel: SensorChannel) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let sum: f64 = self.iter().map(|r| r.get(channel)).sum();
        sum / self.len as f64
    }

    /// Per-channel means over the window, as a reading
    pub fn means(&self) -> SensorReading {
        let mut out = SensorReading::default();
        for ch in SensorChannel::ALL {
            out.set(ch, self.channel_mean(ch));
        }
        out
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(value: f64) -> SensorReading {
        let mut r = SensorReading::default();
        for ch in SensorChannel::ALL {
            r.set(ch, value);
        }
        r
    }

    #[test]
    fn test_push_and_len() {
        let mut window = HistoryWindow::new(10);
        for i in 0..5 {
            window.push(reading(i as f64));
        }
        assert_eq!(window.len(), 5);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut window = HistoryWindow::new(3);
        for i in 0..5 {
            window.push(reading(i as f64));
        }

        assert_eq!(window.len(), 3);
        let held: Vec<f64> = window
            .iter()
            .map(|r| r.get(SensorChannel::LpcOutletTemp))
            .collect();
        assert_eq!(held, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mean_over_partial_window() {
        let mut window = HistoryWindow::new(10);
        window.push(reading(1.0));
        window.push(reading(3.0));

        assert_eq!(window.channel_mean(SensorChannel::FanSpeed), 2.0);
    }

    #[test]
    fn test_single_reading_mean_equals_raw() {
        let mut window = HistoryWindow::with_default_capacity();
        window.push(reading(641.82));

        assert_eq!(window.channel_mean(SensorChannel::LpcOutletTemp), 641.82);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut window = HistoryWindow::new(4);
        window.push(reading(7.0));
        window.clear();

        assert!(window.is_empty());
        assert_eq!(window.channel_mean(SensorChannel::CoreSpeed), 0.0);

        // Reusable after clear
        window.push(reading(9.0));
        assert_eq!(window.channel_mean(SensorChannel::CoreSpeed), 9.0);
    }

    #[test]
    fn test_means_reading_covers_all_channels() {
        let mut window = HistoryWindow::new(2);
        let mut a = SensorReading::default();
        a.set(SensorChannel::BypassRatio, 8.2);
        let mut b = SensorReading::default();
        b.set(SensorChannel::BypassRatio, 8.6);
        window.push(a);
        window.push(b);

        let means = window.means();
        assert!((means.get(SensorChannel::BypassRatio) - 8.4).abs() < 1e-9);
        assert_eq!(means.get(SensorChannel::FanSpeed), 0.0);
    }
}
