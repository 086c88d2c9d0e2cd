//! Rolling window of the most recent readings.

use std::collections::VecDeque;

use super::Reading;

/// Fixed-capacity FIFO of readings in arrival order.
///
/// Appending to a full buffer evicts the oldest reading first, so the buffer
/// always holds the last `capacity` readings seen.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    capacity: usize,
    readings: VecDeque<Reading>,
}

impl SampleBuffer {
    /// Creates an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            readings: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Add one reading, evicting the oldest when full.
    pub fn append(&mut self, reading: Reading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    /// Most recently appended reading.
    pub fn latest(&self) -> Option<Reading> {
        self.readings.back().copied()
    }

    /// Current contents, oldest first.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }

    /// The last `k` readings in arrival order, or `None` if fewer are buffered.
    pub fn recent(&self, k: usize) -> Option<Vec<Reading>> {
        let len = self.readings.len();
        if len < k {
            return None;
        }
        Some(self.readings.range(len - k..).copied().collect())
    }

    /// `[index, mm]` pairs for charting, index 0 being the oldest reading.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.readings
            .iter()
            .enumerate()
            .map(|(i, r)| [i as f64, r.mm()])
            .collect()
    }
}
