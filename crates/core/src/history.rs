use crate::sample::Sample;
use std::collections::VecDeque;

/// Default buffer capacity: five minutes of history at one probe per second.
pub const DEFAULT_HISTORY_LENGTH: usize = 300;

/// Fixed-capacity FIFO of recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer.  A capacity of zero is bumped to one so the
    /// newest sample is always retained.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Copy the current contents out so readers never see a half-applied append.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            samples:  self.samples.iter().cloned().collect(),
            capacity: self.capacity,
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Most recently appended sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LENGTH)
    }
}

/// Immutable point-in-time copy of a [`HistoryBuffer`].
///
/// Keeps the capacity of the buffer it was taken from: the chart maps sample
/// positions against the full window, not against the current length.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    samples:  Vec<Sample>,
    capacity: usize,
}

impl Snapshot {
    pub fn new(samples: Vec<Sample>, capacity: usize) -> Self {
        let capacity = capacity.max(samples.len()).max(1);
        Self { samples, capacity }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Latencies of the successful samples, in buffer order.
    pub fn latencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().filter_map(Sample::latency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn ms(v: f64) -> Sample {
        Sample::success(Local::now(), v)
    }

    #[test]
    fn evicts_oldest_first() {
        let mut buf = HistoryBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            buf.append(ms(v));
        }
        let snap = buf.snapshot();
        let got: Vec<f64> = snap.latencies().collect();
        assert_eq!(got, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut buf = HistoryBuffer::new(5);
        for i in 0..17 {
            buf.append(ms(i as f64));
            assert!(buf.len() <= 5);
        }
        let got: Vec<f64> = buf.snapshot().latencies().collect();
        assert_eq!(got, vec![12.0, 13.0, 14.0, 15.0, 16.0]);
    }

    #[test]
    fn snapshot_is_independent_of_later_appends() {
        let mut buf = HistoryBuffer::new(2);
        buf.append(ms(1.0));
        let snap = buf.snapshot();
        buf.append(ms(2.0));
        buf.append(Sample::failure(Local::now()));
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.capacity(), 2);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buf = HistoryBuffer::new(4);
        buf.append(ms(1.0));
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.latest().is_none());
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut buf = HistoryBuffer::new(0);
        buf.append(ms(1.0));
        buf.append(ms(2.0));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.latest().and_then(Sample::latency), Some(2.0));
    }
}
