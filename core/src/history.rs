//! Rolling sample history behind the trend charts.
//!
//! RULE: Only the update scheduler appends. Chart adapters receive
//! `&TimeSeriesBuffer` and read.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of numeric samples. Oldest is evicted on overflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesBuffer {
    capacity: usize,
    samples:  VecDeque<f64>,
}

impl TimeSeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one sample. Returns the evicted sample when the buffer was full.
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    pub fn capacity(&self) -> usize { self.capacity }
    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
    pub fn is_full(&self) -> bool { self.samples.len() == self.capacity }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Label each sample with its age in hours: "{n-1}:00" down to "0:00".
    pub fn hourly_trend(&self) -> TrendSeries {
        let n = self.samples.len();
        TrendSeries {
            labels: (0..n).rev().map(|h| format!("{h}:00")).collect(),
            values: self.to_vec(),
        }
    }
}

/// A labelled series ready for a chart surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_reports_eviction_only_when_full() {
        let mut buf = TimeSeriesBuffer::new(2);
        assert_eq!(buf.push(1.0), None);
        assert_eq!(buf.push(2.0), None);
        assert!(buf.is_full());
        assert_eq!(buf.push(3.0), Some(1.0));
        assert_eq!(buf.to_vec(), vec![2.0, 3.0]);
        assert_eq!(buf.latest(), Some(3.0));
    }

    #[test]
    fn hourly_labels_count_down_to_zero() {
        let mut buf = TimeSeriesBuffer::new(24);
        for v in 0..3 {
            buf.push(v as f64);
        }
        let trend = buf.hourly_trend();
        assert_eq!(trend.labels, vec!["2:00", "1:00", "0:00"]);
        assert_eq!(trend.values, vec![0.0, 1.0, 2.0]);
    }
}
