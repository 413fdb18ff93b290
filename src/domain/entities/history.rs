use std::collections::vec_deque::{self, VecDeque};

use serde::Serialize;

use super::sample::MetricSample;
use crate::domain::value_objects::metric_kind::MetricKind;

/// Bounded, time-ordered FIFO of samples.
///
/// The backing `VecDeque` is allocated once at full capacity and reused as a
/// ring buffer: once full, every push evicts the oldest sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricHistory {
    capacity: usize,
    samples: VecDeque<MetricSample>,
}

impl MetricHistory {
    pub const DEFAULT_CAPACITY: usize = 20;

    /// An empty history holding at most `capacity` samples (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest one when full.
    ///
    /// A sample stamped earlier than the current newest one is re-stamped to
    /// the newest timestamp so the sequence stays non-decreasing.
    pub fn push(&mut self, mut sample: MetricSample) {
        debug_assert!(sample.is_within_bounds(), "sample out of range: {sample:?}");
        if let Some(last) = self.samples.back() {
            if sample.timestamp < last.timestamp {
                sample.timestamp = last.timestamp;
            }
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        debug_assert!(self.samples.len() <= self.capacity);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> vec_deque::Iter<'_, MetricSample> {
        self.samples.iter()
    }

    /// The most recent `count` samples, oldest first, or `None` when fewer
    /// than `count` are held (or `count` is zero).
    #[must_use]
    pub fn trailing(&self, count: usize) -> Option<vec_deque::Iter<'_, MetricSample>> {
        let len = self.samples.len();
        if count == 0 || count > len {
            return None;
        }
        Some(self.samples.range(len - count..))
    }

    /// One dimension across the whole history, oldest first.
    #[must_use]
    pub fn values(&self, metric: MetricKind) -> Vec<f64> {
        self.samples.iter().map(|s| metric.value_of(s)).collect()
    }
}

impl Default for MetricHistory {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a MetricHistory {
    type Item = &'a MetricSample;
    type IntoIter = vec_deque::Iter<'a, MetricSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
