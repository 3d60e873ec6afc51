//! Rolling window of recent normalized requests
//!
//! Bounded FIFO consulted by the repetition detector. Entries are kept in
//! insertion order; once the window is full the oldest entry is evicted.

use crate::normalize::NormalizedRequest;
use std::collections::VecDeque;

/// Default number of requests remembered
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Fixed-capacity FIFO of normalized requests
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<NormalizedRequest>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append to the tail, evicting from the head past capacity
    pub fn append(&mut self, request: NormalizedRequest) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(request);
    }

    /// Entries from oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &NormalizedRequest> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every remembered request
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
