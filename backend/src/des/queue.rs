use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::time::Timestamp;

/// A stream's pending event, held in the engine's priority queue.
///
/// Ordered by `time`, then by `source` index. There is exactly one entry per
/// stream, so the order is total and ties resolve by stream construction
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEntry<P> {
    pub time: Timestamp,
    pub source: usize,
    pub payload: P,
}

impl<P> PartialEq for ScheduledEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.source == other.source
    }
}

impl<P> Eq for ScheduledEntry<P> {}

impl<P> PartialOrd for ScheduledEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for ScheduledEntry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap; reverse so the earliest entry is on top
        match other.time.cmp(&self.time) {
            Ordering::Equal => other.source.cmp(&self.source),
            ord => ord,
        }
    }
}
