//! Events produced by the simulation engine
//!
//! Each event pairs an absolute timestamp with the payload that a stream
//! scheduled for that instant, plus the index of the stream it came from.
//!
//! # Example
//!
//! ```rust
//! use fraud_sim_core_rs::models::TimedEvent;
//!
//! let event = TimedEvent::new(3_600, 0, "payload");
//! assert_eq!(event.time, 3_600);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::time::Timestamp;

/// An event emitted by the engine, in global time order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent<P> {
    /// Absolute time of the event
    pub time: Timestamp,
    /// Index of the stream that produced it (construction order)
    pub source: usize,
    pub payload: P,
}

impl<P> TimedEvent<P> {
    pub fn new(time: Timestamp, source: usize, payload: P) -> Self {
        Self {
            time,
            source,
            payload,
        }
    }

    /// Map the payload, keeping time and source
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> TimedEvent<Q> {
        TimedEvent {
            time: self.time,
            source: self.source,
            payload: f(self.payload),
        }
    }
}
