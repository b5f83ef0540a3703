//! Simulation engine
//!
//! [`Simulation`] owns a fixed set of streams and a binary heap holding one
//! pending entry per stream. Each call to [`Simulation::next_event`] returns
//! the earliest pending entry and refills the queue from that entry's
//! stream. Output time is globally non-decreasing.
//!
//! # Example
//!
//! ```rust
//! use fraud_sim_core_rs::des::{from_fn, Simulation};
//!
//! let a = from_fn(|_now| Ok((10, 'A')));
//! let b = from_fn(|_now| Ok((15, 'B')));
//! let streams: Vec<Box<dyn fraud_sim_core_rs::des::EventStream<Payload = char>>> =
//!     vec![Box::new(a), Box::new(b)];
//!
//! let mut sim = Simulation::new(streams).unwrap();
//! let events: Vec<_> = sim
//!     .take_events(4)
//!     .unwrap()
//!     .into_iter()
//!     .map(|e| (e.time, e.payload))
//!     .collect();
//! assert_eq!(events, vec![(10, 'A'), (15, 'B'), (20, 'A'), (30, 'A')]);
//! ```

use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::queue::ScheduledEntry;
use super::stream::{EventStream, StreamError};
use crate::core::error::ConfigError;
use crate::core::time::{Offset, Timestamp};
use crate::models::TimedEvent;

/// Errors raised while building or running a simulation.
///
/// Every runtime variant is fatal: the engine halts and does not retry,
/// skip, or evict the offending stream.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("a simulation needs at least one stream")]
    NoStreams,

    #[error("stream {stream} failed at t={time}: {error}")]
    StreamFailed {
        stream: usize,
        time: Timestamp,
        #[source]
        error: StreamError,
    },

    #[error("stream {stream} overflowed virtual time: {time} + {offset}")]
    TimeOverflow {
        stream: usize,
        time: Timestamp,
        offset: Offset,
    },

    #[error("queue references unknown stream {stream}")]
    UnknownStream { stream: usize },

    #[error("simulation halted after a fatal error")]
    Halted,

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("config mismatch: snapshot has {expected}, current config is {actual}")]
    ConfigMismatch { expected: String, actual: String },
}

/// Merges a fixed set of event streams into one time-ordered sequence
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, S::Payload: Serialize",
    deserialize = "S: Deserialize<'de>, S::Payload: Deserialize<'de>"
))]
pub struct Simulation<S: EventStream> {
    streams: Vec<S>,
    queue: BinaryHeap<ScheduledEntry<S::Payload>>,
    initial_time: Timestamp,
    /// Largest time emitted so far
    clock: Option<Timestamp>,
    events_emitted: u64,
    halted: bool,
}

impl<S: EventStream> Simulation<S> {
    /// Create a simulation starting at time 0
    pub fn new(streams: Vec<S>) -> Result<Self, SimulationError> {
        Self::with_initial_time(streams, 0)
    }

    /// Create a simulation starting at `initial_time`.
    ///
    /// Every stream is pulled once, with `initial_time` as feedback, and its
    /// first event scheduled at `initial_time + offset`.
    pub fn with_initial_time(
        mut streams: Vec<S>,
        initial_time: Timestamp,
    ) -> Result<Self, SimulationError> {
        if streams.is_empty() {
            return Err(SimulationError::NoStreams);
        }

        let mut queue = BinaryHeap::with_capacity(streams.len());
        for (idx, stream) in streams.iter_mut().enumerate() {
            let (offset, payload) =
                stream
                    .pull(initial_time)
                    .map_err(|error| SimulationError::StreamFailed {
                        stream: idx,
                        time: initial_time,
                        error,
                    })?;
            let time = initial_time
                .checked_add(offset)
                .ok_or(SimulationError::TimeOverflow {
                    stream: idx,
                    time: initial_time,
                    offset,
                })?;
            queue.push(ScheduledEntry {
                time,
                source: idx,
                payload,
            });
        }

        tracing::debug!(streams = streams.len(), initial_time, "simulation initialized");

        Ok(Self {
            streams,
            queue,
            initial_time,
            clock: None,
            events_emitted: 0,
            halted: false,
        })
    }

    /// Produce the next event in global time order.
    ///
    /// Returns the entry that was at the head of the queue before its
    /// stream was pulled and rescheduled.
    pub fn next_event(&mut self) -> Result<TimedEvent<S::Payload>, SimulationError> {
        if self.halted {
            return Err(SimulationError::Halted);
        }
        let head = self.queue.pop().ok_or(SimulationError::NoStreams)?;

        let Some(stream) = self.streams.get_mut(head.source) else {
            self.halted = true;
            return Err(SimulationError::UnknownStream {
                stream: head.source,
            });
        };

        let (offset, payload) = match stream.pull(head.time) {
            Ok(next) => next,
            Err(error) => {
                self.halted = true;
                tracing::error!(stream = head.source, time = head.time, %error, "stream failed, halting simulation");
                return Err(SimulationError::StreamFailed {
                    stream: head.source,
                    time: head.time,
                    error,
                });
            }
        };

        let Some(next_time) = head.time.checked_add(offset) else {
            self.halted = true;
            return Err(SimulationError::TimeOverflow {
                stream: head.source,
                time: head.time,
                offset,
            });
        };

        self.queue.push(ScheduledEntry {
            time: next_time,
            source: head.source,
            payload,
        });

        self.clock = Some(head.time);
        self.events_emitted += 1;
        Ok(TimedEvent::new(head.time, head.source, head.payload))
    }

    /// Pull `count` events in order.
    pub fn take_events(
        &mut self,
        count: usize,
    ) -> Result<Vec<TimedEvent<S::Payload>>, SimulationError> {
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            events.push(self.next_event()?);
        }
        Ok(events)
    }

    /// Time of the most recently emitted event (`None` before the first)
    pub fn clock(&self) -> Option<Timestamp> {
        self.clock
    }

    /// Time of the event the next call will return
    pub fn peek_time(&self) -> Option<Timestamp> {
        self.queue.peek().map(|entry| entry.time)
    }

    pub fn initial_time(&self) -> Timestamp {
        self.initial_time
    }

    pub fn events_emitted(&self) -> u64 {
        self.events_emitted
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn num_streams(&self) -> usize {
        self.streams.len()
    }

    pub fn streams(&self) -> &[S] {
        &self.streams
    }

    /// Check that the queue holds exactly one entry per stream.
    ///
    /// Only a deserialized simulation can violate this.
    pub fn validate_queue(&self) -> Result<(), SimulationError> {
        let mut seen = vec![false; self.streams.len()];
        for entry in self.queue.iter() {
            match seen.get_mut(entry.source) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(SimulationError::UnknownStream {
                        stream: entry.source,
                    })
                }
            }
        }
        if let Some(missing) = seen.iter().position(|s| !*s) {
            return Err(SimulationError::UnknownStream { stream: missing });
        }
        Ok(())
    }
}

impl<S: EventStream> std::fmt::Debug for Simulation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("streams", &self.streams.len())
            .field("initial_time", &self.initial_time)
            .field("clock", &self.clock)
            .field("events_emitted", &self.events_emitted)
            .field("halted", &self.halted)
            .finish()
    }
}

/// Unbounded iteration: yields events forever, or one error and then stops.
impl<S: EventStream> Iterator for Simulation<S> {
    type Item = Result<TimedEvent<S::Payload>, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        Some(self.next_event())
    }
}
