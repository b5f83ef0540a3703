//! Event stream contract
//!
//! A stream is a stateful producer of `(offset, payload)` pairs, pulled
//! indefinitely. Each pull receives the absolute time at which it happens,
//! which time-of-day aware streams use to skip sleeping hours.

use thiserror::Error;

use crate::core::time::{Offset, Timestamp};

/// Terminal failure of a stream pull.
///
/// Production streams are infinite and never fail; the engine treats any
/// failure as fatal for the whole simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("stream exhausted")]
    Exhausted,

    #[error("stream failed: {reason}")]
    Failed { reason: String },
}

/// A polymorphic producer of an infinite sequence of timed payloads
///
/// # Example
/// ```
/// use fraud_sim_core_rs::des::{EventStream, StreamError};
///
/// struct Ticker(u32);
///
/// impl EventStream for Ticker {
///     type Payload = u32;
///
///     fn pull(&mut self, _now: u64) -> Result<(u64, u32), StreamError> {
///         self.0 += 1;
///         Ok((60, self.0))
///     }
/// }
///
/// let mut ticker = Ticker(0);
/// assert_eq!(ticker.pull(0), Ok((60, 1)));
/// ```
pub trait EventStream {
    type Payload;

    /// Produce the next `(offset, payload)` pair.
    ///
    /// `now` is the absolute time at which this pull occurs: the time of
    /// this stream's previous event, or the initial time on the first pull.
    fn pull(&mut self, now: Timestamp) -> Result<(Offset, Self::Payload), StreamError>;
}

impl<S: EventStream + ?Sized> EventStream for Box<S> {
    type Payload = S::Payload;

    fn pull(&mut self, now: Timestamp) -> Result<(Offset, Self::Payload), StreamError> {
        (**self).pull(now)
    }
}

impl<S: EventStream + ?Sized> EventStream for &mut S {
    type Payload = S::Payload;

    fn pull(&mut self, now: Timestamp) -> Result<(Offset, Self::Payload), StreamError> {
        (**self).pull(now)
    }
}

/// Stream backed by a closure, see [`from_fn`]
pub struct FnStream<F> {
    f: F,
}

/// Build a stream from a closure taking the feedback time
///
/// # Example
/// ```
/// use fraud_sim_core_rs::des::{from_fn, Simulation};
///
/// let every_ten = from_fn(|_now| Ok((10, "a")));
/// let mut sim = Simulation::new(vec![every_ten]).unwrap();
/// assert_eq!(sim.next_event().unwrap().time, 10);
/// assert_eq!(sim.next_event().unwrap().time, 20);
/// ```
pub fn from_fn<P, F>(f: F) -> FnStream<F>
where
    F: FnMut(Timestamp) -> Result<(Offset, P), StreamError>,
{
    FnStream { f }
}

impl<P, F> EventStream for FnStream<F>
where
    F: FnMut(Timestamp) -> Result<(Offset, P), StreamError>,
{
    type Payload = P;

    fn pull(&mut self, now: Timestamp) -> Result<(Offset, P), StreamError> {
        (self.f)(now)
    }
}
