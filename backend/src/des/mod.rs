//! Discrete-event simulation engine
//!
//! Merges any number of infinite event streams into one globally
//! time-ordered stream using a min-priority queue keyed on absolute time.
//!
//! # Architecture
//!
//! ```text
//! next_event():
//! 1. Pop the head entry (smallest absolute time)
//! 2. Pull the head's stream, passing the head's time as feedback
//! 3. Re-insert that stream at head.time + offset
//! 4. Return the popped head
//! ```
//!
//! Execution is single-threaded and pull-based: a stream only advances when
//! it is the head.

pub mod engine;
pub mod queue;
pub mod stream;

pub use engine::{Simulation, SimulationError};
pub use queue::ScheduledEntry;
pub use stream::{from_fn, EventStream, FnStream, StreamError};
