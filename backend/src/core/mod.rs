//! Core value types shared by every layer of the simulator
//!
//! - **time**: virtual-time units and the local day clock
//! - **error**: configuration errors raised at construction

pub mod error;
pub mod time;

pub use error::ConfigError;
pub use time::{AwakeWindow, Offset, Timestamp, SECONDS_PER_DAY, SECONDS_PER_HOUR};
