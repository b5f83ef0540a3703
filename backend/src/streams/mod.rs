//! Per-user behavior streams
//!
//! Each stream composes the field generators with a temporal policy and
//! emits `(offset, TransactionRecord)` pairs forever:
//! - **legitimate**: geometric delays, skipping the user's sleeping hours
//! - **fraud**: long dormant delays followed by tight bursts
//!
//! [`UserStream`] wraps both so a population is one concrete stream type
//! that the engine can hold (and checkpoint) without boxing.

pub mod fraud;
pub mod legitimate;

use serde::{Deserialize, Serialize};

use crate::core::time::{Offset, Timestamp};
use crate::des::{EventStream, StreamError};
use crate::models::{Label, TransactionRecord};

pub use fraud::{FraudBehaviorConfig, FraudUserStream};
pub use legitimate::{LegitimateBehaviorConfig, LegitimateUserStream};

/// Any user behavior stream in a population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserStream {
    Legitimate(LegitimateUserStream),
    Fraud(FraudUserStream),
}

impl UserStream {
    pub fn user_id(&self) -> u32 {
        match self {
            UserStream::Legitimate(stream) => stream.user_id(),
            UserStream::Fraud(stream) => stream.user_id(),
        }
    }

    pub fn label(&self) -> Label {
        match self {
            UserStream::Legitimate(_) => Label::Legitimate,
            UserStream::Fraud(_) => Label::Fraud,
        }
    }
}

impl EventStream for UserStream {
    type Payload = TransactionRecord;

    fn pull(&mut self, now: Timestamp) -> Result<(Offset, TransactionRecord), StreamError> {
        match self {
            UserStream::Legitimate(stream) => stream.pull(now),
            UserStream::Fraud(stream) => stream.pull(now),
        }
    }
}

impl From<LegitimateUserStream> for UserStream {
    fn from(stream: LegitimateUserStream) -> Self {
        UserStream::Legitimate(stream)
    }
}

impl From<FraudUserStream> for UserStream {
    fn from(stream: FraudUserStream) -> Self {
        UserStream::Fraud(stream)
    }
}
