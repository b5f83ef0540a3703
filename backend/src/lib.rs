//! Fraud Simulator Core - Rust Engine
//!
//! Synthetic card-transaction generator built on a discrete-event engine.
//!
//! # Architecture
//!
//! - **core**: Virtual time, awake windows, configuration errors
//! - **rng**: Deterministic random number generation and seed resolution
//! - **generators**: Stochastic field generators (amount, entry type, merchant, ...)
//! - **streams**: Per-user legitimate and fraudulent behavior streams
//! - **des**: Priority-queue merge of event streams into global time order
//! - **orchestrator**: Population setup, generation loop, checkpoints
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG, one per stream)
//! 3. Emitted timestamps never decrease

// Module declarations
pub mod core;
pub mod des;
pub mod generators;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod streams;

// Re-exports for convenience
pub use crate::core::{AwakeWindow, ConfigError, Offset, Timestamp};
pub use des::{EventStream, Simulation, SimulationError, StreamError};
pub use models::{Cents, EntryType, Label, TimedEvent, TransactionRecord};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use rng::{RngManager, RngOptions};
pub use streams::{FraudBehaviorConfig, LegitimateBehaviorConfig, UserStream};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn fraud_sim_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyTransactionSimulator>()?;
    Ok(())
}
