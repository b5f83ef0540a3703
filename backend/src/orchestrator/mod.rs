//! Orchestrator - population setup and the generation loop
//!
//! See `engine.rs` for the orchestrator and `checkpoint.rs` for save/load.

pub mod checkpoint;
pub mod engine;

pub use checkpoint::{compute_config_hash, StateSnapshot};
pub use engine::{Orchestrator, OrchestratorConfig};
