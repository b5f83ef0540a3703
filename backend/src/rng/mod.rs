//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! All randomness in the simulator goes through this module; no generator
//! touches a process-wide RNG.

mod options;
mod xorshift;

pub use options::{ResolvedRng, RngOptions, SeedProvenance};
pub use xorshift::RngManager;
