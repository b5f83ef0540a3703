//! Checkpoint save/load
//!
//! A snapshot captures the whole engine: the pending queue, the clock, and
//! every stream's internal state including RNG state. Restoring a snapshot
//! continues with exactly the events the original run would have produced.
//!
//! Snapshots carry the SHA-256 hash of the configuration they were taken
//! under; loading against a different configuration is rejected.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::des::{Simulation, SimulationError};
use crate::rng::SeedProvenance;
use crate::streams::UserStream;

use super::engine::{Orchestrator, OrchestratorConfig};

/// Serialized orchestrator state
#[derive(Debug, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// SHA256 hash of the config the snapshot was taken under
    pub config_hash: String,
    pub num_fraud_users: usize,
    pub simulation: Simulation<UserStream>,
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

impl Orchestrator {
    /// Serialize the full simulation state to JSON
    pub fn save_state(&self) -> Result<String, SimulationError> {
        let snapshot = StateSnapshotRef {
            config_hash: self.config_hash(),
            num_fraud_users: self.num_fraud_users(),
            simulation: &self.simulation,
        };
        serde_json::to_string(&snapshot).map_err(|e| {
            SimulationError::SerializationError(format!("State serialization failed: {}", e))
        })
    }

    /// Restore an orchestrator from [`Orchestrator::save_state`] output
    ///
    /// # Errors
    ///
    /// * `ConfigMismatch` - snapshot was taken under a different config
    /// * `SerializationError` - malformed snapshot
    /// * `UnknownStream` - queue and stream set disagree
    pub fn load_state(config: OrchestratorConfig, json: &str) -> Result<Self, SimulationError> {
        config.validate()?;
        let snapshot: StateSnapshot = serde_json::from_str(json).map_err(|e| {
            SimulationError::SerializationError(format!("State deserialization failed: {}", e))
        })?;

        let config_hash = compute_config_hash(&config)?;
        if snapshot.config_hash != config_hash {
            return Err(SimulationError::ConfigMismatch {
                expected: snapshot.config_hash,
                actual: config_hash,
            });
        }
        snapshot.simulation.validate_queue()?;

        // Only a seeded config can hash-match a reproducible run; an unseeded
        // snapshot still restores its exact stream state.
        let provenance = match config.rng_seed {
            Some(seed) => SeedProvenance::Explicit(seed),
            None => SeedProvenance::Supplied,
        };

        Ok(Orchestrator::from_parts(
            config,
            config_hash,
            provenance,
            snapshot.num_fraud_users,
            snapshot.simulation,
        ))
    }
}

/// Borrowing twin of [`StateSnapshot`] used when saving
#[derive(Serialize)]
struct StateSnapshotRef<'a> {
    config_hash: &'a str,
    num_fraud_users: usize,
    simulation: &'a Simulation<UserStream>,
}
