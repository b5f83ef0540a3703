//! Orchestrator Engine
//!
//! Builds a population of user streams from configuration and drives the
//! discrete-event engine over them:
//!
//! ```text
//! Setup:
//! 1. Resolve the master RNG from rng_seed
//! 2. Draw the shared common-merchant pool
//! 3. For each user: a legitimate stream, plus (with probability
//!    fraud_user_rate) a fraud stream, each seeded from the master RNG
//! 4. Prime the engine at initial_time
//!
//! Run:
//!   next_event() → (timestamp, TransactionRecord) in global time order
//! ```
//!
//! # Example
//!
//! ```rust
//! use fraud_sim_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
//!
//! let config = OrchestratorConfig {
//!     rng_seed: Some(12345),
//!     num_users: 50,
//!     ..OrchestratorConfig::default()
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! for event in Orchestrator::take(&mut orchestrator, 10).unwrap() {
//!     println!("{} {} {}", event.time, event.payload.label(), event.payload.amount());
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_probability, ConfigError};
use crate::core::time::Timestamp;
use crate::des::{Simulation, SimulationError};
use crate::generators::sample_common_merchants;
use crate::models::{TimedEvent, TransactionRecord};
use crate::rng::{RngOptions, SeedProvenance};
use crate::streams::{
    FraudBehaviorConfig, FraudUserStream, LegitimateBehaviorConfig, LegitimateUserStream,
    UserStream,
};

use super::checkpoint::compute_config_hash;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Every field has a default, so JSON files only need the values they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Master seed; `None` derives one from the clock (not reproducible)
    pub rng_seed: Option<u64>,

    /// Absolute time at which every stream starts
    pub initial_time: Timestamp,

    pub num_users: u32,

    /// Merchant ids are `0..num_merchants`
    pub num_merchants: u32,

    /// Size of the shared popular-merchant pool
    pub num_common_merchants: u32,

    /// Probability that a user also carries a fraud stream
    pub fraud_user_rate: f64,

    pub legitimate: LegitimateBehaviorConfig,

    pub fraud: FraudBehaviorConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            initial_time: 0,
            num_users: 1_000,
            num_merchants: 10_000,
            num_common_merchants: 500,
            fraud_user_rate: 0.05,
            legitimate: LegitimateBehaviorConfig::default(),
            fraud: FraudBehaviorConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimulationError::SerializationError(format!("config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::SerializationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Fail fast on any malformed parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_users == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_users",
                reason: "must be positive".to_string(),
            });
        }
        if self.num_merchants == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_merchants",
                reason: "must be positive".to_string(),
            });
        }
        if self.num_common_merchants > self.num_merchants {
            return Err(ConfigError::InvalidParameter {
                name: "num_common_merchants",
                reason: format!(
                    "{} exceeds num_merchants {}",
                    self.num_common_merchants, self.num_merchants
                ),
            });
        }
        if self.legitimate.merchant_tiers.favorite > 0.0
            && self.legitimate.favorites_per_user > self.num_common_merchants as usize
        {
            return Err(ConfigError::InvalidParameter {
                name: "favorites_per_user",
                reason: format!(
                    "{} exceeds num_common_merchants {}",
                    self.legitimate.favorites_per_user, self.num_common_merchants
                ),
            });
        }
        validate_probability("fraud_user_rate", self.fraud_user_rate)?;
        self.legitimate.validate()?;
        self.fraud.validate()?;
        Ok(())
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Transaction generator over a population of user streams
pub struct Orchestrator {
    config: OrchestratorConfig,
    config_hash: String,
    seed_provenance: SeedProvenance,
    num_fraud_users: usize,
    pub(super) simulation: Simulation<UserStream>,
}

impl Orchestrator {
    /// Build the population and prime the engine
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - malformed configuration
    /// * `StreamFailed` - a stream could not produce its first event
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let config_hash = compute_config_hash(&config)?;

        let resolved = RngOptions::from(config.rng_seed).resolve();
        let seed_provenance = resolved.provenance;
        let mut master = resolved.rng;

        let common = sample_common_merchants(
            config.num_merchants,
            config.num_common_merchants,
            &mut master,
        )?;

        let mut streams = Vec::with_capacity(config.num_users as usize);
        let mut num_fraud_users = 0;
        for user_id in 0..config.num_users {
            let legitimate = LegitimateUserStream::new(
                user_id,
                &config.legitimate,
                config.num_merchants,
                common.clone(),
                RngOptions::seeded(master.next()),
            )?;
            streams.push(UserStream::from(legitimate));

            if master.chance(config.fraud_user_rate) {
                let fraud = FraudUserStream::new(
                    user_id,
                    &config.fraud,
                    config.num_merchants,
                    RngOptions::seeded(master.next()),
                )?;
                streams.push(UserStream::from(fraud));
                num_fraud_users += 1;
            }
        }

        tracing::debug!(
            users = config.num_users,
            fraud_users = num_fraud_users,
            streams = streams.len(),
            common_merchants = common.len(),
            config_hash = %config_hash,
            "population built"
        );

        let simulation = Simulation::with_initial_time(streams, config.initial_time)?;

        Ok(Self {
            config,
            config_hash,
            seed_provenance,
            num_fraud_users,
            simulation,
        })
    }

    pub(super) fn from_parts(
        config: OrchestratorConfig,
        config_hash: String,
        seed_provenance: SeedProvenance,
        num_fraud_users: usize,
        simulation: Simulation<UserStream>,
    ) -> Self {
        Self {
            config,
            config_hash,
            seed_provenance,
            num_fraud_users,
            simulation,
        }
    }

    /// Next transaction in global time order
    pub fn next_event(&mut self) -> Result<TimedEvent<TransactionRecord>, SimulationError> {
        self.simulation.next_event()
    }

    /// Next `count` transactions in global time order
    pub fn take(
        &mut self,
        count: usize,
    ) -> Result<Vec<TimedEvent<TransactionRecord>>, SimulationError> {
        self.simulation.take_events(count)
    }

    /// Time of the most recently emitted transaction
    pub fn current_time(&self) -> Option<Timestamp> {
        self.simulation.clock()
    }

    pub fn events_emitted(&self) -> u64 {
        self.simulation.events_emitted()
    }

    pub fn num_streams(&self) -> usize {
        self.simulation.num_streams()
    }

    pub fn num_fraud_users(&self) -> usize {
        self.num_fraud_users
    }

    pub fn streams(&self) -> &[UserStream] {
        self.simulation.streams()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Whether this run can be reproduced from its configuration
    pub fn is_reproducible(&self) -> bool {
        !matches!(self.seed_provenance, SeedProvenance::TimeDerived(_))
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config_hash", &self.config_hash)
            .field("num_fraud_users", &self.num_fraud_users)
            .field("simulation", &self.simulation)
            .finish()
    }
}

impl Iterator for Orchestrator {
    type Item = Result<TimedEvent<TransactionRecord>, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.simulation.next()
    }
}
