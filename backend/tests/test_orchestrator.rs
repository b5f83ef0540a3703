//! Integration tests for the orchestrator
//!
//! End-to-end runs over a small population: determinism, time ordering,
//! and the make-up of the generated transactions.

use std::collections::HashSet;

use fraud_sim_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
use fraud_sim_core_rs::streams::UserStream;
use fraud_sim_core_rs::{Label, SimulationError};

fn config_with_seed(seed: u64) -> OrchestratorConfig {
    OrchestratorConfig {
        rng_seed: Some(seed),
        num_users: 100,
        num_merchants: 2_000,
        num_common_merchants: 200,
        fraud_user_rate: 0.2,
        ..OrchestratorConfig::default()
    }
}

#[test]
fn test_same_seed_produces_identical_events() {
    let mut orch1 = Orchestrator::new(config_with_seed(12345)).unwrap();
    let mut orch2 = Orchestrator::new(config_with_seed(12345)).unwrap();

    let events1 = Orchestrator::take(&mut orch1, 5_000).unwrap();
    let events2 = Orchestrator::take(&mut orch2, 5_000).unwrap();
    assert_eq!(events1, events2);
    assert_eq!(orch1.config_hash(), orch2.config_hash());
}

#[test]
fn test_different_seeds_diverge() {
    let mut orch1 = Orchestrator::new(config_with_seed(1)).unwrap();
    let mut orch2 = Orchestrator::new(config_with_seed(2)).unwrap();
    assert_ne!(Orchestrator::take(&mut orch1, 100).unwrap(), Orchestrator::take(&mut orch2, 100).unwrap());
}

#[test]
fn test_timestamps_never_decrease() {
    let mut orchestrator = Orchestrator::new(config_with_seed(77)).unwrap();
    let events = Orchestrator::take(&mut orchestrator, 20_000).unwrap();
    for pair in events.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
    assert_eq!(orchestrator.current_time(), events.last().map(|e| e.time));
    assert_eq!(orchestrator.events_emitted(), 20_000);
}

#[test]
fn test_initial_time_is_a_lower_bound() {
    let config = OrchestratorConfig {
        initial_time: 1_700_000_000,
        ..config_with_seed(5)
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    for event in Orchestrator::take(&mut orchestrator, 1_000).unwrap() {
        assert!(event.time >= 1_700_000_000);
    }
}

#[test]
fn test_labels_match_stream_kind() {
    let mut orchestrator = Orchestrator::new(config_with_seed(9)).unwrap();
    let kinds: Vec<Label> = orchestrator.streams().iter().map(UserStream::label).collect();
    let users: Vec<u32> = orchestrator.streams().iter().map(UserStream::user_id).collect();

    for event in Orchestrator::take(&mut orchestrator, 10_000).unwrap() {
        assert_eq!(event.payload.label(), kinds[event.source]);
        assert_eq!(event.payload.user_id(), users[event.source]);
        assert!(event.payload.merchant_id() < 2_000);
        assert!(event.payload.amount().get() >= 100);
    }
}

#[test]
fn test_fraud_streams_belong_to_existing_users() {
    let orchestrator = Orchestrator::new(config_with_seed(31)).unwrap();
    let legitimate: HashSet<u32> = orchestrator
        .streams()
        .iter()
        .filter(|s| s.label() == Label::Legitimate)
        .map(UserStream::user_id)
        .collect();
    assert_eq!(legitimate.len(), 100);
    for stream in orchestrator.streams() {
        if stream.label() == Label::Fraud {
            assert!(legitimate.contains(&stream.user_id()));
        }
    }
}

#[test]
fn test_no_fraud_when_rate_is_zero() {
    let config = OrchestratorConfig {
        fraud_user_rate: 0.0,
        ..config_with_seed(4)
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    assert_eq!(orchestrator.num_fraud_users(), 0);
    assert!(Orchestrator::take(&mut orchestrator, 2_000)
        .unwrap()
        .iter()
        .all(|e| !e.payload.is_fraud()));
}

#[test]
fn test_every_user_fraudulent_when_rate_is_one() {
    let config = OrchestratorConfig {
        fraud_user_rate: 1.0,
        ..config_with_seed(4)
    };
    let orchestrator = Orchestrator::new(config).unwrap();
    assert_eq!(orchestrator.num_fraud_users(), 100);
    assert_eq!(orchestrator.num_streams(), 200);
}

#[test]
fn test_iterator_matches_take() {
    let mut by_take = Orchestrator::new(config_with_seed(15)).unwrap();
    let by_iter = Orchestrator::new(config_with_seed(15)).unwrap();

    let expected = Orchestrator::take(&mut by_take, 500).unwrap();
    let collected: Vec<_> = Iterator::take(by_iter, 500).map(|r| r.unwrap()).collect();
    assert_eq!(expected, collected);
}

#[test]
fn test_invalid_config_is_rejected_up_front() {
    let config = OrchestratorConfig {
        num_common_merchants: 5_000,
        ..config_with_seed(1)
    };
    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_unseeded_run_is_flagged() {
    let config = OrchestratorConfig {
        rng_seed: None,
        ..config_with_seed(0)
    };
    let orchestrator = Orchestrator::new(config).unwrap();
    assert!(!orchestrator.is_reproducible());
}
