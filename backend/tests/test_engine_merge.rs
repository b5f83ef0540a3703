//! Tests for merging event streams into global time order

use fraud_sim_core_rs::des::{from_fn, EventStream, Simulation, SimulationError, StreamError};

type BoxedStream = Box<dyn EventStream<Payload = char>>;

fn constant(offset: u64, tag: char) -> BoxedStream {
    Box::new(from_fn(move |_now| Ok((offset, tag))))
}

#[test]
fn test_two_constant_streams_interleave() {
    let mut sim = Simulation::new(vec![constant(10, 'A'), constant(15, 'B')]).unwrap();

    let events: Vec<(u64, usize, char)> = sim
        .take_events(7)
        .unwrap()
        .into_iter()
        .map(|e| (e.time, e.source, e.payload))
        .collect();

    assert_eq!(
        events,
        vec![
            (10, 0, 'A'),
            (15, 1, 'B'),
            (20, 0, 'A'),
            (30, 0, 'A'),
            (30, 1, 'B'),
            (40, 0, 'A'),
            (45, 1, 'B'),
        ]
    );
}

#[test]
fn test_single_stream_is_cumulative_offsets() {
    let offsets = [4u64, 0, 9, 1, 1, 30];
    let mut idx = 0;
    let stream = from_fn(move |_now| {
        let offset = offsets[idx % offsets.len()];
        idx += 1;
        Ok((offset, idx))
    });
    let mut sim = Simulation::with_initial_time(vec![stream], 100).unwrap();

    let times: Vec<u64> = sim.take_events(6).unwrap().iter().map(|e| e.time).collect();
    assert_eq!(times, vec![104, 104, 113, 114, 115, 145]);
}

#[test]
fn test_payloads_come_from_the_pull_that_scheduled_them() {
    let mut n = 0u32;
    let stream = from_fn(move |_now| {
        n += 1;
        Ok((5, n))
    });
    let mut sim = Simulation::new(vec![stream]).unwrap();

    let events = sim.take_events(3).unwrap();
    let payloads: Vec<u32> = events.iter().map(|e| e.payload).collect();
    assert_eq!(payloads, vec![1, 2, 3]);
}

#[test]
fn test_zero_offset_ties_go_to_lowest_index() {
    let mut sim = Simulation::new(vec![constant(0, 'x'), constant(0, 'y'), constant(0, 'z')]).unwrap();
    let sources: Vec<usize> = sim.take_events(6).unwrap().iter().map(|e| e.source).collect();
    // Stream 0 re-enters at the same time and keeps winning the tie
    assert_eq!(sources, vec![0, 0, 0, 0, 0, 0]);
    assert_eq!(sim.clock(), Some(0));
}

#[test]
fn test_feedback_time_drives_stream_state() {
    // Fails on the pull made at t=75
    let stream = from_fn(|now: u64| {
        if now >= 75 {
            Err(StreamError::Exhausted)
        } else {
            Ok((25, now))
        }
    });
    let mut sim = Simulation::new(vec![stream]).unwrap();

    let first = sim.next_event().unwrap();
    assert_eq!((first.time, first.payload), (25, 0));
    let second = sim.next_event().unwrap();
    assert_eq!((second.time, second.payload), (50, 25));
    assert!(matches!(
        sim.next_event(),
        Err(SimulationError::StreamFailed { time: 75, .. })
    ));
}

#[test]
fn test_iterator_stops_after_error() {
    let mut calls = 0;
    let stream = from_fn(move |_now| {
        calls += 1;
        if calls == 4 {
            Err(StreamError::Failed {
                reason: "boom".to_string(),
            })
        } else {
            Ok((1, ()))
        }
    });
    let sim = Simulation::new(vec![stream]).unwrap();

    let results: Vec<_> = sim.collect();
    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(|r| r.is_ok()));
    assert!(results[2].is_err());
}

#[test]
fn test_events_emitted_and_peek() {
    let mut sim = Simulation::new(vec![constant(10, 'A'), constant(15, 'B')]).unwrap();
    assert_eq!(sim.peek_time(), Some(10));
    assert_eq!(sim.clock(), None);

    sim.take_events(3).unwrap();
    assert_eq!(sim.events_emitted(), 3);
    assert_eq!(sim.clock(), Some(20));
    assert_eq!(sim.peek_time(), Some(30));
    assert_eq!(sim.num_streams(), 2);
}
