//! End-to-end simulation runs over the public API, audited through the
//! event stream and the traffic ledger.
//!
//! `Simulation::run` returns only after every event reached every
//! subscriber, so the audits below read their subscribers without any
//! settling sleeps.

use std::sync::{Arc, Mutex};

use bridgekeeper::{
    Direction, Event, EventKind, NoPacer, SimConfig, Simulation, Subscribe, TrafficLedger,
};

use Direction::{Eastbound, Westbound};

/// Collects every delivered event, in delivery order.
struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<Event> {
        self.events.lock().expect("recorder lock").clone()
    }
}

impl Subscribe for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.lock().expect("recorder lock").push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

#[test]
fn test_unpaced_run_crosses_everyone_within_limits() {
    let cfg = SimConfig {
        capacity: 3,
        ..SimConfig::default()
    };
    let ledger = Arc::new(TrafficLedger::new());
    let recorder = Arc::new(Recorder::new());
    let sim = Simulation::new(cfg)
        .expect("valid config")
        .with_pacer(Arc::new(NoPacer))
        .with_subscriber(Arc::clone(&ledger) as Arc<dyn Subscribe>)
        .with_subscriber(Arc::clone(&recorder) as Arc<dyn Subscribe>);

    let plan: Vec<Direction> = (0..24)
        .map(|i| if i % 3 == 0 { Westbound } else { Eastbound })
        .collect();
    let summary = sim.run(&plan).expect("clean run");

    assert_eq!(summary.vehicles, 24);
    assert_eq!(summary.total_crossed(), 24);
    assert_eq!(summary.crossed_toward(Westbound), 8);
    assert_eq!(summary.crossed_toward(Eastbound), 16);

    let audited = ledger.summary();
    assert!(audited.is_balanced(), "ledger out of balance: {audited:?}");
    assert_eq!(audited.total_entered(), 24);
    assert_eq!(audited.failed, 0);

    let events = recorder.take();
    assert_eq!(
        events.first().map(|e| e.kind),
        Some(EventKind::SimulationStarted),
    );
    assert_eq!(
        events.last().map(|e| e.kind),
        Some(EventKind::SimulationFinished),
    );
    assert_eq!(events.last().and_then(|e| e.total), Some(24));

    // Sequence numbers come from one global counter.
    let mut seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
    seqs.sort_unstable();
    seqs.dedup();
    assert_eq!(seqs.len(), events.len(), "duplicate sequence numbers");

    // Mid-crossing observations are taken under the bridge lock, so every
    // one of them must be coherent and within the rated capacity.
    let mut observed = 0;
    for event in &events {
        if event.kind == EventKind::BridgeObserved {
            let snap = event.snapshot.expect("observation carries a snapshot");
            observed += 1;
            assert!(snap.is_coherent(), "{snap:?}");
            assert!(snap.occupants <= 3, "over capacity: {snap:?}");
            assert_eq!(snap.flow, event.direction, "observer rides the flow");
        }
    }
    assert_eq!(observed, 24, "one observation per vehicle");

    // Every vehicle queued, entered, and exited exactly once.
    for id in 0..24u32 {
        for kind in [
            EventKind::VehicleQueued,
            EventKind::VehicleEntered,
            EventKind::VehicleExited,
        ] {
            let n = events
                .iter()
                .filter(|e| e.kind == kind && e.vehicle == Some(id))
                .count();
            assert_eq!(n, 1, "vehicle {id} published {kind:?} {n} times");
        }
    }
    assert!(events.iter().all(|e| e.kind != EventKind::VehicleFailed));
}

#[test]
fn test_single_lane_bridge_serializes_crossings() {
    let cfg = SimConfig {
        capacity: 1,
        ..SimConfig::default()
    };
    let recorder = Arc::new(Recorder::new());
    let sim = Simulation::new(cfg)
        .expect("valid config")
        .with_pacer(Arc::new(NoPacer))
        .with_subscriber(Arc::clone(&recorder) as Arc<dyn Subscribe>);

    let plan = [Eastbound, Westbound, Eastbound, Westbound, Eastbound];
    let summary = sim.run(&plan).expect("clean run");
    assert_eq!(summary.total_crossed(), 5);

    for event in recorder.take() {
        if event.kind == EventKind::BridgeObserved {
            let snap = event.snapshot.expect("observation carries a snapshot");
            assert_eq!(snap.occupants, 1, "never more than one on deck: {snap:?}");
            assert!(snap.is_coherent(), "{snap:?}");
        }
    }
}

#[test]
fn test_lone_vehicle_run() {
    let sim = Simulation::new(SimConfig::default())
        .expect("valid config")
        .with_pacer(Arc::new(NoPacer));
    assert_eq!(sim.config().capacity, 3);

    let summary = sim.run(&[Eastbound]).expect("clean run");
    assert_eq!(summary.total_crossed(), 1);
    assert_eq!(summary.crossed_toward(Eastbound), 1);
    assert_eq!(summary.crossed_toward(Westbound), 0);
}

#[test]
fn test_fast_random_pacing_still_balances() {
    let cfg = SimConfig {
        capacity: 2,
        ..SimConfig::default()
    }
    .with_fast_pacing();
    let ledger = Arc::new(TrafficLedger::new());
    let sim = Simulation::new(cfg)
        .expect("valid config")
        .with_subscriber(Arc::clone(&ledger) as Arc<dyn Subscribe>);

    let plan: Vec<Direction> = (0..10)
        .map(|i| if i % 2 == 0 { Eastbound } else { Westbound })
        .collect();
    let summary = sim.run(&plan).expect("clean run");

    assert_eq!(summary.total_crossed(), 10);
    let audited = ledger.summary();
    assert!(audited.is_balanced(), "ledger out of balance: {audited:?}");
    assert_eq!(audited.entered_toward(Eastbound), 5);
    assert_eq!(audited.entered_toward(Westbound), 5);
}
