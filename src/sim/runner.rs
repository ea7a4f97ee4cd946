//! # Simulation runner: spawn, cross, join, audit.
//!
//! [`Simulation`] owns a run end to end: it validates input, builds the
//! bridge and the event plumbing, launches one thread per vehicle, joins
//! them all, and only then reports. There is no early exit; a failed
//! vehicle is recorded and the remaining vehicles still finish their
//! crossings.
//!
//! ## Lifecycle
//! ```text
//! run(plan)
//!   │ validate plan
//!   │ build Bridge + Bus + SubscriberSet + listener thread
//!   │ publish SimulationStarted
//!   ├─ spawn vehicle 0 ─ pause ─ spawn vehicle 1 ─ pause ─ ...
//!   │      (each: approach → arrive → cross → observe → depart)
//!   ├─ join every vehicle, tally crossings, keep the first failure
//!   │ publish SimulationFinished
//!   │ close the bus, drain the listener, join subscriber workers
//!   └─ Ok(SimSummary) or Err(SimError)
//! ```
//!
//! By the time [`Simulation::run`] returns, every event has been delivered
//! to every subscriber, so a [`TrafficLedger`](crate::TrafficLedger)
//! registered on the run can be audited immediately.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::bridge::{Bridge, Direction};
use crate::config::{SimConfig, MAX_VEHICLES};
use crate::error::{ConfigError, SimError};
use crate::events::{channel, Event, EventKind};
use crate::sim::pacing::{Pacer, PausePoint, RandomPacer};
use crate::sim::vehicle::Vehicle;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Outcome of a clean simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSummary {
    /// Vehicles in the travel plan.
    pub vehicles: usize,
    /// Completed crossings per direction, in [`Direction::index`] order.
    pub crossed: [usize; 2],
    /// Wall-clock duration from first spawn to last join.
    pub elapsed: Duration,
}

impl SimSummary {
    /// Completed crossings headed `direction`.
    #[inline]
    pub fn crossed_toward(&self, direction: Direction) -> usize {
        self.crossed[direction.index()]
    }

    /// Completed crossings, either direction.
    pub fn total_crossed(&self) -> usize {
        self.crossed.iter().sum()
    }
}

/// Drives a fleet of vehicle threads over one shared bridge.
///
/// Build one with [`Simulation::new`], attach subscribers and optionally a
/// custom pacer, then call [`Simulation::run`] with a travel plan. The same
/// `Simulation` can run several plans in sequence; each run gets a fresh
/// bridge and fresh subscriber workers.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use bridgekeeper::{Direction, NoPacer, SimConfig, Simulation, TrafficLedger};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = Arc::new(TrafficLedger::new());
/// let sim = Simulation::new(SimConfig::default())?
///     .with_pacer(Arc::new(NoPacer))
///     .with_subscriber(Arc::clone(&ledger) as _);
///
/// let plan = [Direction::Eastbound, Direction::Westbound, Direction::Eastbound];
/// let summary = sim.run(&plan)?;
///
/// assert_eq!(summary.total_crossed(), 3);
/// assert!(ledger.summary().is_balanced());
/// # Ok(())
/// # }
/// ```
pub struct Simulation {
    cfg: SimConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    pacer: Arc<dyn Pacer>,
}

impl Simulation {
    /// Creates a runner for the given configuration, with random pacing and
    /// no subscribers.
    ///
    /// ## Errors
    /// Whatever [`SimConfig::validate`] rejects.
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let pacer = Arc::new(RandomPacer::new(&cfg));
        Ok(Self {
            cfg,
            subscribers: Vec::new(),
            pacer,
        })
    }

    /// Registers a subscriber; every run fans events out to all of them.
    #[must_use]
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Replaces the pacing policy for vehicles and launches.
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Runs one travel plan to completion.
    ///
    /// Spawns one thread per plan entry (vehicle ids follow plan order),
    /// pauses between launches, joins everything, and returns after every
    /// event has been delivered to every subscriber.
    ///
    /// ## Errors
    /// - [`SimError::Config`] for an empty or oversized plan.
    /// - [`SimError::Vehicle`] / [`SimError::VehiclePanicked`] if any
    ///   vehicle did not finish; the first in plan order is reported,
    ///   after all threads were joined.
    pub fn run(&self, plan: &[Direction]) -> Result<SimSummary, SimError> {
        if plan.is_empty() {
            return Err(ConfigError::EmptyPlan.into());
        }
        if plan.len() > MAX_VEHICLES {
            return Err(ConfigError::VehicleCount {
                got: plan.len(),
                max: MAX_VEHICLES,
            }
            .into());
        }

        let bridge = Arc::new(Bridge::new(self.cfg.capacity).map_err(SimError::Config)?);
        let (bus, events) = channel(self.cfg.bus_capacity);
        let set = SubscriberSet::new(self.subscribers.clone());
        let listener = thread::spawn(move || {
            while let Ok(ev) = events.recv() {
                set.emit(&ev);
            }
            set
        });

        bus.publish(Event::new(EventKind::SimulationStarted).with_total(plan.len()));
        let started = Instant::now();

        let mut fleet = Vec::with_capacity(plan.len());
        for (id, &direction) in plan.iter().enumerate() {
            let vehicle = Vehicle {
                id: id as u32,
                direction,
            };
            let bridge = Arc::clone(&bridge);
            let bus = bus.clone();
            let pacer = Arc::clone(&self.pacer);
            fleet.push(thread::spawn(move || {
                vehicle.drive(&bridge, &bus, pacer.as_ref())
            }));
            self.pacer.pause(PausePoint::Launch);
        }

        let mut crossed = [0usize; 2];
        let mut failure: Option<SimError> = None;
        for (id, handle) in fleet.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(())) => crossed[plan[id].index()] += 1,
                Ok(Err(source)) => {
                    if failure.is_none() {
                        failure = Some(SimError::Vehicle {
                            id: id as u32,
                            source,
                        });
                    }
                }
                Err(_) => {
                    if failure.is_none() {
                        failure = Some(SimError::VehiclePanicked { id: id as u32 });
                    }
                }
            }
        }
        let elapsed = started.elapsed();

        bus.publish(Event::new(EventKind::SimulationFinished).with_total(plan.len()));
        drop(bus);
        match listener.join() {
            Ok(set) => set.shutdown(),
            Err(_) => eprintln!("[bridgekeeper] event listener panicked"),
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(SimSummary {
                vehicles: plan.len(),
                crossed,
                elapsed,
            }),
        }
    }
}

/// Draws a travel plan of `vehicles` coin-flipped directions.
pub fn random_plan(vehicles: usize) -> Vec<Direction> {
    let mut rng = rand::rng();
    (0..vehicles)
        .map(|_| {
            if rng.random_bool(0.5) {
                Direction::Eastbound
            } else {
                Direction::Westbound
            }
        })
        .collect()
}
