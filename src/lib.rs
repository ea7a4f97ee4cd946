//! # bridgekeeper
//!
//! **Bridgekeeper** is a monitor-synchronized one-lane bridge and the
//! threaded crossing simulator around it.
//!
//! The bridge admits vehicles in either direction but never both at once,
//! and never more than its capacity. Coordination is classic monitor style:
//! one mutex around the shared counters, one condition variable per
//! direction, predicate re-checks after every wake-up, and counted wake-ups
//! on departure instead of broadcasts.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!     │  Vehicle 0  │   │  Vehicle 1  │   │  Vehicle N  │
//!     │ (eastbound) │   │ (westbound) │   │     ...     │
//!     └──────┬──────┘   └──────┬──────┘   └──────┬──────┘
//!            │ arrive / depart │                 │
//!            ▼                 ▼                 ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Bridge (monitor)                                        │
//! │  - Mutex<BridgeState> (flow, occupants, waiting[2])      │
//! │  - Condvar[2] (one wait queue per direction)             │
//! │  - Permit (admission guard; departing wakes waiters)     │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │ publish(Event) from each thread
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Bus (bounded channel)                   │
//! │             (capacity: SimConfig::bus_capacity)          │
//! └──────────────────────────┬───────────────────────────────┘
//!                            ▼
//!                 ┌─────────────────────┐
//!                 │   event listener    │
//!                 │   (in Simulation)   │
//!                 └──────────┬──────────┘
//!                            ▼
//!                      SubscriberSet
//!                     (per-sub queues)
//!                  ┌─────────┼─────────┐
//!                  ▼         ▼         ▼
//!               worker1   worker2   workerN
//!                  ▼         ▼         ▼
//!               console    ledger    custom
//! ```
//!
//! ### Lifecycle
//! ```text
//! Simulation::run(plan)
//!
//! per vehicle thread {
//!   ├─► pause(Approach)
//!   ├─► publish VehicleQueued{ vehicle, direction }
//!   ├─► Bridge::arrive(direction)
//!   │       │  lock state; waiting[direction] += 1
//!   │       └─ while !may_enter(direction): wait on arrivals[direction]
//!   │          (may_enter: no oncoming flow AND occupants < capacity)
//!   ├─► publish VehicleEntered - admitted, holding a Permit
//!   ├─► pause(Crossing); publish BridgeObserved{ snapshot }; pause(Crossing)
//!   ├─► Permit::depart()
//!   │       │  occupants -= 1; an emptied deck clears flow
//!   │       ├─ wake min(freed room, waiting[same]) from its own lobby
//!   │       └─ if the deck emptied: wake min(capacity, waiting[opposite])
//!   └─► publish VehicleExited
//! }
//!
//! runner: join every vehicle ─► publish SimulationFinished ─► drain listener
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                                   |
//! |-------------------|-------------------------------------------------------------------|------------------------------------------------------|
//! | **Monitor**       | Capacity-bounded, direction-exclusive admission with wake quotas. | [`Bridge`], [`Permit`], [`BridgeSnapshot`], [`Direction`] |
//! | **Simulation**    | Spawn a fleet, join it, audit the run.                            | [`Simulation`], [`SimSummary`], [`random_plan`]      |
//! | **Pacing**        | Pluggable sleep policy; randomness varies interleavings.          | [`Pacer`], [`RandomPacer`], [`NoPacer`]              |
//! | **Subscriber API**| Hook into traffic events (console output, ledgers, custom).       | [`Subscribe`], [`SubscriberSet`], [`TrafficLedger`]  |
//! | **Errors**        | Typed errors for the monitor, configuration, and runs.            | [`BridgeError`], [`ConfigError`], [`SimError`]       |
//! | **Configuration** | Centralize capacities, fleet size, and pause ranges.              | [`SimConfig`]                                        |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use bridgekeeper::{Direction, NoPacer, SimConfig, Simulation, TrafficLedger};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Arc::new(TrafficLedger::new());
//!     let sim = Simulation::new(SimConfig::default())?
//!         .with_pacer(Arc::new(NoPacer)) // full speed; drop this line for real pacing
//!         .with_subscriber(Arc::clone(&ledger) as _);
//!
//!     let plan = [
//!         Direction::Eastbound,
//!         Direction::Eastbound,
//!         Direction::Westbound,
//!         Direction::Eastbound,
//!         Direction::Westbound,
//!     ];
//!     let summary = sim.run(&plan)?;
//!
//!     assert_eq!(summary.total_crossed(), plan.len());
//!     assert!(ledger.summary().is_balanced());
//!     Ok(())
//! }
//! ```

mod bridge;
mod config;
mod error;
mod events;
mod sim;
mod subscribers;

// ---- Public re-exports ----

pub use bridge::{Bridge, BridgeSnapshot, Direction, Permit};
pub use config::{SimConfig, MAX_VEHICLES};
pub use error::{BridgeError, ConfigError, SimError};
pub use events::{Event, EventKind};
pub use sim::{random_plan, NoPacer, Pacer, PausePoint, RandomPacer, SimSummary, Simulation};
pub use subscribers::{ConsoleReporter, LedgerSummary, Subscribe, SubscriberSet, TrafficLedger};
