//! # Traffic events emitted by the bridge simulation.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Run lifecycle**: a simulation starting and finishing.
//! - **Vehicle lifecycle**: one vehicle queueing, entering, observing the
//!   bridge mid-crossing, exiting, or failing.
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! vehicle identifiers, travel directions, and bridge snapshots.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Events are published outside the bridge lock, so two
//! events close together may be observed slightly out of wall-clock order;
//! use `seq` to restore publish order. Snapshots embedded in events were
//! taken under the lock and are internally consistent regardless.
//!
//! ## Example
//! ```rust
//! use bridgekeeper::{Direction, Event, EventKind};
//!
//! let ev = Event::new(EventKind::VehicleFailed)
//!     .with_vehicle(7)
//!     .with_direction(Direction::Westbound)
//!     .with_reason("bridge state lock poisoned by a panicked crossing thread");
//!
//! assert_eq!(ev.kind, EventKind::VehicleFailed);
//! assert_eq!(ev.vehicle, Some(7));
//! assert_eq!(ev.direction, Some(Direction::Westbound));
//! assert!(ev.reason.as_deref().is_some());
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::bridge::{BridgeSnapshot, Direction};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of traffic events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Run lifecycle ===
    /// Simulation run is starting; vehicle threads are about to spawn.
    ///
    /// Sets:
    /// - `total`: vehicles in the travel plan
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SimulationStarted,

    /// Simulation run finished; every vehicle thread was joined.
    ///
    /// Published for failed runs too, after the failure is recorded.
    ///
    /// Sets:
    /// - `total`: vehicles in the travel plan
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SimulationFinished,

    // === Vehicle lifecycle ===
    /// Vehicle reached the bridge and joined its direction's lobby.
    ///
    /// Sets:
    /// - `vehicle`: vehicle identifier
    /// - `direction`: travel direction
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VehicleQueued,

    /// Vehicle was admitted and is on the deck.
    ///
    /// Sets:
    /// - `vehicle`: vehicle identifier
    /// - `direction`: travel direction
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VehicleEntered,

    /// Vehicle looked at the whole bridge from mid-deck.
    ///
    /// Sets:
    /// - `vehicle`: vehicle identifier
    /// - `direction`: travel direction
    /// - `snapshot`: consistent counters taken under the bridge lock
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    BridgeObserved,

    /// Vehicle departed and freed its seat.
    ///
    /// Sets:
    /// - `vehicle`: vehicle identifier
    /// - `direction`: travel direction
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VehicleExited,

    /// Vehicle aborted its crossing with a bridge failure.
    ///
    /// Sets:
    /// - `vehicle`: vehicle identifier
    /// - `direction`: travel direction
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    VehicleFailed,
}

/// Traffic event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Event classification.
    pub kind: EventKind,
    /// Identifier of the vehicle, if applicable.
    pub vehicle: Option<u32>,
    /// Travel direction of the vehicle, if applicable.
    pub direction: Option<Direction>,
    /// Bridge counters captured under the lock, for [`EventKind::BridgeObserved`].
    pub snapshot: Option<BridgeSnapshot>,
    /// Human-readable reason (failure messages).
    pub reason: Option<Arc<str>>,
    /// Total vehicles in the simulation run.
    pub total: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            vehicle: None,
            direction: None,
            snapshot: None,
            reason: None,
            total: None,
        }
    }

    /// Attaches a vehicle identifier.
    #[inline]
    pub fn with_vehicle(mut self, id: u32) -> Self {
        self.vehicle = Some(id);
        self
    }

    /// Attaches a travel direction.
    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Attaches a bridge snapshot.
    #[inline]
    pub fn with_snapshot(mut self, snapshot: BridgeSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the total vehicle count of the run.
    #[inline]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// `true` for the per-vehicle lifecycle kinds.
    #[inline]
    pub fn is_vehicle_event(&self) -> bool {
        !matches!(
            self.kind,
            EventKind::SimulationStarted | EventKind::SimulationFinished
        )
    }
}
