//! # Traffic ledger: stateful audit of the event stream.
//!
//! [`TrafficLedger`] folds vehicle lifecycle events into per-direction
//! counters so a finished run can be audited: every vehicle that entered
//! also exited, nobody is left on the deck, and the peak occupancy the
//! stream implied.
//!
//! ## Architecture
//! ```text
//! Vehicles ──► Bus ──► listener ──► TrafficLedger::on_event()
//!                                          │
//!                                          ▼
//!                                   LedgerSummary
//!                              (entered/exited per direction)
//! ```
//!
//! ## Rules
//! - Only `VehicleEntered` / `VehicleExited` / `VehicleFailed` change counters.
//! - Each subscriber queue is FIFO in publish order, so no sequence-number
//!   reordering is needed here.
//! - Events are published just outside the bridge lock, so `peak_on_deck`
//!   is the peak the *stream* implied; exact occupancy bounds are checked
//!   against [`BridgeSnapshot`](crate::BridgeSnapshot) values instead.

use std::sync::Mutex;

use crate::bridge::Direction;
use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Counters accumulated by a [`TrafficLedger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    /// Vehicles that entered, per direction, in [`Direction::index`] order.
    pub entered: [u64; 2],
    /// Vehicles that exited, per direction, in [`Direction::index`] order.
    pub exited: [u64; 2],
    /// Vehicles that reported a failed crossing.
    pub failed: u64,
    /// Vehicles currently between their enter and exit events.
    pub on_deck: u64,
    /// Highest `on_deck` value the event stream reached.
    pub peak_on_deck: u64,
}

impl LedgerSummary {
    /// Vehicles that entered headed `direction`.
    #[inline]
    pub fn entered_toward(&self, direction: Direction) -> u64 {
        self.entered[direction.index()]
    }

    /// Vehicles that exited headed `direction`.
    #[inline]
    pub fn exited_toward(&self, direction: Direction) -> u64 {
        self.exited[direction.index()]
    }

    /// Total vehicles that entered, either direction.
    pub fn total_entered(&self) -> u64 {
        self.entered.iter().sum()
    }

    /// Total vehicles that exited, either direction.
    pub fn total_exited(&self) -> u64 {
        self.exited.iter().sum()
    }

    /// `true` when every vehicle that entered also exited and the deck is
    /// clear. Failures are counted separately; a balanced ledger with a
    /// non-zero `failed` means the failures happened before entry.
    pub fn is_balanced(&self) -> bool {
        self.entered == self.exited && self.on_deck == 0
    }
}

/// Thread-safe ledger of crossings, fed by the event stream.
///
/// ### Responsibilities
/// - Counts entries and exits per direction.
/// - Tracks how many vehicles the stream says are mid-crossing.
/// - Lets tests and the CLI audit a finished run via [`TrafficLedger::summary`].
pub struct TrafficLedger {
    inner: Mutex<LedgerSummary>,
}

impl TrafficLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LedgerSummary::default()),
        }
    }

    /// Point-in-time copy of the counters.
    ///
    /// Best-effort by design: a ledger poisoned by a panicking handler keeps
    /// reporting whatever it managed to count.
    pub fn summary(&self) -> LedgerSummary {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TrafficLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscribe for TrafficLedger {
    fn on_event(&self, event: &Event) {
        let mut ledger = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match (event.kind, event.direction) {
            (EventKind::VehicleEntered, Some(direction)) => {
                ledger.entered[direction.index()] += 1;
                ledger.on_deck += 1;
                ledger.peak_on_deck = ledger.peak_on_deck.max(ledger.on_deck);
            }
            (EventKind::VehicleExited, Some(direction)) => {
                ledger.exited[direction.index()] += 1;
                ledger.on_deck = ledger.on_deck.saturating_sub(1);
            }
            (EventKind::VehicleFailed, _) => {
                ledger.failed += 1;
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "ledger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Direction::{Eastbound, Westbound};

    fn entered(id: u32, direction: Direction) -> Event {
        Event::new(EventKind::VehicleEntered)
            .with_vehicle(id)
            .with_direction(direction)
    }

    fn exited(id: u32, direction: Direction) -> Event {
        Event::new(EventKind::VehicleExited)
            .with_vehicle(id)
            .with_direction(direction)
    }

    #[test]
    fn test_counts_crossings_per_direction() {
        let ledger = TrafficLedger::new();
        ledger.on_event(&entered(0, Eastbound));
        ledger.on_event(&entered(1, Eastbound));
        ledger.on_event(&exited(0, Eastbound));
        ledger.on_event(&entered(2, Westbound));

        let summary = ledger.summary();
        assert_eq!(summary.entered_toward(Eastbound), 2);
        assert_eq!(summary.entered_toward(Westbound), 1);
        assert_eq!(summary.exited_toward(Eastbound), 1);
        assert_eq!(summary.on_deck, 2);
        assert!(!summary.is_balanced());
    }

    #[test]
    fn test_balanced_after_symmetric_stream() {
        let ledger = TrafficLedger::new();
        for id in 0..4 {
            let direction = if id % 2 == 0 { Eastbound } else { Westbound };
            ledger.on_event(&entered(id, direction));
            ledger.on_event(&exited(id, direction));
        }

        let summary = ledger.summary();
        assert!(summary.is_balanced());
        assert_eq!(summary.total_entered(), 4);
        assert_eq!(summary.total_exited(), 4);
        assert_eq!(summary.peak_on_deck, 1, "crossings never overlapped");
    }

    #[test]
    fn test_peak_tracks_overlapping_crossings() {
        let ledger = TrafficLedger::new();
        ledger.on_event(&entered(0, Westbound));
        ledger.on_event(&entered(1, Westbound));
        ledger.on_event(&entered(2, Westbound));
        ledger.on_event(&exited(1, Westbound));
        ledger.on_event(&entered(3, Westbound));

        assert_eq!(ledger.summary().peak_on_deck, 3);
        assert_eq!(ledger.summary().on_deck, 3);
    }

    #[test]
    fn test_failures_count_separately_from_crossings() {
        let ledger = TrafficLedger::new();
        ledger.on_event(
            &Event::new(EventKind::VehicleFailed)
                .with_vehicle(9)
                .with_direction(Eastbound)
                .with_reason("poisoned"),
        );

        let summary = ledger.summary();
        assert_eq!(summary.failed, 1);
        assert!(summary.is_balanced(), "no entry means nothing to balance");
    }

    #[test]
    fn test_lifecycle_events_without_direction_are_ignored() {
        let ledger = TrafficLedger::new();
        ledger.on_event(&Event::new(EventKind::SimulationStarted).with_total(5));
        ledger.on_event(&Event::new(EventKind::VehicleQueued).with_vehicle(0));
        assert_eq!(ledger.summary(), LedgerSummary::default());
    }
}
