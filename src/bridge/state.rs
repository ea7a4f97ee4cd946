//! # Bridge state and transitions
//!
//! The counters every crossing decision reads and writes, plus the pure
//! transition functions over them. Nothing in this module locks or blocks:
//! [`super::monitor::Bridge`] owns a `BridgeState` behind its mutex and calls
//! these transitions with the lock held, which keeps the decision logic
//! testable single-threaded.
//!
//! ## Rules
//!
//! - `occupants` never exceeds `capacity`.
//! - `flow` is `None` exactly while `occupants` is zero.
//! - A vehicle may enter only while traffic is not flowing against it and
//!   the deck has room. Same-direction arrivals at capacity wait too.
//! - Departures never block. Each departure computes how many waiters are
//!   now admissible and reports that as a [`SignalPlan`]; the monitor turns
//!   the plan into exactly that many wake-ups.

use crate::bridge::Direction;
use crate::error::BridgeError;

/// Counters shared by every crossing, guarded by the monitor mutex.
#[derive(Debug)]
pub(crate) struct BridgeState {
    /// Direction of current traffic, `None` while the deck is empty.
    flow: Option<Direction>,
    /// Vehicles on the deck right now.
    occupants: u32,
    /// Vehicles waiting to enter, per direction, in [`Direction::index`] order.
    waiting: [u32; 2],
    /// Most vehicles the deck holds at once.
    capacity: u32,
}

/// How many waiters a departure makes admissible, per lobby.
///
/// `same` is bounded by the room the departure opened up; `opposite` is
/// non-zero only when the departure emptied the deck and is bounded by the
/// whole capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SignalPlan {
    /// Wake-ups owed to the departing vehicle's own lobby.
    pub(crate) same: u32,
    /// Wake-ups owed to the oncoming lobby.
    pub(crate) opposite: u32,
}

impl SignalPlan {
    /// Total wake-ups the plan asks for.
    #[cfg(test)]
    pub(crate) fn total(self) -> u32 {
        self.same + self.opposite
    }
}

impl BridgeState {
    /// Fresh state for an empty bridge. Capacity is validated by the caller.
    pub(crate) fn new(capacity: u32) -> Self {
        Self {
            flow: None,
            occupants: 0,
            waiting: [0, 0],
            capacity,
        }
    }

    /// Admission predicate: `true` when a `direction` vehicle may enter now.
    ///
    /// Blocks (returns `false`) while traffic flows the opposite way or the
    /// deck is full. A full deck turns away same-direction vehicles as well;
    /// they queue like everyone else and are counted toward the next
    /// departure's wake quota.
    pub(crate) fn may_enter(&self, direction: Direction) -> bool {
        self.flow != Some(direction.opposite()) && self.occupants < self.capacity
    }

    /// Records a vehicle joining its lobby. Paired with the decrement inside
    /// [`BridgeState::admit`]; every arrival calls this exactly once before
    /// its first predicate check.
    pub(crate) fn note_queued(&mut self, direction: Direction) {
        self.waiting[direction.index()] += 1;
    }

    /// Vehicles currently waiting to travel `direction`.
    pub(crate) fn queued(&self, direction: Direction) -> u32 {
        self.waiting[direction.index()]
    }

    /// Moves one queued `direction` vehicle onto the deck.
    ///
    /// Audits the state it is about to commit to and refuses with the
    /// matching [`BridgeError`] if an invariant would break. The audits are
    /// unreachable through [`BridgeState::may_enter`] gating; they exist to
    /// turn a logic bug into a loud failure instead of a silent collision.
    pub(crate) fn admit(&mut self, direction: Direction) -> Result<(), BridgeError> {
        if self.flow == Some(direction.opposite()) {
            return Err(BridgeError::Collision {
                flow: direction.opposite(),
                entering: direction,
            });
        }
        if self.occupants >= self.capacity {
            return Err(BridgeError::Overload {
                occupants: self.occupants,
                capacity: self.capacity,
            });
        }
        if self.flow.is_none() {
            if self.occupants != 0 {
                return Err(BridgeError::PhantomOccupants {
                    occupants: self.occupants,
                });
            }
            self.flow = Some(direction);
        }
        self.waiting[direction.index()] -= 1;
        self.occupants += 1;
        Ok(())
    }

    /// Takes one `direction` vehicle off the deck and computes the wake quota
    /// its departure earned.
    ///
    /// The departing vehicle's own lobby is owed one wake-up per seat now
    /// free, capped by how many are actually waiting. The oncoming lobby is
    /// owed wake-ups only when this departure emptied the deck, and then up
    /// to a full deck's worth. Quotas are counted, never broadcast, so a
    /// departure wakes no more threads than could possibly enter.
    pub(crate) fn release(&mut self, direction: Direction) -> SignalPlan {
        debug_assert_eq!(self.flow, Some(direction), "release against the flow");
        debug_assert!(self.occupants > 0, "release of an empty deck");

        self.occupants -= 1;
        if self.occupants == 0 {
            self.flow = None;
        }

        let room = self.capacity - self.occupants;
        let same = room.min(self.queued(direction));
        let opposite = if self.flow.is_none() {
            self.capacity.min(self.queued(direction.opposite()))
        } else {
            0
        };
        SignalPlan { same, opposite }
    }

    /// Point-in-time copy of the counters.
    pub(crate) fn snapshot(&self) -> BridgeSnapshot {
        BridgeSnapshot {
            flow: self.flow,
            occupants: self.occupants,
            waiting: self.waiting,
            capacity: self.capacity,
        }
    }
}

/// Consistent point-in-time view of the bridge, taken under the monitor lock.
///
/// Snapshots are plain data: reading one never blocks traffic, and a snapshot
/// taken mid-crossing stays internally consistent no matter how the live
/// counters move afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSnapshot {
    /// Direction of current traffic, `None` while the deck is empty.
    pub flow: Option<Direction>,
    /// Vehicles on the deck at snapshot time.
    pub occupants: u32,
    /// Waiting vehicles per direction, in [`Direction::index`] order
    /// (eastbound first).
    pub waiting: [u32; 2],
    /// Rated capacity of the bridge.
    pub capacity: u32,
}

impl BridgeSnapshot {
    /// Waiting vehicles headed `direction`.
    #[inline]
    pub fn waiting_toward(&self, direction: Direction) -> u32 {
        self.waiting[direction.index()]
    }

    /// `true` while no vehicle is on the deck.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.occupants == 0
    }

    /// Checks the safety invariants this snapshot must satisfy: occupancy
    /// within capacity, and a traffic flow recorded exactly while the deck
    /// is non-empty.
    pub fn is_coherent(&self) -> bool {
        self.occupants <= self.capacity && (self.occupants == 0) == self.flow.is_none()
    }
}
