//! # Bridge monitor
//!
//! The blocking shell around [`BridgeState`]: one mutex guarding the
//! counters and one condition variable per direction of travel. Arrivals
//! wait on their own direction's condvar; departures wake exactly the
//! number of threads their [`SignalPlan`] says could now enter, own lobby
//! first, oncoming lobby second.
//!
//! ## Rules
//!
//! - Wake-ups are hints, not handoffs: a woken arrival re-checks the
//!   admission predicate under the lock and goes back to waiting if another
//!   thread claimed the seat first. Spurious wake-ups are harmless for the
//!   same reason.
//! - Wake-ups are counted per departure, never broadcast; threads that
//!   could not possibly enter stay asleep.
//! - Departures signal while still holding the lock; woken threads block
//!   briefly on reacquisition and proceed once the departure releases it.
//! - A poisoned lock means a thread panicked mid-update. The monitor
//!   reports it as [`BridgeError::Poisoned`] and never touches the
//!   counters again.

use std::sync::{Condvar, Mutex};

use crate::bridge::state::BridgeState;
use crate::bridge::{BridgeSnapshot, Direction};
use crate::error::{BridgeError, ConfigError};

/// A one-lane bridge shared by every vehicle thread.
///
/// Vehicles cross in either direction but never both at once, and never
/// more than `capacity` at a time. All coordination happens inside
/// [`Bridge::arrive`] and [`Permit::depart`]; callers hold no locks.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use bridgekeeper::{Bridge, Direction};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bridge = Arc::new(Bridge::new(3)?);
/// let mut convoy = Vec::new();
/// for _ in 0..5 {
///     let bridge = Arc::clone(&bridge);
///     convoy.push(thread::spawn(move || {
///         let permit = bridge.arrive(Direction::Westbound)?;
///         permit.depart()
///     }));
/// }
/// for vehicle in convoy {
///     vehicle.join().expect("vehicle thread")?;
/// }
/// assert!(bridge.snapshot()?.is_idle());
/// # Ok(())
/// # }
/// ```
pub struct Bridge {
    capacity: u32,
    state: Mutex<BridgeState>,
    /// One wait queue per direction, in [`Direction::index`] order, so a
    /// departure can wake one lobby without disturbing the other.
    arrivals: [Condvar; 2],
}

impl Bridge {
    /// Creates an idle bridge holding at most `capacity` vehicles.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::ZeroCapacity`] if `capacity` is zero; such a bridge
    /// would block every arrival forever.
    pub fn new(capacity: u32) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            state: Mutex::new(BridgeState::new(capacity)),
            arrivals: [Condvar::new(), Condvar::new()],
        })
    }

    /// Most vehicles the bridge holds at once.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Waits for admission in `direction` and enters the bridge.
    ///
    /// Joins the direction's lobby, blocks while traffic flows the other
    /// way or the deck is full, and returns a [`Permit`] once on the deck.
    /// Arrivals behind oncoming traffic are not admitted until the last
    /// opposing vehicle departs; same-direction arrivals at capacity wait
    /// for a seat.
    ///
    /// ## Errors
    ///
    /// - [`BridgeError::Poisoned`] if the state lock is, or becomes,
    ///   poisoned while waiting.
    /// - An audit variant ([`BridgeError::Collision`] and friends) if
    ///   admission would break a safety invariant. Unreachable unless the
    ///   monitor itself is buggy.
    pub fn arrive(&self, direction: Direction) -> Result<Permit<'_>, BridgeError> {
        let mut state = self.state.lock().map_err(|_| BridgeError::Poisoned)?;
        state.note_queued(direction);
        while !state.may_enter(direction) {
            state = self.arrivals[direction.index()]
                .wait(state)
                .map_err(|_| BridgeError::Poisoned)?;
        }
        state.admit(direction)?;
        debug_assert!(state.snapshot().is_coherent());
        drop(state);
        Ok(Permit {
            bridge: self,
            direction,
            departed: false,
        })
    }

    /// Point-in-time copy of the counters, taken under the lock.
    ///
    /// For reporting and audits only. Admission decisions happen inside
    /// [`Bridge::arrive`], where the lock stays held across the check.
    ///
    /// ## Errors
    ///
    /// [`BridgeError::Poisoned`] if the state lock is poisoned.
    pub fn snapshot(&self) -> Result<BridgeSnapshot, BridgeError> {
        let state = self.state.lock().map_err(|_| BridgeError::Poisoned)?;
        Ok(state.snapshot())
    }

    /// Removes one `direction` vehicle from the deck and delivers the
    /// wake-ups its departure earned.
    fn release(&self, direction: Direction) -> Result<(), BridgeError> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                // Nobody asleep in arrive() can be admitted anymore. Wake
                // them all so they observe the poisoning instead of waiting
                // for a departure that cannot signal.
                for lobby in &self.arrivals {
                    lobby.notify_all();
                }
                return Err(BridgeError::Poisoned);
            }
        };
        let plan = state.release(direction);
        debug_assert!(state.snapshot().is_coherent());
        for _ in 0..plan.same {
            self.arrivals[direction.index()].notify_one();
        }
        for _ in 0..plan.opposite {
            self.arrivals[direction.opposite().index()].notify_one();
        }
        Ok(())
    }
}

/// Proof of admission: the holder is on the bridge until it departs.
///
/// Obtained from [`Bridge::arrive`]. Call [`Permit::depart`] to leave; the
/// consuming receiver makes a second departure of the same vehicle a compile
/// error. A permit dropped without departing (a panicking holder) frees its
/// seat from `drop`, so waiters are not stranded behind a ghost vehicle.
#[must_use = "dropping a permit departs immediately; hold it for the crossing and call depart()"]
#[derive(Debug)]
pub struct Permit<'a> {
    bridge: &'a Bridge,
    direction: Direction,
    departed: bool,
}

impl Permit<'_> {
    /// Direction this permit admits travel in.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Looks at the whole bridge from mid-deck.
    ///
    /// Equivalent to [`Bridge::snapshot`]; the holder is one of the
    /// occupants it counts.
    pub fn observe(&self) -> Result<BridgeSnapshot, BridgeError> {
        self.bridge.snapshot()
    }

    /// Leaves the bridge and wakes every waiter that now fits.
    ///
    /// The departing vehicle's own lobby is woken first, one wake-up per
    /// freed seat; the oncoming lobby is woken only if this departure left
    /// the deck empty.
    ///
    /// ## Errors
    ///
    /// [`BridgeError::Poisoned`] if the state lock is poisoned. The seat
    /// cannot be freed in that case; the simulation is expected to stop.
    pub fn depart(mut self) -> Result<(), BridgeError> {
        self.departed = true;
        self.bridge.release(self.direction)
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.departed {
            // depart() was skipped: free the seat anyway so waiters are not
            // stranded behind a panicked holder.
            let _ = self.bridge.release(self.direction);
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("Bridge");
        dbg.field("capacity", &self.capacity);
        match self.snapshot() {
            Ok(snap) => dbg
                .field("flow", &snap.flow)
                .field("occupants", &snap.occupants)
                .field("waiting", &snap.waiting)
                .finish(),
            Err(_) => dbg.field("state", &"<poisoned>").finish(),
        }
    }
}

/// Poisons the state lock by panicking a throwaway thread inside it.
#[cfg(test)]
pub(crate) fn poison_bridge(bridge: &std::sync::Arc<Bridge>) {
    let poisoner = std::sync::Arc::clone(bridge);
    let result = std::thread::spawn(move || {
        let _guard = poisoner.state.lock().expect("clean lock");
        panic!("poison the bridge lock");
    })
    .join();
    assert!(result.is_err(), "poisoner thread must panic");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::bridge::Direction::{Eastbound, Westbound};

    #[test]
    fn test_new_rejects_zero_capacity() {
        let err = Bridge::new(0).expect_err("zero capacity");
        assert_eq!(err, ConfigError::ZeroCapacity);
    }

    #[test]
    fn test_uncontended_crossing_round_trip() {
        let bridge = Bridge::new(3).expect("bridge");
        let permit = bridge.arrive(Eastbound).expect("empty deck");
        assert_eq!(permit.direction(), Eastbound);

        let snap = permit.observe().expect("snapshot");
        assert_eq!(snap.flow, Some(Eastbound));
        assert_eq!(snap.occupants, 1);
        assert_eq!(snap.capacity, 3);
        assert_eq!(snap.waiting, [0, 0]);

        permit.depart().expect("depart");
        let snap = bridge.snapshot().expect("snapshot");
        assert!(snap.is_idle());
        assert_eq!(snap.flow, None);
    }

    #[test]
    fn test_same_direction_vehicles_share_the_deck() {
        let bridge = Bridge::new(3).expect("bridge");
        let first = bridge.arrive(Westbound).expect("first");
        let second = bridge.arrive(Westbound).expect("second");
        let snap = bridge.snapshot().expect("snapshot");
        assert_eq!(snap.occupants, 2);
        assert_eq!(snap.flow, Some(Westbound));

        first.depart().expect("first departs");
        let snap = bridge.snapshot().expect("snapshot");
        assert_eq!(snap.occupants, 1);
        assert_eq!(snap.flow, Some(Westbound), "flow holds until the deck empties");
        second.depart().expect("second departs");
        assert!(bridge.snapshot().expect("snapshot").is_idle());
    }

    #[test]
    fn test_dropped_permit_frees_its_seat() {
        let bridge = Bridge::new(2).expect("bridge");
        {
            let _permit = bridge.arrive(Eastbound).expect("enter");
            assert_eq!(bridge.snapshot().expect("snapshot").occupants, 1);
        }
        assert!(bridge.snapshot().expect("snapshot").is_idle());
    }

    #[test]
    fn test_poisoned_lock_reports_on_every_operation() {
        let bridge = Arc::new(Bridge::new(2).expect("bridge"));
        poison_bridge(&bridge);

        assert_eq!(bridge.snapshot(), Err(BridgeError::Poisoned));
        let err = bridge.arrive(Eastbound).map(|_| ()).expect_err("arrive");
        assert_eq!(err, BridgeError::Poisoned);
    }

    #[test]
    fn test_departure_from_poisoned_bridge_reports_not_panics() {
        let bridge = Arc::new(Bridge::new(2).expect("bridge"));
        let permit = bridge.arrive(Westbound).expect("enter before poisoning");
        poison_bridge(&bridge);

        assert_eq!(permit.observe(), Err(BridgeError::Poisoned));
        assert_eq!(permit.depart(), Err(BridgeError::Poisoned));
    }

    #[test]
    fn test_poisoned_departure_wakes_sleeping_waiters() {
        let bridge = Arc::new(Bridge::new(1).expect("bridge"));
        let permit = bridge.arrive(Eastbound).expect("take the only seat");

        let waiter = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || bridge.arrive(Eastbound).map(|_| ()))
        };
        let deadline = Instant::now() + Duration::from_secs(5);
        while bridge.snapshot().expect("snapshot").waiting_toward(Eastbound) == 0 {
            assert!(Instant::now() < deadline, "waiter never queued");
            thread::sleep(Duration::from_millis(1));
        }

        poison_bridge(&bridge);
        assert_eq!(permit.depart(), Err(BridgeError::Poisoned));

        let woken = waiter.join().expect("waiter thread must not panic");
        assert_eq!(woken, Err(BridgeError::Poisoned), "waiter sees the poisoning");
    }

    #[test]
    fn test_capacity_accessor_needs_no_lock() {
        let bridge = Arc::new(Bridge::new(7).expect("bridge"));
        poison_bridge(&bridge);
        assert_eq!(bridge.capacity(), 7);
    }
}
