//! # One vehicle's trip.
//!
//! [`Vehicle::drive`] is the script every simulated vehicle runs on its own
//! thread: pause on the approach, queue up, cross with a pause on the deck,
//! look around mid-crossing, and depart. Every stage publishes an event;
//! a failed stage publishes [`EventKind::VehicleFailed`] with the reason
//! before the error is handed back to the runner.

use crate::bridge::{Bridge, Direction};
use crate::error::BridgeError;
use crate::events::{Bus, Event, EventKind};
use crate::sim::{Pacer, PausePoint};

/// Identity of one simulated vehicle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Vehicle {
    pub(crate) id: u32,
    pub(crate) direction: Direction,
}

impl Vehicle {
    /// Runs the whole trip, reporting a failure event if any stage fails.
    pub(crate) fn drive(
        &self,
        bridge: &Bridge,
        bus: &Bus,
        pacer: &dyn Pacer,
    ) -> Result<(), BridgeError> {
        let result = self.cross(bridge, bus, pacer);
        if let Err(err) = &result {
            bus.publish(self.event(EventKind::VehicleFailed).with_reason(err.to_string()));
        }
        result
    }

    /// The trip itself: approach, queue, enter, observe mid-deck, depart.
    fn cross(&self, bridge: &Bridge, bus: &Bus, pacer: &dyn Pacer) -> Result<(), BridgeError> {
        pacer.pause(PausePoint::Approach);
        bus.publish(self.event(EventKind::VehicleQueued));

        let permit = bridge.arrive(self.direction)?;
        bus.publish(self.event(EventKind::VehicleEntered));

        pacer.pause(PausePoint::Crossing);
        let snapshot = permit.observe()?;
        bus.publish(self.event(EventKind::BridgeObserved).with_snapshot(snapshot));
        pacer.pause(PausePoint::Crossing);

        permit.depart()?;
        bus.publish(self.event(EventKind::VehicleExited));
        Ok(())
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_vehicle(self.id)
            .with_direction(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::bridge::poison_bridge;
    use crate::events::channel;
    use crate::sim::NoPacer;

    #[test]
    fn test_trip_publishes_the_full_lifecycle() {
        let bridge = Arc::new(Bridge::new(3).expect("bridge"));
        let (bus, rx) = channel(16);
        let vehicle = Vehicle {
            id: 4,
            direction: Direction::Westbound,
        };

        vehicle.drive(&bridge, &bus, &NoPacer).expect("clean trip");
        drop(bus);

        let events: Vec<Event> = rx.iter().collect();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::VehicleQueued,
                EventKind::VehicleEntered,
                EventKind::BridgeObserved,
                EventKind::VehicleExited,
            ],
        );
        for event in &events {
            assert_eq!(event.vehicle, Some(4));
            assert_eq!(event.direction, Some(Direction::Westbound));
        }

        let observed = events[2].snapshot.expect("snapshot attached");
        assert!(observed.is_coherent());
        assert_eq!(observed.occupants, 1, "the observer counts itself");
        assert_eq!(observed.flow, Some(Direction::Westbound));
        assert!(bridge.snapshot().expect("snapshot").is_idle());
    }

    #[test]
    fn test_failed_arrival_publishes_queued_then_failed() {
        let bridge = Arc::new(Bridge::new(2).expect("bridge"));
        poison_bridge(&bridge);
        let (bus, rx) = channel(16);
        let vehicle = Vehicle {
            id: 9,
            direction: Direction::Eastbound,
        };

        let err = vehicle
            .drive(&bridge, &bus, &NoPacer)
            .expect_err("poisoned bridge");
        assert_eq!(err, BridgeError::Poisoned);
        drop(bus);

        let events: Vec<Event> = rx.iter().collect();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [EventKind::VehicleQueued, EventKind::VehicleFailed]);
        let reason = events[1].reason.as_deref().expect("reason attached");
        assert!(reason.contains("poisoned"), "got: {reason}");
    }
}
