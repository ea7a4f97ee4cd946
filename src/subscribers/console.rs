//! # Console reporting subscriber for demos and the CLI.
//!
//! [`ConsoleReporter`] prints events to stdout in a human-readable format.
//! One line per lifecycle event, plus a multi-line bridge report whenever a
//! vehicle looks around mid-crossing.
//!
//! ## Output format
//! ```text
//! [start] vehicles=20
//! [queued] vehicle=4 direction=westbound
//! [enter] vehicle=4 direction=westbound
//!
//! ====== one-lane bridge ======
//! flow of traffic: 2 vehicle(s) westbound
//! waiting eastbound: 1
//! waiting westbound: 4
//!
//! [exit] vehicle=4 direction=westbound
//! [failed] vehicle=9 direction=eastbound reason="..."
//! [finish] vehicles=20
//! ```

use crate::bridge::Direction;
use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout reporting subscriber.
///
/// Prints human-readable event descriptions for demonstrations and the
/// interactive CLI. Implement a custom [`Subscribe`] for structured logging
/// or metrics collection.
pub struct ConsoleReporter;

impl Subscribe for ConsoleReporter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::SimulationStarted => {
                println!("[start] vehicles={}", e.total.unwrap_or(0));
            }
            EventKind::SimulationFinished => {
                println!("[finish] vehicles={}", e.total.unwrap_or(0));
            }
            EventKind::VehicleQueued => {
                if let (Some(id), Some(dir)) = (e.vehicle, e.direction) {
                    println!("[queued] vehicle={id} direction={dir}");
                }
            }
            EventKind::VehicleEntered => {
                if let (Some(id), Some(dir)) = (e.vehicle, e.direction) {
                    println!("[enter] vehicle={id} direction={dir}");
                }
            }
            EventKind::VehicleExited => {
                if let (Some(id), Some(dir)) = (e.vehicle, e.direction) {
                    println!("[exit] vehicle={id} direction={dir}");
                }
            }
            EventKind::VehicleFailed => {
                println!(
                    "[failed] vehicle={:?} direction={:?} reason={:?}",
                    e.vehicle, e.direction, e.reason
                );
            }
            EventKind::BridgeObserved => {
                if let Some(snap) = e.snapshot {
                    let flow = match snap.flow {
                        Some(dir) => format!("{} vehicle(s) {dir}", snap.occupants),
                        None => "idle".to_string(),
                    };
                    println!(
                        "\n====== one-lane bridge ======\n\
                         flow of traffic: {flow}\n\
                         waiting eastbound: {}\n\
                         waiting westbound: {}\n",
                        snap.waiting_toward(Direction::Eastbound),
                        snap.waiting_toward(Direction::Westbound),
                    );
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
