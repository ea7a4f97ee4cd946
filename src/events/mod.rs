//! Traffic events: types and the publish bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish traffic events emitted by vehicle threads and the simulation
//! runner.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - `Bus` (crate-internal) thin wrapper over a bounded channel
//!
//! ## Quick reference
//! - **Publishers**: `Vehicle::drive` and `Simulation::run`.
//! - **Consumer**: the listener thread inside `Simulation::run`, which fans
//!   events out to every registered subscriber via
//!   [`SubscriberSet`](crate::SubscriberSet).

mod bus;
mod event;

pub(crate) use bus::{channel, Bus};
pub use event::{Event, EventKind};
