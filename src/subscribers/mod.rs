//! # Event subscribers for the bridge simulation.
//!
//! This module provides the [`Subscribe`] trait, the fan-out
//! [`SubscriberSet`], and built-in implementations for handling traffic
//! events published through the simulation's event bus.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Vehicle ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!                                                            │
//!                                              ┌─────────────┼─────────────┐
//!                                              ▼             ▼             ▼
//!                                       ConsoleReporter TrafficLedger   Custom
//!                                        (one worker + queue each)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events
//!   ([`ConsoleReporter`])
//! - **Stateful subscribers** - maintain internal state based on events
//!   ([`TrafficLedger`])

mod console;
mod ledger;
mod set;
mod subscribe;

pub use console::ConsoleReporter;
pub use ledger::{LedgerSummary, TrafficLedger};
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
