//! # Event bus for publishing traffic events.
//!
//! [`Bus`] is a thin wrapper around a bounded [`crossbeam_channel`] sender
//! that provides non-blocking event publishing from many vehicle threads at
//! once.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                   Listener (one):
//!   Vehicle 1 ──┐
//!   Vehicle 2 ──┼──────► Bus ────────► event loop ────► SubscriberSet
//!   Vehicle N ──┤  (bounded channel)   (in Simulation)
//!   Runner    ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks a crossing; it calls
//!   `Sender::try_send`.
//! - **Bounded capacity**: when the listener falls behind by a full queue,
//!   the newest event is dropped and a warning goes to stderr.
//! - **No persistence**: once the listener hangs up, events are dropped
//!   silently; this is the normal state during shutdown.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use super::event::Event;

/// Creates a bus and the receiving end its listener drains.
///
/// The minimum capacity is 1 (clamped).
pub(crate) fn channel(capacity: usize) -> (Bus, Receiver<Event>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
    (Bus { tx }, rx)
}

/// Bounded channel for traffic events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone; every vehicle thread carries one.
#[derive(Clone, Debug)]
pub(crate) struct Bus {
    tx: Sender<Event>,
}

impl Bus {
    /// Publishes an event without blocking.
    ///
    /// - Takes ownership of the event.
    /// - A full queue drops this event and warns on stderr.
    /// - A hung-up listener drops it silently.
    pub(crate) fn publish(&self, ev: Event) {
        match self.tx.try_send(ev) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                eprintln!("[bridgekeeper] event bus full, dropped {:?}", ev.kind);
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
