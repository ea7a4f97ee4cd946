//! # One-lane bridge monitor
//!
//! A capacity-bounded bridge that vehicles cross in one direction at a
//! time. The module splits into pure decision logic and a blocking shell:
//!
//! - [`state`]: counters and transition functions, no locking, fully
//!   testable single-threaded.
//! - [`monitor`]: the mutex, the two per-direction condition variables,
//!   and the [`Permit`] guard that ties admission to departure.
//!
//! ```text
//!   eastbound lobby                                    westbound lobby
//!   ┌────────────┐        ┌────────────────────┐       ┌────────────┐
//!   │ waiting: n │ ──────▶│  deck ≤ capacity   │◀───── │ waiting: m │
//!   └────────────┘ arrive │  flow: one way     │ arrive└────────────┘
//!                         └────────────────────┘
//!            depart: wake own lobby first, then the oncoming one
//! ```
//!
//! Entry blocks while traffic flows the other way or the deck is full;
//! departure never blocks and wakes exactly as many waiters as could now
//! enter.
//!
//! Admission carries no fairness guarantee: while vehicles keep departing
//! and arriving in one direction, the flow never resets and the oncoming
//! lobby can wait unboundedly.

mod direction;
mod monitor;
pub(crate) mod state;

pub use direction::Direction;
pub use monitor::{Bridge, Permit};
pub use state::BridgeSnapshot;

#[cfg(test)]
pub(crate) use monitor::poison_bridge;
