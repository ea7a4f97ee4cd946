//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into
//! a simulation. Each subscriber is driven by a dedicated worker thread fed by
//! a bounded queue that is owned by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) - they do **not** block
//!   crossing vehicles nor other subscribers.
//! - Each subscriber **declares** its preferred queue capacity via
//!   [`Subscribe::queue_capacity`]. If a queue overflows, events for that
//!   subscriber are **dropped** (warn).
//!
//! ## Example
//! ```rust
//! use bridgekeeper::{Event, Subscribe};
//!
//! struct Audit;
//!
//! impl Subscribe for Audit {
//!     fn on_event(&self, event: &Event) {
//!         let _ = event; // write audit record...
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "audit"
//!     }
//!
//!     fn queue_capacity(&self) -> usize {
//!         512
//!     }
//! }
//! ```

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker thread. Events arrive in publish
/// order, one at a time; a panic inside `on_event` is caught by the worker and
/// does not take the simulation down.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &Event);

    /// Human-readable name (for warnings and thread names).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    ///
    /// On overflow, events for this subscriber are **dropped** (warn).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
