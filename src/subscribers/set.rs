//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::events::Event) to
//! multiple subscribers **without waiting** for their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No lockstep across different subscribers; a slow one lags on its own.
//! - No retries on per-subscriber queue overflow (events are dropped for
//!   that subscriber).
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, TrySendError};

use crate::events::Event;

use super::Subscribe;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker threads.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker thread per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, rx) = crossbeam_channel::bounded::<Arc<Event>>(cap);
            let s = Arc::clone(&sub);

            let handle = std::thread::spawn(move || {
                while let Ok(ev) = rx.recv() {
                    let hook = AssertUnwindSafe(|| s.on_event(ev.as_ref()));
                    if let Err(panic_err) = std::panic::catch_unwind(hook) {
                        eprintln!(
                            "[bridgekeeper] subscriber '{}' panicked: {:?}",
                            s.name(),
                            panic_err
                        );
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self { channels, workers }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is dropped
    /// for it and a warning is logged with the subscriber's name.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    eprintln!(
                        "[bridgekeeper] subscriber '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(TrySendError::Disconnected(_)) => {
                    eprintln!(
                        "[bridgekeeper] subscriber '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// Graceful shutdown: close all queues and join every worker.
    ///
    /// Workers drain whatever their queues still hold before exiting.
    pub fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.join();
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::events::EventKind;

    struct Counting {
        seen: AtomicUsize,
    }

    impl Subscribe for Counting {
        fn on_event(&self, _event: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Panicking;

    impl Subscribe for Panicking {
        fn on_event(&self, _event: &Event) {
            panic!("handler blew up");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let counter = Arc::new(Counting {
            seen: AtomicUsize::new(0),
        });
        let set = SubscriberSet::new(vec![Arc::clone(&counter) as Arc<dyn Subscribe>]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());

        for id in 0..3 {
            set.emit(&Event::new(EventKind::VehicleQueued).with_vehicle(id));
        }
        set.shutdown();
        assert_eq!(counter.seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_panicking_subscriber_does_not_stop_the_others() {
        let counter = Arc::new(Counting {
            seen: AtomicUsize::new(0),
        });
        let set = SubscriberSet::new(vec![
            Arc::new(Panicking) as Arc<dyn Subscribe>,
            Arc::clone(&counter) as Arc<dyn Subscribe>,
        ]);

        set.emit(&Event::new(EventKind::VehicleEntered).with_vehicle(0));
        set.emit(&Event::new(EventKind::VehicleExited).with_vehicle(0));
        set.shutdown();
        assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_set_accepts_events() {
        let set = SubscriberSet::new(Vec::new());
        assert!(set.is_empty());
        set.emit(&Event::new(EventKind::SimulationStarted).with_total(0));
        set.shutdown();
    }
}
