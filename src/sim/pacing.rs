//! # Pacing policy for vehicle threads.
//!
//! [`Pacer`] abstracts every sleep a simulation takes, so timing is a policy
//! rather than a hard-coded call:
//!
//! - [`RandomPacer`] — coin-flip pauses drawn from configured ranges; makes
//!   interleavings vary between runs and shakes out ordering assumptions.
//! - [`NoPacer`] — never sleeps; lets tests drive the same code at full
//!   speed and leave contention to the scheduler alone.
//!
//! Sleeping happens at three [`PausePoint`]s: on the approach to the bridge,
//! during each half of the crossing, and between consecutive launches.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::config::SimConfig;

/// Where in a vehicle's trip a pause may happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausePoint {
    /// Before the vehicle reaches the bridge.
    Approach,
    /// On the deck, before and after looking around.
    Crossing,
    /// Between consecutive vehicle launches.
    Launch,
}

/// Decides whether and how long a vehicle sleeps at each pause point.
///
/// Implementations must be cheap to call from many threads at once.
pub trait Pacer: Send + Sync + 'static {
    /// Possibly sleeps the calling thread.
    fn pause(&self, point: PausePoint);
}

/// Coin-flip pacing drawn from the configured ranges.
///
/// At each pause point, sleeps with probability `pace_probability` for a
/// uniformly random duration from that point's range (millisecond
/// granularity), and otherwise proceeds immediately. The coin plus the
/// random duration is what makes one run's interleaving different from the
/// next.
#[derive(Debug, Clone)]
pub struct RandomPacer {
    probability: f64,
    approach: RangeInclusive<Duration>,
    crossing: RangeInclusive<Duration>,
    launch: RangeInclusive<Duration>,
}

impl RandomPacer {
    /// Builds a pacer from the pacing fields of `cfg`.
    #[must_use]
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            probability: cfg.pace_probability.clamp(0.0, 1.0),
            approach: cfg.approach_pause.clone(),
            crossing: cfg.crossing_pause.clone(),
            launch: cfg.launch_pause.clone(),
        }
    }

    fn maybe_sleep(&self, range: &RangeInclusive<Duration>) {
        let mut rng = rand::rng();
        if self.probability <= 0.0 || !rng.random_bool(self.probability) {
            return;
        }
        let lo = range.start().as_millis() as u64;
        let hi = (range.end().as_millis() as u64).max(lo);
        let ms = if hi == lo {
            lo
        } else {
            rng.random_range(lo..=hi)
        };
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl Pacer for RandomPacer {
    fn pause(&self, point: PausePoint) {
        match point {
            PausePoint::Approach => self.maybe_sleep(&self.approach),
            PausePoint::Crossing => self.maybe_sleep(&self.crossing),
            PausePoint::Launch => self.maybe_sleep(&self.launch),
        }
    }
}

/// Pacer that never sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&self, _point: PausePoint) {}
}
