//! # Global simulation configuration.
//!
//! [`SimConfig`] defines a simulation's shape: bridge capacity, fleet size,
//! event bus capacity, and the random pacing that spreads vehicle threads
//! out in time.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use bridgekeeper::SimConfig;
//!
//! let mut cfg = SimConfig::default();
//! cfg.capacity = 5;
//! cfg.vehicles = 40;
//! cfg.pace_probability = 1.0;
//! cfg.crossing_pause = Duration::from_millis(1)..=Duration::from_millis(10);
//!
//! assert!(cfg.validate().is_ok());
//! ```

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::ConfigError;

/// Most vehicles a single simulation run accepts.
pub const MAX_VEHICLES: usize = 100;

/// Global configuration for a simulation run.
///
/// Controls the bridge, the fleet, the event bus, and pacing. Pause ranges
/// are inclusive; a range whose ends are equal is a fixed pause.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Most vehicles the bridge holds at once.
    pub capacity: u32,
    /// Fleet size used when no explicit travel plan is given.
    pub vehicles: usize,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
    /// Chance (0.0..=1.0) that any given pause point actually sleeps.
    pub pace_probability: f64,
    /// Sleep range before a vehicle reaches the bridge.
    pub approach_pause: RangeInclusive<Duration>,
    /// Sleep range for each half of the crossing itself.
    pub crossing_pause: RangeInclusive<Duration>,
    /// Sleep range between consecutive vehicle launches.
    pub launch_pause: RangeInclusive<Duration>,
}

impl Default for SimConfig {
    /// Provides a default configuration:
    /// - `capacity = 3`
    /// - `vehicles = 20`
    /// - `bus_capacity = 1024`
    /// - `pace_probability = 0.5` (a coin flip per pause point)
    /// - `approach_pause = 1s..=1s`
    /// - `crossing_pause = 1s..=5s`
    /// - `launch_pause = 1s..=3s`
    fn default() -> Self {
        Self {
            capacity: 3,
            vehicles: 20,
            bus_capacity: 1024,
            pace_probability: 0.5,
            approach_pause: Duration::from_secs(1)..=Duration::from_secs(1),
            crossing_pause: Duration::from_secs(1)..=Duration::from_secs(5),
            launch_pause: Duration::from_secs(1)..=Duration::from_secs(3),
        }
    }
}

impl SimConfig {
    /// Same shape, millisecond pacing. For demos and tests that should not
    /// take half a minute.
    #[must_use]
    pub fn with_fast_pacing(mut self) -> Self {
        self.approach_pause = Duration::from_millis(1)..=Duration::from_millis(1);
        self.crossing_pause = Duration::from_millis(1)..=Duration::from_millis(5);
        self.launch_pause = Duration::from_millis(1)..=Duration::from_millis(3);
        self
    }

    /// Checks the configuration before any thread is spawned.
    ///
    /// ## Errors
    /// - [`ConfigError::ZeroCapacity`] for a bridge that admits nobody.
    /// - [`ConfigError::VehicleCount`] for a fleet outside `1..=`[`MAX_VEHICLES`].
    /// - [`ConfigError::PaceProbability`] for a probability outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.vehicles == 0 || self.vehicles > MAX_VEHICLES {
            return Err(ConfigError::VehicleCount {
                got: self.vehicles,
                max: MAX_VEHICLES,
            });
        }
        if !self.pace_probability.is_finite() || !(0.0..=1.0).contains(&self.pace_probability) {
            return Err(ConfigError::PaceProbability {
                got: self.pace_probability,
            });
        }
        Ok(())
    }
}
