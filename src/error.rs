//! Error types used by the bridge monitor and the crossing simulator.
//!
//! This module defines three error enums:
//!
//! - [`BridgeError`] — failures surfaced by the monitor itself.
//! - [`ConfigError`] — rejected configuration or user input.
//! - [`SimError`] — how a simulation run reports vehicles that did not finish.
//!
//! All types provide an `as_label` helper for logging, and [`BridgeError`]
//! additionally distinguishes an unusable lock from a broken invariant via
//! [`BridgeError::is_invariant_violation`].

use thiserror::Error;

use crate::bridge::Direction;

/// # Errors produced by the bridge monitor.
///
/// Either the shared state became unusable ([`BridgeError::Poisoned`]) or an
/// admission audit found a state no interleaving should ever produce. Both
/// are fatal to the crossing that observed them; none is retried.
///
/// The audit variants exist so the admission path can prove its own
/// invariants at runtime: with the monitor working as designed they are
/// unreachable.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The mutex guarding the bridge state is poisoned: some crossing thread
    /// panicked while holding it, so the counters can no longer be trusted.
    /// Every subsequent lock attempt reports this.
    #[error("bridge state lock poisoned by a panicked crossing thread")]
    Poisoned,

    /// A vehicle was about to enter against oncoming traffic.
    #[error("collision: {entering} vehicle entering against {flow} traffic")]
    Collision {
        /// Direction the bridge was flowing when the audit fired.
        flow: Direction,
        /// Direction of the vehicle that was about to enter.
        entering: Direction,
    },

    /// A vehicle was about to enter a bridge already filled to capacity.
    #[error("overload: {occupants} vehicles on a bridge rated for {capacity}")]
    Overload {
        /// Occupants counted at the time of the audit.
        occupants: u32,
        /// Rated capacity of the bridge.
        capacity: u32,
    },

    /// The bridge claims to be idle while still counting occupants.
    #[error("idle bridge still counts {occupants} occupant(s)")]
    PhantomOccupants {
        /// The non-zero occupant count observed with no traffic flow.
        occupants: u32,
    },
}

impl BridgeError {
    /// Returns a short stable label (snake_case) for use in logs and tests.
    ///
    /// # Example
    /// ```
    /// use bridgekeeper::BridgeError;
    ///
    /// let err = BridgeError::Overload { occupants: 4, capacity: 3 };
    /// assert_eq!(err.as_label(), "bridge_overload");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BridgeError::Poisoned => "lock_poisoned",
            BridgeError::Collision { .. } => "bridge_collision",
            BridgeError::Overload { .. } => "bridge_overload",
            BridgeError::PhantomOccupants { .. } => "phantom_occupants",
        }
    }

    /// Indicates whether the error is a broken safety invariant rather than
    /// an unusable lock.
    ///
    /// Returns `true` for every variant except [`BridgeError::Poisoned`].
    ///
    /// # Example
    /// ```
    /// use bridgekeeper::BridgeError;
    ///
    /// assert!(!BridgeError::Poisoned.is_invariant_violation());
    ///
    /// let crash = BridgeError::PhantomOccupants { occupants: 2 };
    /// assert!(crash.is_invariant_violation());
    /// ```
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, BridgeError::Poisoned)
    }
}

/// # Errors produced by configuration and input validation.
///
/// These are all rejected before any vehicle thread is spawned.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Capacity zero would block every arrival forever.
    #[error("bridge capacity must be at least 1")]
    ZeroCapacity,

    /// Vehicle count outside the supported range.
    #[error("vehicle count {got} outside 1..={max}")]
    VehicleCount {
        /// The count that was asked for.
        got: usize,
        /// Largest supported count.
        max: usize,
    },

    /// A direction token that is neither eastbound nor westbound.
    #[error("unknown direction {token:?} (expected e/east/eastbound or w/west/westbound)")]
    UnknownDirection {
        /// The offending token, trimmed.
        token: String,
    },

    /// Pacing probability outside `0.0..=1.0`.
    #[error("pace probability {got} outside 0.0..=1.0")]
    PaceProbability {
        /// The probability that was asked for.
        got: f64,
    },

    /// A travel plan with no vehicles in it.
    #[error("travel plan is empty")]
    EmptyPlan,
}

/// # Errors produced by a simulation run.
///
/// A run fails if its input was rejected, or if any vehicle thread came back
/// with a [`BridgeError`] or a panic. Vehicles that already crossed stay
/// crossed; the first failure in spawn order is the one reported.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SimError {
    /// The run was rejected before any vehicle was spawned.
    #[error("invalid simulation input")]
    Config(#[from] ConfigError),

    /// A vehicle aborted its crossing with a bridge failure.
    #[error("vehicle {id} aborted its crossing: {source}")]
    Vehicle {
        /// Identifier of the vehicle that failed.
        id: u32,
        /// The failure it observed.
        source: BridgeError,
    },

    /// A vehicle thread panicked somewhere outside the monitor.
    #[error("vehicle {id} panicked mid-crossing")]
    VehiclePanicked {
        /// Identifier of the vehicle whose thread panicked.
        id: u32,
    },
}

impl SimError {
    /// Returns a short stable label (snake_case) for use in logs and tests.
    pub fn as_label(&self) -> &'static str {
        match self {
            SimError::Config(_) => "invalid_input",
            SimError::Vehicle { .. } => "vehicle_failed",
            SimError::VehiclePanicked { .. } => "vehicle_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_labels_are_stable() {
        let errors = [
            BridgeError::Poisoned,
            BridgeError::Collision {
                flow: Direction::Eastbound,
                entering: Direction::Westbound,
            },
            BridgeError::Overload {
                occupants: 4,
                capacity: 3,
            },
            BridgeError::PhantomOccupants { occupants: 2 },
        ];
        let labels: Vec<_> = errors.iter().map(BridgeError::as_label).collect();
        assert_eq!(
            labels,
            [
                "lock_poisoned",
                "bridge_collision",
                "bridge_overload",
                "phantom_occupants"
            ],
        );
    }

    #[test]
    fn test_poisoning_is_not_an_invariant_violation() {
        assert!(!BridgeError::Poisoned.is_invariant_violation());
        assert!(BridgeError::PhantomOccupants { occupants: 1 }.is_invariant_violation());
        assert!(BridgeError::Overload {
            occupants: 4,
            capacity: 3,
        }
        .is_invariant_violation());
    }

    #[test]
    fn test_collision_display_names_both_directions() {
        let err = BridgeError::Collision {
            flow: Direction::Westbound,
            entering: Direction::Eastbound,
        };
        let text = err.to_string();
        assert!(text.contains("eastbound"), "got: {text}");
        assert!(text.contains("westbound"), "got: {text}");
    }

    #[test]
    fn test_sim_error_wraps_config_error_as_source() {
        let err: SimError = ConfigError::EmptyPlan.into();
        assert_eq!(err.as_label(), "invalid_input");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_vehicle_error_keeps_bridge_source() {
        let err = SimError::Vehicle {
            id: 7,
            source: BridgeError::Poisoned,
        };
        assert!(err.to_string().contains("vehicle 7"), "got: {err}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
