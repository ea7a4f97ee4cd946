//! # Crossing simulation: vehicles, pacing, and the runner.
//!
//! This module turns the bridge monitor into a runnable experiment. A
//! [`Simulation`] spawns one thread per vehicle; each thread runs the same
//! trip script against the shared [`Bridge`](crate::Bridge) while a
//! [`Pacer`] decides where real time is spent.
//!
//! ## Contents
//! - [`Simulation`], [`SimSummary`], [`random_plan`] run lifecycle
//! - [`Pacer`], [`RandomPacer`], [`NoPacer`], [`PausePoint`] timing policy
//! - `Vehicle` (crate-internal) the per-thread trip script

mod pacing;
mod runner;
mod vehicle;

pub use pacing::{NoPacer, Pacer, PausePoint, RandomPacer};
pub use runner::{random_plan, SimSummary, Simulation};
