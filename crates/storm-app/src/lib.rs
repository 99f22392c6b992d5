//! Storm Fighters headless driver.
//!
//! Wires the simulation engine to a fixed-period tick thread, an input
//! source that feeds player intents, and sinks that consume snapshots.

pub mod autopilot;
pub mod game_loop;
pub mod sinks;
pub mod state;

pub use storm_core as core;
