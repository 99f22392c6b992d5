//! Simulation engine for Storm Fighters.
//!
//! Owns the hecs ECS world, runs systems once per fixed tick,
//! and produces GameStateSnapshots for the presentation layer.

pub mod config;
pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use config::{Arena, ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use storm_core as core;
