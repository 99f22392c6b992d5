//! Core types and definitions for the Storm Fighters simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, state snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
