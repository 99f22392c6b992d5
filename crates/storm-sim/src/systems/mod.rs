//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; engine-level state is passed in explicitly.

pub mod cleanup;
pub mod collision;
pub mod firing;
pub mod hitbox;
pub mod movement;
pub mod snapshot;
pub mod spawner;
