//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What an entity is. Drives movement, firing and collision dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Drifting asteroid. Falls straight down, cannot be destroyed.
    Obstacle,
    /// Bullet fired by the player or an enemy.
    Projectile,
    /// Tie-fighter style enemy: dives diagonally, wraps horizontally,
    /// bounces off other entities and fires when above the player.
    PatrolFighter,
    /// Saucer crossing the screen left to right, firing on a long cooldown.
    Saucer,
    /// The player's ship.
    Player,
}

/// Vertical travel direction of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Toward the top of the screen (fired by the player).
    Up,
    /// Toward the bottom of the screen (fired by enemies).
    Down,
}

impl Heading {
    /// -1 for up, +1 for down (screen y grows downward).
    pub fn sign(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

/// Two-phase destruction lifecycle of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyState {
    #[default]
    Alive,
    /// Hit; immobile and showing its wreck sprite until the grace period ends.
    Destroyed,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Out of lives. Terminal until a new game is started.
    Ended,
}
