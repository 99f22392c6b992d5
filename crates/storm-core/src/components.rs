//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Fixed sprite dimensions of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub width: f64,
    pub height: f64,
}

/// Margins that shrink the collision rectangle inside the sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitboxInset {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Marks an entity as a projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub heading: Heading,
}

/// Firing capability with a per-entity cooldown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireControl {
    /// Minimum ticks between shots (fires when `tick > last_fired + cooldown`).
    pub cooldown: u64,
    /// Tick of the most recent shot.
    pub last_fired: u64,
}

/// Two-phase destruction state for enemies that leave a wreck.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Destruction {
    pub state: DestroyState,
    /// Tick at which the entity was destroyed.
    pub destroyed_at: Option<u64>,
}

/// Marks an entity that reacts to overlapping another entity's hitbox.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reactive;

/// Intent flags fed by the input source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerControl {
    pub move_left: bool,
    pub move_right: bool,
    /// Latched on a fire-key press edge; cleared by the input source on
    /// release or by the simulation once a volley is fired.
    pub fire_latched: bool,
}

// Position and Velocity (types.rs) are used as components too.
