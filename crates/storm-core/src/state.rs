//! Game state snapshot: the complete visible state handed to the
//! presentation, audio and HUD sinks after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, HudEvent};
use crate::types::{Position, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub hud: HudView,
    /// Every live entity, sorted by id.
    pub entities: Vec<EntityView>,
    /// Entities detached this tick; their sprites should be dropped.
    pub removed: Vec<u64>,
    pub audio_events: Vec<AudioEvent>,
    pub hud_events: Vec<HudEvent>,
}

/// A single on-screen entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    /// Stable handle for the lifetime of the entity.
    pub id: u64,
    pub kind: EntityKind,
    /// Always `Alive` for kinds without a destruction phase.
    pub state: DestroyState,
    pub position: Position,
    pub width: f64,
    pub height: f64,
}

/// Running score and lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub lives: u32,
    pub total_score: u32,
}
