//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use storm_core::components::{Body, Destruction};
use storm_core::enums::*;
use storm_core::events::{AudioEvent, HudEvent};
use storm_core::state::*;
use storm_core::types::{Position, SimTime};

use crate::score::ScoreState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    score: &ScoreState,
    audio_events: Vec<AudioEvent>,
    hud_events: Vec<HudEvent>,
    removed: &[Entity],
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        hud: score.view(),
        entities: build_entities(world),
        removed: removed.iter().map(|entity| entity_id(*entity)).collect(),
        audio_events,
        hud_events,
    }
}

/// Stable id handed to the presentation for an entity's lifetime.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Build EntityView list from all entities with a body.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut entities: Vec<EntityView> = world
        .query::<(&EntityKind, &Position, &Body, Option<&Destruction>)>()
        .iter()
        .map(|(entity, (kind, pos, body, destruction))| EntityView {
            id: entity_id(entity),
            kind: *kind,
            state: destruction.map(|d| d.state).unwrap_or_default(),
            position: *pos,
            width: body.width,
            height: body.height,
        })
        .collect();

    entities.sort_by_key(|view| view.id);
    entities
}
