//! Collision resolution against the tick's hitbox table.
//!
//! Two protocols run back to back and must stay in this order:
//!
//! 1. `resolve_projectile_hits`: upward (player) projectiles destroy the
//!    first thing they overlap. Downward projectiles never take part; the
//!    player detects enemy fire itself in phase 2, so enemies can't shoot
//!    each other and player hits aren't counted twice.
//! 2. `resolve_reactions`: reactive entities respond to overlap. Patrol
//!    fighters back off and reverse, the player loses a life.
//!
//! A target destroyed in phase 1 keeps its hitbox for the rest of the tick
//! and is plain geometry to phase 2.

use hecs::{Entity, World};
use log::debug;

use storm_core::components::{Body, Destruction, Projectile, Reactive};
use storm_core::enums::{DestroyState, EntityKind, Heading};
use storm_core::events::{AudioEvent, HudEvent};
use storm_core::types::{Position, Velocity};

use crate::config::Arena;
use crate::score::ScoreState;
use crate::systems::cleanup::PendingRemoval;
use crate::systems::hitbox::{collision_rect, HitboxTable};
use crate::systems::movement;

/// What a collision phase asks the engine to do afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// The player was struck; the engine must run the life-loss transition.
    pub player_destroyed: bool,
}

/// Result of a destroy signal sent to a struck entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The entity cannot be destroyed (obstacles) or no longer exists.
    Unaffected,
    /// A projectile, scheduled for removal.
    Removed,
    /// An enemy switched to its wreck state; points were flagged.
    Destroyed,
    /// An enemy that was already a wreck. Nothing changes.
    AlreadyDestroyed,
    /// The player. The caller must trigger the life-loss transition.
    PlayerDown,
}

/// Phase 1: player projectiles against the hitbox table.
///
/// Each live upward projectile scans the table in order; on its first hit it
/// removes itself, sends a destroy signal to the struck entity and stops.
/// A pending award is settled after every projectile, so each kill scores
/// exactly once.
pub fn resolve_projectile_hits(
    world: &mut World,
    table: &HitboxTable,
    tick: u64,
    pending: &mut PendingRemoval,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
    hud_events: &mut Vec<HudEvent>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for hitbox in table.entries() {
        let projectile = hitbox.entity;
        if !heads_up(world, projectile) || pending.contains(projectile) {
            continue;
        }

        if let Some(struck) = table.first_overlap(&hitbox.rect, projectile) {
            pending.schedule(projectile);
            let result = destroy(world, struck.entity, tick, pending, audio_events, score);
            debug!(
                "projectile {:?} struck {:?}: {:?}",
                projectile, struck.entity, result
            );
            if result == DestroyOutcome::PlayerDown {
                outcome.player_destroyed = true;
            }
        }

        score.settle_award(hud_events);
    }

    outcome
}

/// Phase 2: reactive entities against the hitbox table.
///
/// Only entities that were in the table when it was built take part, so a
/// player spawned mid-tick is first tested on the next tick.
pub fn resolve_reactions(
    world: &mut World,
    table: &HitboxTable,
    arena: &Arena,
    pending: &PendingRemoval,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for hitbox in table.entries() {
        let entity = hitbox.entity;
        if pending.contains(entity) || world.get::<&Reactive>(entity).is_err() {
            continue;
        }
        let kind = match world.get::<&EntityKind>(entity) {
            Ok(kind) => *kind,
            Err(_) => continue,
        };

        match kind {
            EntityKind::PatrolFighter => {
                back_off(world, entity, table, arena);
            }
            EntityKind::Player => {
                if let Some(other) = table.first_overlap(&hitbox.rect, entity) {
                    debug!("player {:?} collided with {:?}", entity, other.entity);
                    outcome.player_destroyed = true;
                }
            }
            _ => {}
        }
    }

    outcome
}

/// Send a destroy signal to `entity`, dispatched by kind.
///
/// Enemies with a destruction phase flip to `Destroyed` once: they stop,
/// start their grace timer, flag points and cue an explosion. Any later
/// signal is a no-op.
pub fn destroy(
    world: &mut World,
    entity: Entity,
    tick: u64,
    pending: &mut PendingRemoval,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
) -> DestroyOutcome {
    let kind = match world.get::<&EntityKind>(entity) {
        Ok(kind) => *kind,
        Err(_) => return DestroyOutcome::Unaffected,
    };

    match kind {
        EntityKind::Obstacle => DestroyOutcome::Unaffected,
        EntityKind::Projectile => {
            pending.schedule(entity);
            DestroyOutcome::Removed
        }
        EntityKind::Player => DestroyOutcome::PlayerDown,
        EntityKind::PatrolFighter | EntityKind::Saucer => {
            let Ok((destruction, vel)) =
                world.query_one_mut::<(&mut Destruction, &mut Velocity)>(entity)
            else {
                return DestroyOutcome::Unaffected;
            };
            if destruction.state == DestroyState::Destroyed {
                return DestroyOutcome::AlreadyDestroyed;
            }

            destruction.state = DestroyState::Destroyed;
            destruction.destroyed_at = Some(tick);
            *vel = Velocity::ZERO;

            score.flag_award();
            audio_events.push(AudioEvent::Explosion);
            debug!("{:?} {:?} destroyed at tick {}", kind, entity, tick);
            DestroyOutcome::Destroyed
        }
    }
}

/// Patrol fighter separation: on overlapping any other hitbox, step back one
/// horizontal velocity unit at a time until clear (or stopped), then reverse
/// horizontal direction. Returns the number of steps taken.
pub fn back_off(world: &mut World, entity: Entity, table: &HitboxTable, arena: &Arena) -> u32 {
    let Ok((pos, vel, body)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, &Body)>(entity)
    else {
        return 0;
    };

    let mut rect = collision_rect(pos, body, None);
    let obstacle = match table.first_overlap(&rect, entity) {
        Some(hitbox) => hitbox.rect,
        None => return 0,
    };

    let mut steps = 0;
    while rect.intersects(&obstacle) && vel.x != 0 {
        movement::step(pos, vel, -1, 0);
        movement::wrap_horizontally(pos, arena);
        rect = collision_rect(pos, body, None);
        steps += 1;
    }
    vel.x = -vel.x;
    steps
}

fn heads_up(world: &World, entity: Entity) -> bool {
    world
        .get::<&Projectile>(entity)
        .is_ok_and(|projectile| projectile.heading == Heading::Up)
}
