//! Movement system.
//!
//! Advances every mover by its velocity, keeps the player inside its side
//! margins, wraps patrol fighters horizontally and schedules removal for
//! entities that leave the playfield or finish their wreck grace period.

use hecs::World;

use storm_core::components::{Body, Destruction, PlayerControl};
use storm_core::constants::{GRACE_TICKS, PLAYER_SIDE_MARGIN};
use storm_core::enums::EntityKind;
use storm_core::types::{Position, Velocity};

use crate::config::Arena;
use crate::systems::cleanup::PendingRemoval;

/// Run movement for all entities.
pub fn run(world: &mut World, arena: &Arena, tick: u64, pending: &mut PendingRemoval) {
    for (entity, (kind, pos, vel, body, destruction, control)) in world.query_mut::<(
        &EntityKind,
        &mut Position,
        &Velocity,
        &Body,
        Option<&Destruction>,
        Option<&PlayerControl>,
    )>() {
        match kind {
            EntityKind::Player => {
                if let Some(control) = control {
                    steer_player(pos, vel, body, control, arena);
                }
            }
            EntityKind::Obstacle => {
                step(pos, vel, 1, 1);
                if pos.y > arena.height {
                    pending.schedule(entity);
                }
            }
            EntityKind::Projectile => {
                step(pos, vel, 1, 1);
                if pos.y < 0.0 || pos.y > arena.height {
                    pending.schedule(entity);
                }
            }
            EntityKind::PatrolFighter => {
                if grace_elapsed(destruction, tick) {
                    pending.schedule(entity);
                }
                step(pos, vel, 1, 1);
                if pos.y > arena.height {
                    pending.schedule(entity);
                }
                wrap_horizontally(pos, arena);
            }
            EntityKind::Saucer => {
                if grace_elapsed(destruction, tick) {
                    pending.schedule(entity);
                }
                step(pos, vel, 1, 1);
                if pos.x > arena.width {
                    pending.schedule(entity);
                }
            }
        }
    }
}

/// Advance `pos` by `vel`, each axis scaled by a direction multiplier.
pub fn step(pos: &mut Position, vel: &Velocity, scale_x: i32, scale_y: i32) {
    pos.x += f64::from(scale_x * vel.x);
    pos.y += f64::from(scale_y * vel.y);
}

/// Leaving one side re-enters from the other.
pub fn wrap_horizontally(pos: &mut Position, arena: &Arena) {
    if pos.x > arena.width {
        pos.x = 0.0;
    } else if pos.x < 0.0 {
        pos.x = arena.width;
    }
}

/// Whether a destroyed entity has lingered for its full grace period.
pub fn grace_elapsed(destruction: Option<&Destruction>, tick: u64) -> bool {
    destruction
        .and_then(|d| d.destroyed_at)
        .is_some_and(|at| tick >= at + GRACE_TICKS)
}

/// Player moves one step per held direction while inside the side margins.
fn steer_player(
    pos: &mut Position,
    vel: &Velocity,
    body: &Body,
    control: &PlayerControl,
    arena: &Arena,
) {
    let speed = f64::from(vel.x.abs());
    if control.move_left && pos.x > PLAYER_SIDE_MARGIN {
        pos.x -= speed;
    }
    if control.move_right && pos.x + body.width < arena.width - PLAYER_SIDE_MARGIN {
        pos.x += speed;
    }
}
