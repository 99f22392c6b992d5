//! Entity spawn factories.
//!
//! Each kind gets its component bundle here; systems never assemble
//! bundles themselves.

use hecs::{Entity, World};
use log::debug;

use storm_core::components::*;
use storm_core::constants::*;
use storm_core::enums::*;
use storm_core::types::{Position, Velocity};

use crate::config::Arena;

/// Spawn the player centred on its row.
pub fn spawn_player(world: &mut World, arena: &Arena) -> Entity {
    let (width, height) = PLAYER_SIZE;
    let (left, top, right, bottom) = PLAYER_HITBOX_INSET;
    let position = Position::new((arena.width - width) / 2.0, arena.player_row());

    let entity = world.spawn((
        EntityKind::Player,
        position,
        Velocity::new(PLAYER_SPEED, 0),
        Body { width, height },
        HitboxInset {
            left,
            top,
            right,
            bottom,
        },
        FireControl {
            cooldown: PLAYER_FIRE_COOLDOWN,
            last_fired: 0,
        },
        Reactive,
        PlayerControl::default(),
    ));
    debug!("spawned player {:?} at ({}, {})", entity, position.x, position.y);
    entity
}

/// Spawn a falling obstacle.
pub fn spawn_obstacle(world: &mut World, x: f64, y: f64) -> Entity {
    let (width, height) = OBSTACLE_SIZE;
    let entity = world.spawn((
        EntityKind::Obstacle,
        Position::new(x, y),
        Velocity::new(0, OBSTACLE_SPEED),
        Body { width, height },
    ));
    debug!("spawned obstacle {:?} at ({}, {})", entity, x, y);
    entity
}

/// Spawn a patrol fighter. `direction` is +1 (rightward) or -1 (leftward).
pub fn spawn_patrol_fighter(world: &mut World, x: f64, y: f64, direction: i32) -> Entity {
    let (width, height) = PATROL_FIGHTER_SIZE;
    let entity = world.spawn((
        EntityKind::PatrolFighter,
        Position::new(x, y),
        Velocity::new(PATROL_FIGHTER_SPEED * direction.signum(), PATROL_FIGHTER_SPEED),
        Body { width, height },
        FireControl {
            cooldown: PATROL_FIGHTER_FIRE_COOLDOWN,
            last_fired: 0,
        },
        Destruction::default(),
        Reactive,
    ));
    debug!(
        "spawned patrol fighter {:?} at ({}, {}) heading {}",
        entity, x, y, direction
    );
    entity
}

/// Spawn a saucer crossing left to right.
pub fn spawn_saucer(world: &mut World, x: f64, y: f64) -> Entity {
    let (width, height) = SAUCER_SIZE;
    let entity = world.spawn((
        EntityKind::Saucer,
        Position::new(x, y),
        Velocity::new(SAUCER_SPEED, 0),
        Body { width, height },
        FireControl {
            cooldown: SAUCER_FIRE_COOLDOWN,
            last_fired: 0,
        },
        Destruction::default(),
    ));
    debug!("spawned saucer {:?} at ({}, {})", entity, x, y);
    entity
}

/// Spawn a projectile. `origin_y` is the firer's edge the shot leaves from;
/// the projectile is offset past that edge so it never overlaps its firer.
pub fn spawn_projectile(world: &mut World, x: f64, origin_y: f64, heading: Heading) -> Entity {
    let (width, height) = PROJECTILE_SIZE;
    let sign = heading.sign();
    let y = origin_y + f64::from(sign) * (height + PROJECTILE_SPAWN_GAP);

    world.spawn((
        EntityKind::Projectile,
        Position::new(x, y),
        Velocity::new(0, PROJECTILE_SPEED * sign),
        Body { width, height },
        Projectile { heading },
    ))
}
