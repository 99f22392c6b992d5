//! Firing system: every firing-capable entity whose cooldown has expired
//! and whose kind-specific conditions hold spawns its projectiles.

use hecs::{Entity, World};

use storm_core::components::{Body, FireControl, PlayerControl};
use storm_core::constants::PROJECTILE_SIZE;
use storm_core::enums::{EntityKind, Heading};
use storm_core::events::AudioEvent;
use storm_core::types::Position;

use crate::world_setup;

/// A projectile to be spawned once the firing query is released.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Shot {
    x: f64,
    origin_y: f64,
    heading: Heading,
}

/// Run the firing system. Returns the projectiles created this tick.
pub fn run(
    world: &mut World,
    player: Option<Entity>,
    tick: u64,
    audio_events: &mut Vec<AudioEvent>,
) -> Vec<Entity> {
    let target = player_span(world, player);
    let mut shots: Vec<Shot> = Vec::new();

    for (_entity, (kind, pos, body, fire, control)) in world.query_mut::<(
        &EntityKind,
        &Position,
        &Body,
        &mut FireControl,
        Option<&mut PlayerControl>,
    )>() {
        // Wrecks keep their fire control until removed.
        if tick <= fire.last_fired + fire.cooldown {
            continue;
        }

        let midpoint = pos.x + body.width / 2.0;
        let bottom = pos.y + body.height;

        let fired = match kind {
            EntityKind::Player => match control {
                Some(control) if control.fire_latched => {
                    shots.push(Shot {
                        x: pos.x,
                        origin_y: pos.y,
                        heading: Heading::Up,
                    });
                    shots.push(Shot {
                        x: pos.x + body.width - PROJECTILE_SIZE.0,
                        origin_y: pos.y,
                        heading: Heading::Up,
                    });
                    control.fire_latched = false;
                    true
                }
                _ => false,
            },
            EntityKind::PatrolFighter => {
                let above_player =
                    target.is_some_and(|(left, right)| left < midpoint && midpoint < right);
                if above_player {
                    shots.push(Shot {
                        x: midpoint,
                        origin_y: bottom,
                        heading: Heading::Down,
                    });
                }
                above_player
            }
            EntityKind::Saucer => {
                shots.push(Shot {
                    x: midpoint,
                    origin_y: bottom,
                    heading: Heading::Down,
                });
                true
            }
            EntityKind::Obstacle | EntityKind::Projectile => false,
        };

        if fired {
            fire.last_fired = tick;
        }
    }

    shots
        .into_iter()
        .map(|shot| {
            audio_events.push(AudioEvent::Fired);
            world_setup::spawn_projectile(world, shot.x, shot.origin_y, shot.heading)
        })
        .collect()
}

/// Horizontal extent of the player's sprite, if there is a player.
fn player_span(world: &World, player: Option<Entity>) -> Option<(f64, f64)> {
    let player = player?;
    let pos = world.get::<&Position>(player).ok()?;
    let body = world.get::<&Body>(player).ok()?;
    Some((pos.x, pos.x + body.width))
}
