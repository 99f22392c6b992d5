//! Input sources: whatever turns key state into player commands.
//!
//! Without a window there is no keyboard, so the driver plays itself with a
//! scripted pilot that produces the same edge-triggered intents a player
//! would: hold a direction, tap fire, release.

use storm_core::commands::PlayerCommand;
use storm_core::enums::{DestroyState, EntityKind, GamePhase};
use storm_core::state::{EntityView, GameStateSnapshot};

/// Produces the commands to apply before the next tick.
pub trait InputSource {
    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Feeds nothing. The player just sits there.
#[derive(Debug, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn next_commands(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

/// Steers under the closest live enemy and taps fire every few ticks.
#[derive(Debug)]
pub struct Autopilot {
    /// Ticks between fire presses.
    fire_interval: u64,
    /// Horizontal slack before the pilot bothers to move.
    dead_zone: f64,
    frame: u64,
    /// Ship the held flags below refer to.
    player_id: Option<u64>,
    fire_held: bool,
    left_held: bool,
    right_held: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(4, 12.0)
    }
}

impl Autopilot {
    pub fn new(fire_interval: u64, dead_zone: f64) -> Self {
        Self {
            fire_interval: fire_interval.max(2),
            dead_zone,
            frame: 0,
            player_id: None,
            fire_held: false,
            left_held: false,
            right_held: false,
        }
    }

    fn steer(&mut self, player: &EntityView, target: Option<&EntityView>, out: &mut Vec<PlayerCommand>) {
        let player_mid = player.position.x + player.width / 2.0;
        let (want_left, want_right) = match target {
            Some(target) => {
                let offset = target.position.x + target.width / 2.0 - player_mid;
                (offset < -self.dead_zone, offset > self.dead_zone)
            }
            None => (false, false),
        };

        if want_left != self.left_held {
            self.left_held = want_left;
            out.push(PlayerCommand::SetMoveLeft { held: want_left });
        }
        if want_right != self.right_held {
            self.right_held = want_right;
            out.push(PlayerCommand::SetMoveRight { held: want_right });
        }
    }
}

impl InputSource for Autopilot {
    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        self.frame += 1;

        if snapshot.phase == GamePhase::Ended {
            return commands;
        }
        let Some(player) = snapshot
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Player)
        else {
            return commands;
        };

        // A respawned ship starts with no intents held.
        if self.player_id != Some(player.id) {
            self.player_id = Some(player.id);
            self.fire_held = false;
            self.left_held = false;
            self.right_held = false;
        }

        self.steer(player, nearest_enemy(snapshot, player), &mut commands);

        // Press on one frame, release on the next: one volley per press.
        if self.fire_held {
            self.fire_held = false;
            commands.push(PlayerCommand::ReleaseFire);
        } else if self.frame % self.fire_interval == 0 {
            self.fire_held = true;
            commands.push(PlayerCommand::PressFire);
        }

        commands
    }
}

/// Closest live enemy above the player, by horizontal distance.
fn nearest_enemy<'a>(snapshot: &'a GameStateSnapshot, player: &EntityView) -> Option<&'a EntityView> {
    let player_mid = player.position.x + player.width / 2.0;
    snapshot
        .entities
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::PatrolFighter | EntityKind::Saucer))
        .filter(|e| e.state == DestroyState::Alive && e.position.y < player.position.y)
        .min_by(|a, b| {
            let da = (a.position.x + a.width / 2.0 - player_mid).abs();
            let db = (b.position.x + b.width / 2.0 - player_mid).abs();
            da.total_cmp(&db)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_core::types::Position;

    fn entity(kind: EntityKind, x: f64, y: f64) -> EntityView {
        EntityView {
            id: x as u64 + 1,
            kind,
            state: DestroyState::Alive,
            position: Position::new(x, y),
            width: 40.0,
            height: 20.0,
        }
    }

    fn snapshot(entities: Vec<EntityView>) -> GameStateSnapshot {
        GameStateSnapshot {
            entities,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_is_pressed_then_released() {
        let mut pilot = Autopilot::new(2, 10.0);
        let snap = snapshot(vec![entity(EntityKind::Player, 300.0, 540.0)]);

        assert!(pilot.next_commands(&snap).is_empty());
        assert_eq!(pilot.next_commands(&snap), vec![PlayerCommand::PressFire]);
        assert_eq!(pilot.next_commands(&snap), vec![PlayerCommand::ReleaseFire]);
        assert_eq!(pilot.next_commands(&snap), vec![PlayerCommand::PressFire]);
    }

    #[test]
    fn test_steers_toward_enemy_and_stops() {
        let mut pilot = Autopilot::new(1_000, 10.0);
        let left_target = snapshot(vec![
            entity(EntityKind::Player, 300.0, 540.0),
            entity(EntityKind::Saucer, 100.0, 25.0),
            entity(EntityKind::Obstacle, 290.0, 100.0),
        ]);
        assert_eq!(
            pilot.next_commands(&left_target),
            vec![PlayerCommand::SetMoveLeft { held: true }]
        );
        // Still holding: no repeated command.
        assert!(pilot.next_commands(&left_target).is_empty());

        let aligned = snapshot(vec![
            entity(EntityKind::Player, 300.0, 540.0),
            entity(EntityKind::PatrolFighter, 305.0, 25.0),
        ]);
        assert_eq!(
            pilot.next_commands(&aligned),
            vec![PlayerCommand::SetMoveLeft { held: false }]
        );
    }

    #[test]
    fn test_held_direction_resent_to_new_ship() {
        let mut pilot = Autopilot::new(1_000, 10.0);
        let before = snapshot(vec![
            entity(EntityKind::Player, 300.0, 540.0),
            entity(EntityKind::Saucer, 100.0, 25.0),
        ]);
        assert_eq!(
            pilot.next_commands(&before),
            vec![PlayerCommand::SetMoveLeft { held: true }]
        );

        // Life lost: a new ship with a new id and a clean control state.
        let after = snapshot(vec![
            entity(EntityKind::Player, 376.0, 540.0),
            entity(EntityKind::Saucer, 100.0, 25.0),
        ]);
        assert_eq!(
            pilot.next_commands(&after),
            vec![PlayerCommand::SetMoveLeft { held: true }]
        );
        assert!(pilot.next_commands(&after).is_empty());
    }

    #[test]
    fn test_ended_game_sends_nothing() {
        let mut pilot = Autopilot::new(2, 10.0);
        let snap = GameStateSnapshot {
            phase: GamePhase::Ended,
            ..Default::default()
        };
        for _ in 0..5 {
            assert!(pilot.next_commands(&snap).is_empty());
        }
    }
}
