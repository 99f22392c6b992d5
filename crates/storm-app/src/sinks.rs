//! Snapshot consumers: presentation, audio and HUD.
//!
//! The headless build has no window or mixer, so `LogSink` keeps the
//! bookkeeping a real front end would need (sprite per entity, in-flight
//! cues, displayed values) and reports changes through `log`.

use std::collections::HashMap;

use log::{debug, info};

use storm_core::enums::{DestroyState, EntityKind};
use storm_core::events::{AudioEvent, HudEvent};
use storm_core::state::{GameStateSnapshot, HudView};

/// Receives every snapshot the game loop produces.
pub trait FrameSink {
    fn present(&mut self, snapshot: &GameStateSnapshot);
}

/// Texture used for an entity in a given destruction state.
pub fn sprite_for(kind: EntityKind, state: DestroyState) -> &'static str {
    match (kind, state) {
        (EntityKind::Obstacle, _) => "Asteroid.png",
        (EntityKind::Projectile, _) => "bullet",
        (EntityKind::PatrolFighter, DestroyState::Alive) => "TieFighter.png",
        (EntityKind::PatrolFighter, DestroyState::Destroyed) => "TieFighterDestroy.png",
        (EntityKind::Saucer, DestroyState::Alive) => "Saucer.png",
        (EntityKind::Saucer, DestroyState::Destroyed) => "SaucerDestroy.png",
        (EntityKind::Player, _) => "Player.png",
    }
}

/// Sound file played for a cue.
pub fn sound_for(cue: AudioEvent) -> &'static str {
    match cue {
        AudioEvent::Explosion => "Explosion.wav",
        AudioEvent::Fired => "BulletSound.wav",
        AudioEvent::PlayerExplosion => "PlayerExplosion.wav",
    }
}

/// Ticks a cue keeps playing once started.
fn cue_length(cue: AudioEvent) -> u64 {
    match cue {
        AudioEvent::Fired => 4,
        AudioEvent::Explosion => 12,
        AudioEvent::PlayerExplosion => 25,
    }
}

/// Headless sink that tracks what a front end would display and logs it.
#[derive(Debug, Default)]
pub struct LogSink {
    /// Current texture of every live entity, keyed by entity id.
    sprites: HashMap<u64, &'static str>,
    /// Frame at which each cue last (re)started.
    playing: HashMap<AudioEvent, u64>,
    hud: HudView,
    frame: u64,
    /// Number of times a cue interrupted its own playback.
    pub restarts: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn sprite(&self, id: u64) -> Option<&'static str> {
        self.sprites.get(&id).copied()
    }

    pub fn hud(&self) -> HudView {
        self.hud
    }

    fn update_sprites(&mut self, snapshot: &GameStateSnapshot) {
        for id in &snapshot.removed {
            if self.sprites.remove(id).is_some() {
                debug!("sprite {} dropped", id);
            }
        }

        for entity in &snapshot.entities {
            let texture = sprite_for(entity.kind, entity.state);
            let previous = self.sprites.insert(entity.id, texture);
            if previous != Some(texture) {
                debug!(
                    "sprite {} -> {} at ({:.0}, {:.0})",
                    entity.id, texture, entity.position.x, entity.position.y
                );
            }
        }
    }

    fn play(&mut self, cue: AudioEvent) {
        let in_flight = self
            .playing
            .get(&cue)
            .is_some_and(|started| self.frame < started + cue_length(cue));
        if in_flight {
            self.restarts += 1;
            debug!("audio: restart {}", sound_for(cue));
        } else {
            debug!("audio: play {}", sound_for(cue));
        }
        self.playing.insert(cue, self.frame);
    }

    fn apply_hud(&mut self, event: HudEvent) {
        match event {
            HudEvent::ScoreChanged { score } => self.hud.score = score,
            HudEvent::LivesChanged { lives } => self.hud.lives = lives,
            HudEvent::TotalScoreChanged { total } => self.hud.total_score = total,
        }
        info!(
            "score {} | lives {} | total {}",
            self.hud.score, self.hud.lives, self.hud.total_score
        );
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        self.frame += 1;
        if self.frame == 1 {
            self.hud = snapshot.hud;
        }

        self.update_sprites(snapshot);
        for cue in &snapshot.audio_events {
            self.play(*cue);
        }
        for event in &snapshot.hud_events {
            self.apply_hud(*event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_core::state::EntityView;
    use storm_core::types::Position;

    fn view(id: u64, kind: EntityKind, state: DestroyState) -> EntityView {
        EntityView {
            id,
            kind,
            state,
            position: Position::new(0.0, 0.0),
            width: 10.0,
            height: 10.0,
        }
    }

    #[test]
    fn test_destroyed_enemies_swap_texture() {
        let mut sink = LogSink::new();
        sink.present(&GameStateSnapshot {
            entities: vec![view(7, EntityKind::Saucer, DestroyState::Alive)],
            ..Default::default()
        });
        assert_eq!(sink.sprite(7), Some("Saucer.png"));

        sink.present(&GameStateSnapshot {
            entities: vec![view(7, EntityKind::Saucer, DestroyState::Destroyed)],
            ..Default::default()
        });
        assert_eq!(sink.sprite(7), Some("SaucerDestroy.png"));

        sink.present(&GameStateSnapshot {
            removed: vec![7],
            ..Default::default()
        });
        assert_eq!(sink.sprite_count(), 0);
    }

    #[test]
    fn test_retriggered_cue_restarts() {
        let mut sink = LogSink::new();
        let fired = GameStateSnapshot {
            audio_events: vec![AudioEvent::Fired, AudioEvent::Fired],
            ..Default::default()
        };
        sink.present(&fired);
        assert_eq!(sink.restarts, 1);

        // Long after the cue finished, a new trigger is a plain start.
        for _ in 0..10 {
            sink.present(&GameStateSnapshot::default());
        }
        sink.present(&fired);
        assert_eq!(sink.restarts, 2);
    }

    #[test]
    fn test_hud_tracks_events() {
        let mut sink = LogSink::new();
        sink.present(&GameStateSnapshot {
            hud_events: vec![
                HudEvent::ScoreChanged { score: 20 },
                HudEvent::LivesChanged { lives: 1 },
            ],
            ..Default::default()
        });
        assert_eq!(sink.hud().score, 20);
        assert_eq!(sink.hud().lives, 1);
    }
}
