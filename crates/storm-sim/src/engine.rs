//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no window or audio dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use storm_core::commands::PlayerCommand;
use storm_core::components::PlayerControl;
use storm_core::enums::GamePhase;
use storm_core::events::{AudioEvent, HudEvent};
use storm_core::state::GameStateSnapshot;
use storm_core::types::SimTime;

use crate::config::{ConfigError, SimConfig};
use crate::score::ScoreState;
use crate::systems;
use crate::systems::cleanup::PendingRemoval;
use crate::systems::hitbox::HitboxTable;
use crate::systems::spawner::SpawnerState;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    player: Option<Entity>,
    spawner: SpawnerState,
    score: ScoreState,
    command_queue: VecDeque<PlayerCommand>,

    // Per-tick scratch, empty between ticks.
    hitboxes: HitboxTable,
    pending: PendingRemoval,

    // Drained into the next snapshot.
    removed: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    hud_events: Vec<HudEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The initial
    /// player is spawned immediately.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, &config.arena);

        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            player: Some(player),
            spawner: SpawnerState::default(),
            score: ScoreState::default(),
            command_queue: VecDeque::new(),
            hitboxes: HitboxTable::default(),
            pending: PendingRemoval::default(),
            removed: Vec::new(),
            audio_events: Vec::new(),
            hud_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let hud_events = std::mem::take(&mut self.hud_events);
        let removed = std::mem::take(&mut self.removed);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.score,
            audio_events,
            hud_events,
            &removed,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the configuration the engine was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The current player ship, if the game is still running.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Mutable world access for building test fixtures.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn set_lives(&mut self, lives: u32) {
        self.score.lives = lives;
    }

    #[cfg(test)]
    pub fn set_score(&mut self, score: u32) {
        self.score.score = score;
    }

    #[cfg(test)]
    pub fn spawner_state(&self) -> SpawnerState {
        self.spawner
    }

    #[cfg(test)]
    pub fn set_spawner_state(&mut self, state: SpawnerState) {
        self.spawner = state;
    }

    #[cfg(test)]
    pub fn pending_removal_len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn hitbox_count(&self) -> usize {
        self.hitboxes.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if command == PlayerCommand::NewGame {
            self.new_game();
            return;
        }
        if self.phase == GamePhase::Ended {
            return;
        }

        let Some(control) = self
            .player
            .and_then(|player| self.world.query_one_mut::<&mut PlayerControl>(player).ok())
        else {
            return;
        };

        match command {
            PlayerCommand::SetMoveLeft { held } => control.move_left = held,
            PlayerCommand::SetMoveRight { held } => control.move_right = held,
            PlayerCommand::PressFire => control.fire_latched = true,
            PlayerCommand::ReleaseFire => control.fire_latched = false,
            PlayerCommand::NewGame => {}
        }
    }

    /// Rebuild every piece of state from the config. Commands queued behind
    /// the `NewGame` still apply to the new game.
    fn new_game(&mut self) {
        let queue = std::mem::take(&mut self.command_queue);
        let stale: Vec<Entity> = self.world.iter().map(|entity| entity.entity()).collect();

        *self = Self::build(self.config.clone());
        self.command_queue = queue;
        self.removed = stale;
        self.hud_events.extend([
            HudEvent::ScoreChanged { score: 0 },
            HudEvent::LivesChanged {
                lives: self.score.lives,
            },
            HudEvent::TotalScoreChanged { total: 0 },
        ]);
        info!("new game (seed {})", self.config.seed);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Clock
        self.time.advance();
        let tick = self.time.tick;
        let arena = self.config.arena;

        // 2. Movement (and off-screen / grace-period removal requests)
        systems::movement::run(&mut self.world, &arena, tick, &mut self.pending);
        // 3. Firing
        let fired = systems::firing::run(&mut self.world, self.player, tick, &mut self.audio_events);
        // 4. Hitbox table
        self.hitboxes.rebuild(&self.world);
        // 5. Player projectiles vs. everything
        let hits = systems::collision::resolve_projectile_hits(
            &mut self.world,
            &self.hitboxes,
            tick,
            &mut self.pending,
            &mut self.audio_events,
            &mut self.score,
            &mut self.hud_events,
        );
        if hits.player_destroyed {
            self.lose_life();
        }
        // 6. Reactive entities
        let reactions = systems::collision::resolve_reactions(
            &mut self.world,
            &self.hitboxes,
            &arena,
            &self.pending,
        );
        if reactions.player_destroyed {
            self.lose_life();
        }
        // 7. Spawner (reads the clock again: a life loss resets it)
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            &arena,
            self.time.tick,
            self.score.score,
        );

        trace!(
            "tick {}: {} fired, {} hitboxes, {} pending removal",
            tick,
            fired.len(),
            self.hitboxes.len(),
            self.pending.len()
        );

        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.pending, &mut self.removed);
        self.hitboxes.clear();
    }

    /// Player destroyed: clear the field, reset the clocks and either respawn
    /// the player or end the game.
    fn lose_life(&mut self) {
        self.audio_events.push(AudioEvent::PlayerExplosion);

        for entity in self.world.iter().map(|entity| entity.entity()) {
            self.pending.schedule(entity);
        }
        self.time.reset();
        self.spawner.reset();

        let lives = self.score.record_life_lost(&mut self.hud_events);
        if lives > 0 {
            info!("player lost a life, {} remaining", lives);
            self.player = Some(world_setup::spawn_player(
                &mut self.world,
                &self.config.arena,
            ));
        } else {
            info!("game over, total score {}", self.score.total_score);
            self.player = None;
            self.phase = GamePhase::Ended;
        }
    }
}
