//! Game loop thread: runs the simulation engine on a fixed period and
//! hands every snapshot to the sink.
//!
//! The engine is moved into the thread and owned there; exactly one tick
//! runs at a time. Commands arrive via `mpsc` channel. Snapshots go to the
//! sink and are stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{info, trace};

use storm_core::constants::TICK_PERIOD_MS;
use storm_core::enums::GamePhase;
use storm_core::state::GameStateSnapshot;
use storm_sim::SimulationEngine;

use crate::autopilot::InputSource;
use crate::sinks::FrameSink;
use crate::state::{GameLoopCommand, LoopHandle, LoopSummary, SharedSnapshot};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Pacing and stopping rules for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    pub tick_duration: Duration,
    /// Stop after this many ticks even if the game is still running.
    pub max_ticks: Option<u64>,
    /// Sleep to hold the tick period; otherwise run flat out.
    pub realtime: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_duration: TICK_DURATION,
            max_ticks: None,
            realtime: true,
        }
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop<S, I>(
    engine: SimulationEngine,
    settings: LoopSettings,
    sink: S,
    input: I,
) -> io::Result<LoopHandle>
where
    S: FrameSink + Send + 'static,
    I: InputSource + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("storm-game-loop".into())
        .spawn(move || {
            let mut sink = sink;
            let mut input = input;
            run_game_loop(engine, settings, &cmd_rx, &mut sink, &mut input, &shared)
        })?;

    Ok(LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until the game ends, the tick limit is reached, or a
/// Shutdown command arrives (or the channel disconnects).
pub fn run_game_loop(
    mut engine: SimulationEngine,
    settings: LoopSettings,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    sink: &mut dyn FrameSink,
    input: &mut dyn InputSource,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopSummary {
    let mut ticks = 0u64;
    let mut last = GameStateSnapshot::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop shut down after {} ticks", ticks);
                    return summary(ticks, &last);
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Input source sets the player's intents
        engine.queue_commands(input.next_commands(&last));

        // 3. Advance one tick
        let snapshot = engine.tick();
        ticks += 1;
        trace!(
            "frame {}: {} entities, {} removed",
            ticks,
            snapshot.entities.len(),
            snapshot.removed.len()
        );

        // 4. Hand the snapshot to the sink
        sink.present(&snapshot);

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = snapshot;

        if last.phase == GamePhase::Ended {
            info!("game over after {} ticks", ticks);
            return summary(ticks, &last);
        }
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            info!("tick limit {} reached", ticks);
            return summary(ticks, &last);
        }

        // 6. Sleep until next tick
        if settings.realtime {
            next_tick_time += settings.tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > settings.tick_duration * 2 {
                // Too far behind: reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

fn summary(ticks: u64, last: &GameStateSnapshot) -> LoopSummary {
    LoopSummary {
        ticks,
        phase: last.phase,
        hud: last.hud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_core::commands::PlayerCommand;
    use storm_sim::SimConfig;

    use crate::autopilot::{Autopilot, Idle};
    use crate::sinks::LogSink;

    fn fast(max_ticks: u64) -> LoopSettings {
        LoopSettings {
            max_ticks: Some(max_ticks),
            realtime: false,
            ..Default::default()
        }
    }

    /// Counts frames and remembers the last one.
    #[derive(Default)]
    struct Recorder {
        frames: u64,
        last: Option<GameStateSnapshot>,
    }

    impl FrameSink for Recorder {
        fn present(&mut self, snapshot: &GameStateSnapshot) {
            self.frames += 1;
            self.last = Some(snapshot.clone());
        }
    }

    #[test]
    fn test_tick_duration_constant() {
        assert_eq!(TICK_DURATION.as_millis(), 40);
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let (_tx, rx) = mpsc::channel();
        let mut sink = Recorder::default();
        let latest = Mutex::new(None);

        let summary = run_game_loop(engine, fast(25), &rx, &mut sink, &mut Idle, &latest);

        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.phase, GamePhase::Playing);
        assert_eq!(sink.frames, 25);
        let stored = latest.lock().unwrap().clone().unwrap();
        assert_eq!(stored.time.tick, 25);
    }

    #[test]
    fn test_shutdown_before_first_tick() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let mut sink = Recorder::default();

        let summary = run_game_loop(engine, fast(100), &rx, &mut sink, &mut Idle, &Mutex::new(None));

        assert_eq!(summary.ticks, 0);
        assert_eq!(sink.frames, 0);
    }

    #[test]
    fn test_forwarded_commands_reach_engine() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetMoveRight {
            held: true,
        }))
        .unwrap();
        let mut sink = Recorder::default();

        run_game_loop(engine, fast(3), &rx, &mut sink, &mut Idle, &Mutex::new(None));

        let last = sink.last.unwrap();
        let player = last
            .entities
            .iter()
            .find(|e| e.kind == storm_core::enums::EntityKind::Player)
            .unwrap();
        assert_eq!(player.position.x, 376.0 + 3.0 * 20.0);
    }

    #[test]
    fn test_threaded_loop_runs_to_completion() {
        let engine = SimulationEngine::new(SimConfig {
            seed: 99,
            ..Default::default()
        })
        .unwrap();

        let handle = spawn_game_loop(engine, fast(500), LogSink::new(), Autopilot::default()).unwrap();
        let latest = Arc::clone(&handle.latest_snapshot);
        let summary = handle.thread.join().unwrap();

        assert!(summary.ticks > 0 && summary.ticks <= 500);
        assert!(summary.phase == GamePhase::Ended || summary.ticks == 500);
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        for _ in 0..200 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
