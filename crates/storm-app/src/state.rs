//! State shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use storm_core::commands::PlayerCommand;
use storm_core::enums::GamePhase;
use storm_core::state::{GameStateSnapshot, HudView};

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop thread after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// How a game loop run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Ticks executed by the loop (not the simulation clock, which resets
    /// on every life loss).
    pub ticks: u64,
    pub phase: GamePhase,
    pub hud: HudView,
}

/// Handle to a running game loop thread.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: JoinHandle<LoopSummary>,
}

impl LoopHandle {
    /// Forward a player command. Returns false if the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Ask the loop to stop after the current tick.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::PressFire))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetMoveLeft {
            held: true,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<GameLoopCommand> = rx.try_iter().collect();

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::PressFire)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::SetMoveLeft { held: true })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }
}
