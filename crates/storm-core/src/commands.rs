//! Player commands sent from the input source to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    /// Left key pressed (`true`) or released (`false`).
    SetMoveLeft { held: bool },
    /// Right key pressed (`true`) or released (`false`).
    SetMoveRight { held: bool },

    // --- Firing ---
    /// Fire key press edge. Latches one volley.
    PressFire,
    /// Fire key released. Clears an unconsumed latch.
    ReleaseFire,

    // --- Session ---
    /// Discard the current game and start from scratch.
    NewGame,
}
