//! Events emitted by the simulation for audio and HUD feedback.

use serde::{Deserialize, Serialize};

/// Audio cues for the sound sink. Fire-and-forget; a repeated cue
/// restarts playback of that cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// An enemy was destroyed.
    Explosion,
    /// A projectile was created.
    Fired,
    /// The player lost a life.
    PlayerExplosion,
}

/// Score / lives display updates. Only emitted when a value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HudEvent {
    ScoreChanged { score: u32 },
    LivesChanged { lives: u32 },
    TotalScoreChanged { total: u32 },
}
