//! Simulation configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use storm_core::constants::*;

/// Playfield dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Arena {
    /// Row the player ship sits on.
    pub fn player_row(&self) -> f64 {
        self.height - PLAYER_ROW_OFFSET
    }

    /// Horizontal spawn range for enemies, `[low, high)`.
    pub fn spawn_columns(&self) -> (i32, i32) {
        (
            SPAWN_SIDE_MARGIN.round() as i32,
            (self.width - SPAWN_SIDE_MARGIN).round() as i32,
        )
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same game.
    pub seed: u64,
    pub arena: Arena,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
        }
    }
}

impl SimConfig {
    /// Reject arenas the simulation cannot run in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena { width, height } = self.arena;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::NonFiniteArena);
        }

        let min_width = (2.0 * PLAYER_SIDE_MARGIN + PLAYER_SIZE.0)
            .max(2.0 * SPAWN_SIDE_MARGIN + 1.0);
        if width < min_width {
            return Err(ConfigError::ArenaTooNarrow {
                width,
                min: min_width,
            });
        }

        let min_height = ARENA_TOP + PLAYER_ROW_OFFSET;
        if height <= min_height {
            return Err(ConfigError::ArenaTooShort {
                height,
                min: min_height,
            });
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFiniteArena,
    ArenaTooNarrow { width: f64, min: f64 },
    ArenaTooShort { height: f64, min: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFiniteArena => write!(f, "Arena dimensions must be finite"),
            ConfigError::ArenaTooNarrow { width, min } => {
                write!(f, "Arena too narrow: {} (min: {})", width, min)
            }
            ConfigError::ArenaTooShort { height, min } => {
                write!(f, "Arena too short: {} (must exceed {})", height, min)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_narrow_arena_rejected() {
        let config = SimConfig {
            arena: Arena {
                width: 100.0,
                height: 600.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArenaTooNarrow { .. })
        ));
    }

    #[test]
    fn test_short_arena_rejected() {
        let config = SimConfig {
            arena: Arena {
                width: 800.0,
                height: 85.0,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Arena too short: 85 (must exceed 85)");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.arena, Arena::default());
    }

    #[test]
    fn test_spawn_columns() {
        assert_eq!(Arena::default().spawn_columns(), (20, 780));
        assert_eq!(Arena::default().player_row(), 540.0);
    }
}
