//! Score, lives and the deferred award-points flag.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use storm_core::constants::{INITIAL_LIVES, POINTS_PER_KILL};
use storm_core::events::HudEvent;
use storm_core::state::HudView;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    /// Score of the current life.
    pub score: u32,
    pub lives: u32,
    /// Sum of the scores of all finished lives.
    pub total_score: u32,
    /// Set by a kill during collision resolution, consumed by `settle_award`.
    pub award_points: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: INITIAL_LIVES,
            total_score: 0,
            award_points: false,
        }
    }
}

impl ScoreState {
    /// Request one award of points. Several requests before the next
    /// `settle_award` collapse into one.
    pub fn flag_award(&mut self) {
        self.award_points = true;
    }

    /// Credit a pending award, if any. Returns whether points were added.
    pub fn settle_award(&mut self, hud_events: &mut Vec<HudEvent>) -> bool {
        if !self.award_points {
            return false;
        }
        self.award_points = false;
        self.score += POINTS_PER_KILL;
        hud_events.push(HudEvent::ScoreChanged { score: self.score });
        true
    }

    /// Take a life and bank the current score. Returns the lives left.
    pub fn record_life_lost(&mut self, hud_events: &mut Vec<HudEvent>) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        hud_events.push(HudEvent::LivesChanged { lives: self.lives });

        if self.score > 0 {
            self.total_score += self.score;
            self.score = 0;
            hud_events.push(HudEvent::ScoreChanged { score: 0 });
            hud_events.push(HudEvent::TotalScoreChanged {
                total: self.total_score,
            });
        }

        self.lives
    }

    pub fn view(&self) -> HudView {
        HudView {
            score: self.score,
            lives: self.lives,
            total_score: self.total_score,
        }
    }
}
