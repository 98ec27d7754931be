//! Score and win tracking
//!
//! Score never drops below zero. The win flip happens once; after that the
//! score is frozen.

use super::state::{ItemKind, ScoreState};

/// What a catch did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub score: u32,
    /// This catch reached the target
    pub finished: bool,
}

impl ScoreState {
    /// Apply one caught item. `None` once play has stopped.
    pub fn apply_catch(&mut self, kind: ItemKind) -> Option<ScoreChange> {
        if !self.playing {
            return None;
        }

        let finished = match kind {
            ItemKind::Beneficial => {
                self.score += 1;
                self.check_win()
            }
            ItemKind::Penalty => {
                self.score = self.score.saturating_sub(1);
                false
            }
        };

        Some(ScoreChange {
            score: self.score,
            finished,
        })
    }

    /// Flip `playing` off the first time the target is reached
    fn check_win(&mut self) -> bool {
        if self.playing && self.score >= self.target {
            self.playing = false;
            return true;
        }
        false
    }

    /// HUD text, e.g. `"12 / 25"`
    pub fn hud_text(&self) -> String {
        format!("{} / {}", self.score, self.target)
    }
}
