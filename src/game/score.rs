//=========================================================================
// Score & High Score
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::store::KeyValueStore;

/// Store key of the persisted high score.
pub const HIGH_SCORE_KEY: &str = "topScore";

//=== Scoreboard ==========================================================

/// Points for the running session. Only ever goes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    score: u64,
    ping_every: u64,
}

impl Scoreboard {
    pub fn new(ping_every: u64) -> Self {
        Self { score: 0, ping_every }
    }

    /// Adds one point. The flag is set when the new score is a milestone.
    pub fn tick(&mut self) -> (u64, bool) {
        self.score += 1;
        let milestone = self.ping_every > 0 && self.score % self.ping_every == 0;
        (self.score, milestone)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Label text for `score`. The session opens on "SCORE:0".
    pub fn label(score: u64) -> String {
        format!("SCORE: {}", score)
    }
}

//=== HighScore ===========================================================

pub struct HighScore;

impl HighScore {
    /// Reads the stored high score. Missing or unreadable reads as 0.
    pub fn load(store: &dyn KeyValueStore) -> u64 {
        match store.load(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!(target: "game::score", "Could not read high score: {}", e);
                0
            }
        }
    }

    /// Persists max(stored, `score`) and returns it. A failed write is
    /// logged and play carries on.
    pub fn record(store: &mut dyn KeyValueStore, score: u64) -> u64 {
        let best = Self::load(store).max(score);
        match store.save(HIGH_SCORE_KEY, best) {
            Ok(()) => info!(target: "game::score", "Final score {}, high score {}", score, best),
            Err(e) => warn!(target: "game::score", "Could not save high score: {}", e),
        }
        best
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
