use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use super::Difficulty;

/// Itemised final score, as shown on the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub mistake_penalty: f64,
    pub time_penalty: f64,
    pub final_score: f64,
    /// The score sits at the -100 floor.
    pub floored: bool,
}

#[readonly::make]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub playthrough_id: Uuid,
    pub game: String,
    pub difficulty: Difficulty,
    pub breakdown: ScoreBreakdown,
    pub mistakes: u32,
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn new(
        playthrough_id: Uuid,
        game: &str,
        difficulty: Difficulty,
        breakdown: ScoreBreakdown,
        mistakes: u32,
        elapsed: Duration,
    ) -> Self {
        Self {
            playthrough_id,
            game: game.to_string(),
            difficulty,
            breakdown,
            mistakes,
            elapsed,
            completed_at: Utc::now(),
        }
    }

    pub fn final_score(&self) -> f64 {
        self.breakdown.final_score
    }
}
