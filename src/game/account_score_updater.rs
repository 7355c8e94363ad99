use log::{debug, info};

use super::session::SessionContext;
use crate::error::StoreError;
use crate::helpers::round_to_tenths;
use crate::model::{Difficulty, UserRecord};
use crate::store::UserStore;

/// Share of a drop below the overall score that is applied.
const LOSS_RATE: f64 = 0.25;
/// Share of a rise above the overall score that is applied.
const GAIN_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAdjustment {
    pub adjustment: f64,
    pub old_overall: f64,
    pub new_overall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub adjustment: ScoreAdjustment,
    /// Best score on this difficulty after the game.
    pub record_score: f64,
    pub is_new_record: bool,
}

/// Raw score in easy-mode terms: normal counts half, hard a quarter.
pub fn relative_score(difficulty: Difficulty, raw_score: f64) -> f64 {
    raw_score / difficulty.relative_divisor()
}

/// Change to the overall score. Gains move it at half the gap, losses at a quarter.
pub fn overall_adjustment(old_overall: f64, relative_score: f64) -> f64 {
    let difference = relative_score - old_overall;
    if difference < 0.0 {
        round_to_tenths(LOSS_RATE * difference)
    } else {
        round_to_tenths(GAIN_RATE * difference)
    }
}

pub fn adjust_overall(old_overall: f64, difficulty: Difficulty, raw_score: f64) -> ScoreAdjustment {
    let adjustment = overall_adjustment(old_overall, relative_score(difficulty, raw_score));
    ScoreAdjustment {
        adjustment,
        old_overall,
        new_overall: round_to_tenths(old_overall + adjustment),
    }
}

/// Folds a finished game into `record`: moves the overall score and keeps the best score
/// per difficulty. The first game on a difficulty always sets a new record.
pub fn apply_game_result(
    record: &mut UserRecord,
    game: &str,
    difficulty: Difficulty,
    raw_score: f64,
) -> GameResult {
    let adjustment = adjust_overall(record.overall_score, difficulty, raw_score);
    record.overall_score = adjustment.new_overall;

    let records = record.game_records_mut(game);
    let (record_score, is_new_record) = match records.get(difficulty) {
        Some(previous) => (previous.max(raw_score), raw_score > previous),
        None => (raw_score, true),
    };
    records.set(difficulty, record_score);

    debug!(
        target: "account",
        "{} {}: raw {} -> relative {}",
        game,
        difficulty,
        raw_score,
        relative_score(difficulty, raw_score)
    );

    GameResult {
        adjustment,
        record_score,
        is_new_record,
    }
}

/// Reads the signed-in user's record, applies the game and writes the whole record back.
/// Returns `None` without writing when no one is signed in or the record has vanished
/// (the session is signed out in that case).
pub fn record_game_result<S: UserStore>(
    store: &mut S,
    session: &mut SessionContext,
    game: &str,
    difficulty: Difficulty,
    raw_score: f64,
) -> Result<Option<GameResult>, StoreError> {
    let Some((username, mut record)) = session.load_record(store)? else {
        return Ok(None);
    };

    let result = apply_game_result(&mut record, game, difficulty, raw_score);
    store.upsert(&username, &record)?;

    info!(
        target: "account",
        "{}: overall {} -> {} ({:+}){}",
        username,
        result.adjustment.old_overall,
        result.adjustment.new_overall,
        result.adjustment.adjustment,
        if result.is_new_record { "; new record" } else { "" }
    );
    Ok(Some(result))
}
