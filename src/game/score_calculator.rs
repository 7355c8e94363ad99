use std::time::{Duration, SystemTime};

use crate::helpers::round_to_tenths;
use crate::model::{GameSession, ScoreBreakdown};

/// Points lost per whole second of play.
pub const TIME_PENALTY_MULTIPLIER: f64 = 0.2;
/// Scores never go below this.
pub const SCORE_FLOOR: f64 = -100.0;

/// `base - mistakes - floor(seconds) * 0.2`, rounded to tenths, floored at -100.
pub fn score(base_score: f64, mistakes: u32, elapsed: Duration) -> f64 {
    let whole_seconds = elapsed.as_secs() as f64;
    let raw = base_score - mistakes as f64 - whole_seconds * TIME_PENALTY_MULTIPLIER;
    round_to_tenths(raw).max(SCORE_FLOOR)
}

/// Score shown while the round runs, counting the open timer segment up to `now`.
pub fn live_score(session: &GameSession, now: SystemTime) -> f64 {
    score(session.base_score, session.mistakes, session.elapsed(now))
}

/// Authoritative score of a finished round; `None` while the timer is still running.
pub fn final_score(session: &GameSession) -> Option<f64> {
    if session.is_running() {
        return None;
    }
    Some(score(
        session.base_score,
        session.mistakes,
        session.timer.closed_total(),
    ))
}

pub fn score_breakdown(session: &GameSession) -> Option<ScoreBreakdown> {
    let final_score = final_score(session)?;
    let whole_seconds = session.timer.closed_total().as_secs() as f64;
    Some(ScoreBreakdown {
        base_score: session.base_score,
        mistake_penalty: session.mistakes as f64,
        time_penalty: round_to_tenths(whole_seconds * TIME_PENALTY_MULTIPLIER),
        final_score,
        floored: final_score <= SCORE_FLOOR,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn finished_session(difficulty: Difficulty, mistakes: u32, elapsed: Duration) -> GameSession {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let mut session = GameSession::new(difficulty);
        session.mistakes = mistakes;
        session.start(start);
        session.finish(start + elapsed);
        session
    }

    #[test]
    fn test_score_example() {
        assert_eq!(score(50.0, 3, Duration::from_millis(12_700)), 44.6);
    }

    #[test]
    fn test_untouched_session_scores_base() {
        for difficulty in Difficulty::all() {
            let session = finished_session(difficulty, 0, Duration::ZERO);
            assert_eq!(final_score(&session), Some(difficulty.base_score()));
        }
    }

    #[test]
    fn test_partial_seconds_are_free() {
        assert_eq!(score(100.0, 0, Duration::from_millis(999)), 100.0);
        assert_eq!(score(100.0, 0, Duration::from_millis(1_000)), 99.8);
    }

    #[test]
    fn test_floor_at_minus_100() {
        assert_eq!(score(50.0, 400, Duration::ZERO), SCORE_FLOOR);
        assert_eq!(score(200.0, 0, Duration::from_secs(3600)), SCORE_FLOOR);
        for difficulty in Difficulty::all() {
            for (mistakes, secs) in [(0, 0), (10, 100), (1000, 1), (0, 100_000)] {
                let session = finished_session(difficulty, mistakes, Duration::from_secs(secs));
                assert!(final_score(&session).unwrap() >= SCORE_FLOOR);
            }
        }
    }

    #[test]
    fn test_live_score_counts_running_segment() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let mut session = GameSession::new(Difficulty::Normal);
        session.start(start);
        session.pause(start + Duration::from_secs(10));
        session.resume(start + Duration::from_secs(50));

        assert_eq!(live_score(&session, start + Duration::from_secs(55)), 97.0);
        assert_eq!(final_score(&session), None);

        session.finish(start + Duration::from_secs(55));
        assert_eq!(final_score(&session), Some(97.0));
    }

    #[test]
    fn test_breakdown() {
        let session = finished_session(Difficulty::Easy, 3, Duration::from_millis(12_700));
        let breakdown = score_breakdown(&session).unwrap();
        assert_eq!(breakdown.base_score, 50.0);
        assert_eq!(breakdown.mistake_penalty, 3.0);
        assert_eq!(breakdown.time_penalty, 2.4);
        assert_eq!(breakdown.final_score, 44.6);
        assert!(!breakdown.floored);

        let session = finished_session(Difficulty::Easy, 200, Duration::from_secs(5));
        let breakdown = score_breakdown(&session).unwrap();
        assert_eq!(breakdown.final_score, SCORE_FLOOR);
        assert!(breakdown.floored);
    }

    #[test]
    fn test_breakdown_landing_exactly_on_floor_is_floored() {
        // 50 - 150 = -100
        let session = finished_session(Difficulty::Easy, 150, Duration::ZERO);
        let breakdown = score_breakdown(&session).unwrap();
        assert_eq!(breakdown.final_score, SCORE_FLOOR);
        assert!(breakdown.floored);

        let session = finished_session(Difficulty::Easy, 149, Duration::from_secs(4));
        let breakdown = score_breakdown(&session).unwrap();
        assert_eq!(breakdown.final_score, -99.8);
        assert!(!breakdown.floored);
    }
}
