use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::{Difficulty, TimerState};

/// Scoring inputs of one round: penalties accumulate here while the engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub difficulty: Difficulty,
    pub base_score: f64,
    pub mistakes: u32,
    pub timer: TimerState,
    pub started: bool,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            base_score: difficulty.base_score(),
            mistakes: 0,
            timer: TimerState::default(),
            started: false,
        }
    }

    pub fn start(&mut self, now: SystemTime) {
        self.started = true;
        self.timer.start(now);
    }

    pub fn pause(&mut self, now: SystemTime) {
        self.timer.stop(now);
    }

    pub fn resume(&mut self, now: SystemTime) {
        if self.started {
            self.timer.start(now);
        }
    }

    /// Closes the last segment. Afterwards the session is frozen for scoring.
    pub fn finish(&mut self, now: SystemTime) {
        self.timer.stop(now);
        self.started = false;
    }

    pub fn record_mistake(&mut self) -> u32 {
        self.mistakes += 1;
        self.mistakes
    }

    pub fn elapsed(&self, now: SystemTime) -> Duration {
        self.timer.elapsed(now)
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_takes_base_score_from_difficulty() {
        assert_eq!(GameSession::new(Difficulty::Easy).base_score, 50.0);
        assert_eq!(GameSession::new(Difficulty::Normal).base_score, 100.0);
        assert_eq!(GameSession::new(Difficulty::Hard).base_score, 200.0);
    }

    #[test]
    fn test_resume_before_start_does_not_run_timer() {
        let mut session = GameSession::new(Difficulty::Easy);
        session.resume(SystemTime::now());
        assert!(!session.is_running());
    }

    #[test]
    fn test_finish_freezes_elapsed() {
        let now = SystemTime::now();
        let mut session = GameSession::new(Difficulty::Hard);
        session.start(now);
        session.pause(now + Duration::from_secs(4));
        session.resume(now + Duration::from_secs(10));
        session.finish(now + Duration::from_secs(12));

        assert!(!session.started);
        assert_eq!(
            session.elapsed(now + Duration::from_secs(60)),
            Duration::from_secs(6)
        );
    }
}
