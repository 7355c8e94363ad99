use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::{DurationSecondsWithFrac, TimestampSecondsWithFrac};

/// Play time as a list of closed segments plus the segment currently running, if any.
/// Pausing closes the running segment; resuming opens a new one.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "Vec<DurationSecondsWithFrac<f64>>")]
    pub segments: Vec<Duration>,
    #[serde_as(as = "Option<TimestampSecondsWithFrac<f64>>")]
    pub running_since: Option<SystemTime>,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Opens a segment; no-op while one is already running.
    pub fn start(&mut self, now: SystemTime) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Closes the running segment, returning its length.
    pub fn stop(&mut self, now: SystemTime) -> Option<Duration> {
        let started = self.running_since.take()?;
        let segment = now.duration_since(started).unwrap_or_default();
        self.segments.push(segment);
        Some(segment)
    }

    pub fn closed_total(&self) -> Duration {
        self.segments.iter().sum()
    }

    /// Closed segments plus the running segment's elapsed-so-far.
    pub fn elapsed(&self, now: SystemTime) -> Duration {
        let running = self
            .running_since
            .map(|started| now.duration_since(started).unwrap_or_default())
            .unwrap_or_default();
        self.closed_total().saturating_add(running)
    }
}
