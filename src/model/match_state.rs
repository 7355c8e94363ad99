use serde::{Deserialize, Serialize};

/// Lifecycle of one round: `Idle -> Playing <-> Paused -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    Idle,
    Playing,
    Paused,
    Completed,
}

impl Default for MatchState {
    fn default() -> Self {
        MatchState::Idle
    }
}

impl MatchState {
    pub fn accepts_selection(&self) -> bool {
        matches!(self, MatchState::Playing)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchState::Completed)
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchState::Idle => "idle",
            MatchState::Playing => "playing",
            MatchState::Paused => "paused",
            MatchState::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}
