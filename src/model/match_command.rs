use super::Difficulty;

/// Input from the presentation layer, delivered to `MatchController` over a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchCommand {
    NewGame(Difficulty, Option<u64>), // difficulty, shuffle seed
    Start,
    CardClick(usize, usize), // row, col
    TogglePause,
    Pause,
    Resume,
    /// Fired by the hide-delay timer after a pair was shown.
    HidePending,
    /// Fired by the repeating display timer.
    Tick,
}
