use super::{Board, Card, GameSummary, MatchState, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    BoardReset(Board),
    StateChanged(MatchState),
    CardSelected(Position),
    CardDeselected(Position),
    /// Both cards of a full selection turned face up. `penalized` is set when the
    /// mismatch cost a mistake.
    PairRevealed {
        first: Card,
        second: Card,
        matched: bool,
        penalized: bool,
    },
    /// The hide delay elapsed. Matched cards stay shown, others flip back.
    PairHidden {
        first: Position,
        second: Position,
        matched: bool,
    },
    ScoreChanged(f64),
    MistakeCountChanged(u32),
    TimeChanged(String),
    GameCompleted(GameSummary),
}
