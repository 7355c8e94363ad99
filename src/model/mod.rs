mod board;
mod card;
mod difficulty;
mod game_session;
mod game_summary;
mod match_command;
mod match_event;
mod match_state;
mod selection;
mod timer_state;
mod user_record;

pub use board::Board;
pub use card::{Card, ImageRef};
pub use difficulty::{Difficulty, UnknownDifficulty};
pub use game_session::GameSession;
pub use game_summary::{GameSummary, ScoreBreakdown};
pub use match_command::MatchCommand;
pub use match_event::MatchEvent;
pub use match_state::MatchState;
pub use selection::{Position, SelectionChange, SelectionState};
pub use timer_state::TimerState;
pub use user_record::{GameRecords, UserOptions, UserRecord, DEFAULT_THEME, DEFAULT_VOLUME};
