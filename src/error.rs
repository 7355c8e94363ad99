//! Error types for recollect.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::MatchState;

/// Failures reading or writing the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access user store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed user store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("user store has no \"users\" object")]
    MissingUsersContainer,
}

/// Engine commands issued in a state that does not allow them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("cards can only be selected while playing (currently {0})")]
    NotPlaying(MatchState),

    #[error("a revealed pair is still waiting to be hidden")]
    PairPending,

    #[error("no card at row {row}, column {col}")]
    OutOfBounds { row: usize, col: usize },

    #[error("cannot {action} while {from}")]
    InvalidTransition { from: MatchState, action: &'static str },
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid username: {0}")]
    InvalidUsername(&'static str),

    #[error("invalid password: {0}")]
    InvalidPassword(&'static str),

    #[error("incorrect password")]
    IncorrectPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}
