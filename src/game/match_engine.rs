use log::{info, trace, warn};
use std::time::SystemTime;
use uuid::Uuid;

use super::score_calculator::{live_score, score_breakdown};
use crate::error::MatchError;
use crate::events::EventEmitter;
use crate::helpers::format_elapsed;
use crate::model::{
    Board, Difficulty, GameSession, GameSummary, MatchEvent, MatchState, Position,
    SelectionChange, SelectionState,
};

pub const MATCHING_TILES: &str = "Matching Tiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Found or dead card; nothing happens.
    Ignored,
    Selected,
    Deselected,
    Matched,
    Mismatched { penalized: bool },
}

/// A compared pair still face up, waiting for the hide delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPair {
    first: Position,
    second: Position,
    matched: bool,
}

/// One round of Matching Tiles.
///
/// Owns the board, the scoring session and the turn state, and reports every visible
/// change through its event emitter. Time never advances on its own: callers pass `now`
/// to each command and drive `tick` and `hide_pending` from their own timers.
pub struct MatchEngine {
    board: Board,
    session: GameSession,
    selection: SelectionState,
    pending: Option<PendingPair>,
    state: MatchState,
    playthrough_id: Uuid,
    summary: Option<GameSummary>,
    event_emitter: EventEmitter<MatchEvent>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MatchEngine {{state: {}, mistakes: {}, pending: {:?}, board: {:?}}}",
            self.state, self.session.mistakes, self.pending, self.board
        )
    }
}

impl MatchEngine {
    pub fn new(board: Board, difficulty: Difficulty, event_emitter: EventEmitter<MatchEvent>) -> Self {
        let engine = Self {
            board,
            session: GameSession::new(difficulty),
            selection: SelectionState::default(),
            pending: None,
            state: MatchState::Idle,
            playthrough_id: Uuid::new_v4(),
            summary: None,
            event_emitter,
        };
        engine
            .event_emitter
            .emit(MatchEvent::BoardReset(engine.board.clone()));
        engine
            .event_emitter
            .emit(MatchEvent::StateChanged(engine.state));
        engine
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    pub fn has_pending_pair(&self) -> bool {
        self.pending.is_some()
    }

    /// Set once the round is completed.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn live_score(&self, now: SystemTime) -> f64 {
        match &self.summary {
            Some(summary) => summary.final_score(),
            None => live_score(&self.session, now),
        }
    }

    fn set_state(&mut self, state: MatchState) {
        trace!(target: "match_engine", "{} -> {}", self.state, state);
        self.state = state;
        self.event_emitter.emit(MatchEvent::StateChanged(state));
    }

    fn emit_score(&self, now: SystemTime) {
        self.event_emitter
            .emit(MatchEvent::ScoreChanged(self.live_score(now)));
    }

    pub fn start(&mut self, now: SystemTime) -> Result<(), MatchError> {
        if self.state != MatchState::Idle {
            return Err(MatchError::InvalidTransition {
                from: self.state,
                action: "start",
            });
        }
        info!(
            target: "match_engine",
            "Starting {} game; seed: {}",
            self.difficulty(),
            self.board.seed
        );
        self.session.start(now);
        self.set_state(MatchState::Playing);
        self.emit_score(now);

        // nothing to match on an all-dead board
        if self.board.is_complete() {
            self.complete(now);
        }
        Ok(())
    }

    /// Closes the running time segment. Pausing twice is harmless.
    pub fn pause(&mut self, now: SystemTime) -> Result<(), MatchError> {
        match self.state {
            MatchState::Playing => {
                self.session.pause(now);
                self.set_state(MatchState::Paused);
                Ok(())
            }
            MatchState::Paused => Ok(()),
            from => Err(MatchError::InvalidTransition {
                from,
                action: "pause",
            }),
        }
    }

    pub fn resume(&mut self, now: SystemTime) -> Result<(), MatchError> {
        match self.state {
            MatchState::Paused => {
                self.session.resume(now);
                self.set_state(MatchState::Playing);
                self.emit_score(now);
                Ok(())
            }
            MatchState::Playing => Ok(()),
            from => Err(MatchError::InvalidTransition {
                from,
                action: "resume",
            }),
        }
    }

    pub fn toggle_pause(&mut self, now: SystemTime) -> Result<(), MatchError> {
        match self.state {
            MatchState::Paused => self.resume(now),
            _ => self.pause(now),
        }
    }

    /// Handles a click on a card.
    ///
    /// A second distinct card reveals the pair at once. A match marks both found. A
    /// mismatch costs a mistake only when both cards had been revealed by an earlier turn;
    /// seeing a card for the first time is free. Either way the pair stays pending until
    /// `hide_pending`, and no card can be picked in the meantime.
    pub fn select_card(
        &mut self,
        row: usize,
        col: usize,
        now: SystemTime,
    ) -> Result<SelectOutcome, MatchError> {
        if !self.state.accepts_selection() {
            return Err(MatchError::NotPlaying(self.state));
        }
        if self.pending.is_some() {
            return Err(MatchError::PairPending);
        }
        let card = self
            .board
            .get(row, col)
            .ok_or(MatchError::OutOfBounds { row, col })?;
        if !card.is_selectable() {
            trace!(target: "match_engine", "Ignoring click on {}", card);
            return Ok(SelectOutcome::Ignored);
        }

        match self.selection.toggle((row, col)) {
            SelectionChange::Removed => {
                self.event_emitter
                    .emit(MatchEvent::CardDeselected((row, col)));
                return Ok(SelectOutcome::Deselected);
            }
            SelectionChange::Added => {
                self.event_emitter.emit(MatchEvent::CardSelected((row, col)));
            }
        }

        match self.selection.take_pair() {
            Some((first, second)) => Ok(self.compare_pair(first, second, now)),
            None => Ok(SelectOutcome::Selected),
        }
    }

    fn compare_pair(&mut self, first: Position, second: Position, now: SystemTime) -> SelectOutcome {
        let (Some(a), Some(b)) = (
            self.board.get(first.0, first.1).cloned(),
            self.board.get(second.0, second.1).cloned(),
        ) else {
            // positions were bounds-checked when selected
            return SelectOutcome::Ignored;
        };

        let matched = a.same_identity(&b);
        let penalized = !matched && a.revealed && b.revealed;

        for (row, col) in [first, second] {
            if let Some(card) = self.board.get_mut(row, col) {
                card.revealed = true;
                if matched {
                    card.found = true;
                }
            }
        }
        self.pending = Some(PendingPair {
            first,
            second,
            matched,
        });

        trace!(
            target: "match_engine",
            "Compared {} and {}: matched: {}; penalized: {}",
            a,
            b,
            matched,
            penalized
        );
        self.event_emitter.emit(MatchEvent::PairRevealed {
            first: a,
            second: b,
            matched,
            penalized,
        });

        if penalized {
            let mistakes = self.session.record_mistake();
            self.event_emitter
                .emit(MatchEvent::MistakeCountChanged(mistakes));
            self.emit_score(now);
        }

        if matched {
            SelectOutcome::Matched
        } else {
            SelectOutcome::Mismatched { penalized }
        }
    }

    /// Ends the reveal of the pending pair, then completes the round if every card is
    /// found. Returns whether there was a pair to hide.
    pub fn hide_pending(&mut self, now: SystemTime) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.event_emitter.emit(MatchEvent::PairHidden {
            first: pending.first,
            second: pending.second,
            matched: pending.matched,
        });

        if self.board.is_complete() && !self.state.is_finished() {
            self.complete(now);
        }
        true
    }

    /// Display refresh; reports the time and live score while playing.
    pub fn tick(&self, now: SystemTime) -> Option<f64> {
        if self.state != MatchState::Playing {
            return None;
        }
        let score = self.live_score(now);
        self.event_emitter.emit(MatchEvent::TimeChanged(format_elapsed(
            self.session.elapsed(now),
        )));
        self.event_emitter.emit(MatchEvent::ScoreChanged(score));
        Some(score)
    }

    fn complete(&mut self, now: SystemTime) {
        self.session.finish(now);
        self.selection.clear();

        let Some(breakdown) = score_breakdown(&self.session) else {
            warn!(target: "match_engine", "Timer still running after finish");
            return;
        };
        let elapsed = self.session.timer.closed_total();
        let summary = GameSummary::new(
            self.playthrough_id,
            MATCHING_TILES,
            self.difficulty(),
            breakdown,
            self.session.mistakes,
            elapsed,
        );
        info!(
            target: "match_engine",
            "Completed {} game in {}; mistakes: {}; score: {}",
            self.difficulty(),
            format_elapsed(elapsed),
            self.session.mistakes,
            breakdown.final_score
        );

        self.summary = Some(summary.clone());
        self.set_state(MatchState::Completed);
        self.event_emitter
            .emit(MatchEvent::TimeChanged(format_elapsed(elapsed)));
        self.event_emitter
            .emit(MatchEvent::ScoreChanged(breakdown.final_score));
        self.event_emitter.emit(MatchEvent::GameCompleted(summary));
    }
}
