use log::{error, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;

use super::board_generator::generate_board;
use super::image_catalog::ImageCatalog;
use super::match_engine::MatchEngine;
use crate::destroyable::Destroyable;
use crate::error::MatchError;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{Difficulty, MatchCommand, MatchEvent};

/// Connects a command channel to the current `MatchEngine` and forwards its events.
///
/// Listeners on the event channel run while the controller is borrowed, so they must
/// not send commands synchronously; queue them for the next turn of the loop instead.
pub struct MatchController {
    engine: Option<MatchEngine>,
    catalog: ImageCatalog,
    subscription: Option<Unsubscriber<MatchCommand>>,
    match_event_emitter: EventEmitter<MatchEvent>,
}

impl Destroyable for MatchController {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl MatchController {
    pub fn new(
        match_command_observer: EventObserver<MatchCommand>,
        match_event_emitter: EventEmitter<MatchEvent>,
        catalog: ImageCatalog,
    ) -> Rc<RefCell<Self>> {
        let controller = Self {
            engine: None,
            catalog,
            subscription: None,
            match_event_emitter,
        };
        let refcell = Rc::new(RefCell::new(controller));
        MatchController::wire_subscription(refcell.clone(), match_command_observer);
        refcell
    }

    fn wire_subscription(
        controller: Rc<RefCell<Self>>,
        match_command_observer: EventObserver<MatchCommand>,
    ) {
        let controller_handler = controller.clone();
        let subscription = match_command_observer.subscribe(move |command| {
            match controller_handler.try_borrow_mut() {
                Ok(mut controller) => controller.handle_command(command.clone()),
                Err(_) => error!(
                    target: "match_engine",
                    "Dropping {:?}: sent from inside a match event listener",
                    command
                ),
            }
        });
        controller.borrow_mut().subscription = Some(subscription);
    }

    pub fn engine(&self) -> Option<&MatchEngine> {
        self.engine.as_ref()
    }

    pub fn handle_command(&mut self, command: MatchCommand) {
        // rejections are already logged
        let _ = self.handle_command_at(command, SystemTime::now());
    }

    /// Applies `command` as if it arrived at `now`. Rejected commands are logged and
    /// returned; the presentation layer normally prevents them.
    pub fn handle_command_at(
        &mut self,
        command: MatchCommand,
        now: SystemTime,
    ) -> Result<(), MatchError> {
        trace!(target: "match_engine", "Handling command: {:?}", command);
        if let MatchCommand::NewGame(difficulty, seed) = command {
            self.new_game(difficulty, seed);
            return Ok(());
        }
        let Some(engine) = self.engine.as_mut() else {
            warn!(target: "match_engine", "Ignoring {:?}: no game", command);
            return Ok(());
        };
        let result = match command {
            MatchCommand::NewGame(..) => Ok(()),
            MatchCommand::Start => engine.start(now),
            MatchCommand::CardClick(row, col) => engine.select_card(row, col, now).map(|_| ()),
            MatchCommand::TogglePause => engine.toggle_pause(now),
            MatchCommand::Pause => engine.pause(now),
            MatchCommand::Resume => engine.resume(now),
            MatchCommand::HidePending => {
                engine.hide_pending(now);
                Ok(())
            }
            MatchCommand::Tick => {
                engine.tick(now);
                Ok(())
            }
        };
        if let Err(e) = &result {
            warn!(target: "match_engine", "Rejected {:?}: {}", command, e);
        }
        result
    }

    fn new_game(&mut self, difficulty: Difficulty, seed: Option<u64>) {
        let board = generate_board(difficulty, &self.catalog, seed);
        self.engine = Some(MatchEngine::new(
            board,
            difficulty,
            self.match_event_emitter.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::game::image_catalog::ImageCategory;
    use crate::model::MatchState;
    use std::time::Duration;

    struct Harness {
        commands: EventEmitter<MatchCommand>,
        controller: Rc<RefCell<MatchController>>,
        events: Rc<RefCell<Vec<MatchEvent>>>,
    }

    fn harness() -> Harness {
        let (commands, command_observer) = Channel::<MatchCommand>::new();
        let (event_emitter, event_observer) = Channel::<MatchEvent>::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        event_observer.subscribe(move |event| events_clone.borrow_mut().push(event.clone()));

        let catalog = ImageCatalog::new(vec![ImageCategory::new(
            "fruit",
            &["a.png", "b.png", "c.png", "d.png", "e.png", "f.png", "g.png", "h.png"],
        )]);
        Harness {
            commands,
            controller: MatchController::new(command_observer, event_emitter, catalog),
            events,
        }
    }

    fn state(harness: &Harness) -> Option<MatchState> {
        harness.controller.borrow().engine().map(|engine| engine.state())
    }

    #[test]
    fn test_commands_reach_engine() {
        let harness = harness();
        harness.commands.emit(MatchCommand::Start);
        assert_eq!(state(&harness), None);

        harness
            .commands
            .emit(MatchCommand::NewGame(Difficulty::Easy, Some(7)));
        assert_eq!(state(&harness), Some(MatchState::Idle));
        assert_eq!(harness.controller.borrow().engine().unwrap().board().seed, 7);

        harness.commands.emit(MatchCommand::Start);
        harness.commands.emit(MatchCommand::CardClick(0, 0));
        assert_eq!(state(&harness), Some(MatchState::Playing));
        assert!(harness
            .events
            .borrow()
            .iter()
            .any(|event| *event == MatchEvent::CardSelected((0, 0))));

        harness.commands.emit(MatchCommand::TogglePause);
        assert_eq!(state(&harness), Some(MatchState::Paused));
    }

    #[test]
    fn test_rejected_command_reports_error() {
        let harness = harness();
        let mut controller = harness.controller.borrow_mut();
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        controller
            .handle_command_at(MatchCommand::NewGame(Difficulty::Easy, Some(1)), now)
            .unwrap();
        assert_eq!(
            controller.handle_command_at(MatchCommand::CardClick(0, 0), now),
            Err(MatchError::NotPlaying(MatchState::Idle))
        );
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let harness = harness();
        harness.controller.borrow_mut().destroy();
        harness
            .commands
            .emit(MatchCommand::NewGame(Difficulty::Normal, None));
        assert_eq!(state(&harness), None);
        assert!(!harness.commands.has_listeners());
    }

    #[test]
    fn test_full_round_through_commands() {
        let harness = harness();
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let mut controller = harness.controller.borrow_mut();
        controller
            .handle_command_at(MatchCommand::NewGame(Difficulty::Easy, Some(3)), t0)
            .unwrap();
        controller.handle_command_at(MatchCommand::Start, t0).unwrap();

        let cards: Vec<_> = controller.engine().unwrap().board().cards().cloned().collect();
        let mut done = vec![false; cards.len()];
        for i in 0..cards.len() {
            if done[i] {
                continue;
            }
            let Some(j) = (i + 1..cards.len()).find(|&j| cards[i].same_identity(&cards[j])) else {
                continue;
            };
            done[i] = true;
            done[j] = true;
            controller
                .handle_command_at(MatchCommand::CardClick(cards[i].row, cards[i].col), t0)
                .unwrap();
            controller
                .handle_command_at(MatchCommand::CardClick(cards[j].row, cards[j].col), t0)
                .unwrap();
            controller.handle_command_at(MatchCommand::HidePending, t0).unwrap();
        }

        let engine = controller.engine().unwrap();
        assert_eq!(engine.state(), MatchState::Completed);
        assert_eq!(engine.session().mistakes, 0);
        assert_eq!(engine.summary().unwrap().final_score(), 50.0);
    }
}
