use log::info;
use std::cell::RefCell;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use recollect::destroyable::Destroyable;
use recollect::events::{Channel, EventEmitter, EventHandler};
use recollect::game::{
    record_game_result, ImageCatalog, MatchController, SessionContext, Settings, SignInOutcome,
    MATCHING_TILES,
};
use recollect::helpers::format_elapsed;
use recollect::model::{Board, Difficulty, GameSummary, MatchCommand, MatchEvent, MatchState, Position};
use recollect::store::{JsonFileStore, UserStore};

fn init_logging() {
    env_logger::init();
}

/// What the terminal shows, rebuilt from match events.
#[derive(Default)]
struct TableView {
    board: Option<Board>,
    face_up: Vec<Position>,
    state: MatchState,
    score: f64,
    mistakes: u32,
    time: String,
    pair_shown: bool,
    completed: Option<GameSummary>,
}

impl EventHandler<MatchEvent> for TableView {
    fn handle_event(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::BoardReset(board) => {
                *self = TableView {
                    board: Some(board.clone()),
                    ..TableView::default()
                };
            }
            MatchEvent::StateChanged(state) => self.state = *state,
            MatchEvent::CardSelected(position) => self.face_up.push(*position),
            MatchEvent::CardDeselected(position) => self.face_up.retain(|p| p != position),
            MatchEvent::PairRevealed { first, second, .. } => {
                for card in [first, second] {
                    if let Some(board) = self.board.as_mut() {
                        if let Some(slot) = board.get_mut(card.row, card.col) {
                            slot.revealed = true;
                        }
                    }
                }
                self.pair_shown = true;
            }
            MatchEvent::PairHidden {
                first,
                second,
                matched,
            } => {
                if let Some(board) = self.board.as_mut() {
                    for (row, col) in [first, second] {
                        if let Some(slot) = board.get_mut(*row, *col) {
                            slot.found |= *matched;
                        }
                    }
                }
                self.face_up.retain(|p| p != first && p != second);
                self.pair_shown = false;
            }
            MatchEvent::ScoreChanged(score) => self.score = *score,
            MatchEvent::MistakeCountChanged(mistakes) => self.mistakes = *mistakes,
            MatchEvent::TimeChanged(time) => self.time = time.clone(),
            MatchEvent::GameCompleted(summary) => self.completed = Some(summary.clone()),
        }
    }
}

impl TableView {
    fn render(&self) -> String {
        let Some(board) = &self.board else {
            return String::new();
        };
        let mut out = format!(
            "{}  score {}  mistakes {}  pairs left {}  [{}]\n",
            if self.time.is_empty() { "00:00" } else { &self.time },
            self.score,
            self.mistakes,
            board.remaining_pairs(),
            self.state
        );
        out.push_str("    ");
        for col in 0..board.n_cols() {
            out.push_str(&format!("{:^14}", col));
        }
        out.push('\n');
        for row in 0..board.n_rows() {
            out.push_str(&format!("{:>3} ", row));
            for card in board.row(row) {
                let label = match &card.identity {
                    None => String::new(),
                    Some(identity) if card.found || self.face_up.contains(&card.position()) => {
                        face_label(identity)
                    }
                    Some(_) => "?".to_string(),
                };
                out.push_str(&format!("{:^14}", label));
            }
            out.push('\n');
        }
        out
    }
}

fn face_label(identity: &str) -> String {
    let name = identity.rsplit('/').next().unwrap_or(identity);
    name.trim_end_matches(".png").chars().take(12).collect()
}

/// Lines typed on stdin, read on their own thread so the game loop can keep ticking.
fn spawn_input_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line.trim().to_string()).is_err() {
                break;
            }
        }
    });
    receiver
}

fn prompt(input: &Receiver<String>, question: &str) -> io::Result<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;
    Ok(input.recv().ok())
}

fn sign_in(
    input: &Receiver<String>,
    store: &mut JsonFileStore,
    session: &mut SessionContext,
    settings: &Settings,
) -> Result<bool, Box<dyn Error>> {
    loop {
        let Some(username) = prompt(input, "Username (blank to play as guest): ")? else {
            return Ok(false);
        };
        if username.is_empty() {
            return Ok(true);
        }
        let exists = SessionContext::account_exists(store, &username)?;
        let question = if exists {
            "Password: "
        } else {
            "New account. Choose a password: "
        };
        let Some(password) = prompt(input, question)? else {
            return Ok(false);
        };
        match session.sign_in(store, &username, &password, &settings.default_user_options()) {
            Ok(SignInOutcome::Created) => println!("Account created."),
            Ok(SignInOutcome::SignedIn) => println!("Welcome back."),
            Err(e) => {
                println!("{}", e);
                continue;
            }
        }
        return Ok(true);
    }
}

fn choose_difficulty(input: &Receiver<String>) -> io::Result<Option<Difficulty>> {
    loop {
        let Some(answer) = prompt(input, "Difficulty (easy/normal/hard, q to quit): ")? else {
            return Ok(None);
        };
        if answer == "q" {
            return Ok(None);
        }
        match answer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(e) => println!("{}", e),
        }
    }
}

fn summary_text(summary: &GameSummary) -> String {
    let breakdown = &summary.breakdown;
    format!(
        "Completed {} in {}\n  base score      {}\n  mistakes        -{}\n  time            -{}\n  final score     {}{}\n",
        summary.difficulty,
        format_elapsed(summary.elapsed),
        breakdown.base_score,
        breakdown.mistake_penalty,
        breakdown.time_penalty,
        breakdown.final_score,
        if breakdown.floored { " (minimum -100 score)" } else { "" }
    )
}

fn show_table(view: &Rc<RefCell<TableView>>) -> io::Result<()> {
    print!("{}", view.borrow().render());
    print!("row col | p(ause) | q(uit): ");
    io::stdout().flush()
}

/// Plays one round. Waits for input in `tick_interval` slices, sending a tick after each
/// and hiding a shown pair once `hide_delay` has passed.
fn play_round(
    input: &Receiver<String>,
    commands: &EventEmitter<MatchCommand>,
    view: &Rc<RefCell<TableView>>,
    settings: &Settings,
    difficulty: Difficulty,
) -> io::Result<Option<GameSummary>> {
    commands.emit(MatchCommand::NewGame(difficulty, Settings::seed_from_env()));
    commands.emit(MatchCommand::Start);
    show_table(view)?;

    let mut hide_at: Option<Instant> = None;
    loop {
        if let Some(summary) = view.borrow().completed.clone() {
            println!();
            return Ok(Some(summary));
        }

        match input.recv_timeout(settings.tick_interval()) {
            Ok(line) => {
                match line.as_str() {
                    "q" => return Ok(None),
                    "p" => commands.emit(MatchCommand::TogglePause),
                    _ if view.borrow().pair_shown => {
                        println!("Wait for the cards to turn back.");
                    }
                    _ => {
                        let parts: Vec<usize> = line
                            .split_whitespace()
                            .filter_map(|part| part.parse().ok())
                            .collect();
                        match parts[..] {
                            [row, col] => commands.emit(MatchCommand::CardClick(row, col)),
                            _ => println!("Enter a row and a column, e.g. `1 2`"),
                        }
                    }
                }
                if view.borrow().pair_shown && hide_at.is_none() {
                    hide_at = Some(Instant::now() + settings.hide_delay());
                }
                commands.emit(MatchCommand::Tick);
                show_table(view)?;
            }
            Err(RecvTimeoutError::Timeout) => commands.emit(MatchCommand::Tick),
            Err(RecvTimeoutError::Disconnected) => return Ok(None),
        }

        if hide_at.is_some_and(|deadline| Instant::now() >= deadline) {
            hide_at = None;
            commands.emit(MatchCommand::HidePending);
            if view.borrow().completed.is_none() {
                println!();
                show_table(view)?;
            }
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let settings = Settings::load();
    let mut store = JsonFileStore::new(&settings.data_file);
    store.ensure_exists()?;
    info!("Accounts are stored in {:?}", store.path());
    let catalog = ImageCatalog::scan(&settings.assets_dir)?;
    if catalog.is_empty() {
        println!(
            "No images found under {:?}; boards will be empty.",
            settings.assets_dir
        );
    } else {
        info!(
            "Loaded {} images in {} categories",
            catalog.image_count(),
            catalog.categories.len()
        );
    }

    let input = spawn_input_reader();
    let mut session = SessionContext::signed_out();
    if !sign_in(&input, &mut store, &mut session, &settings)? {
        return Ok(());
    }

    let (commands, command_observer) = Channel::<MatchCommand>::new();
    let (event_emitter, event_observer) = Channel::<MatchEvent>::new();
    let view = Rc::new(RefCell::new(TableView::default()));
    let view_subscription = event_observer.subscribe_handler(view.clone());
    let controller = MatchController::new(command_observer, event_emitter, catalog);

    while let Some(difficulty) = choose_difficulty(&input)? {
        let Some(summary) = play_round(&input, &commands, &view, &settings, difficulty)? else {
            continue;
        };
        print!("{}", summary_text(&summary));

        match record_game_result(
            &mut store,
            &mut session,
            MATCHING_TILES,
            difficulty,
            summary.final_score(),
        )? {
            Some(result) => {
                println!(
                    "Overall score {} -> {} ({:+})",
                    result.adjustment.old_overall,
                    result.adjustment.new_overall,
                    result.adjustment.adjustment
                );
                if result.is_new_record {
                    println!("New {} record: {}", difficulty, result.record_score);
                }
            }
            None => println!("Not signed in; score not saved."),
        }
    }

    controller.borrow_mut().destroy();
    view_subscription.unsubscribe();
    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("recollect: {}", e);
        std::process::exit(1);
    }
}
