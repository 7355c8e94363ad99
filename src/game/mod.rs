pub mod account;
pub mod account_score_updater;
pub mod board_generator;
pub mod image_catalog;
pub mod match_controller;
pub mod match_engine;
pub mod score_calculator;
pub mod session;
pub mod settings;

pub use account_score_updater::{record_game_result, GameResult, ScoreAdjustment};
pub use board_generator::generate_board;
pub use image_catalog::{ImageCatalog, ImageCategory};
pub use match_controller::MatchController;
pub use match_engine::{MatchEngine, SelectOutcome, MATCHING_TILES};
pub use session::{ActiveUser, SessionContext, SignInOutcome};
pub use settings::Settings;
