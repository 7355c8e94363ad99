use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Difficulty;

pub const DEFAULT_VOLUME: u8 = 50;
pub const DEFAULT_THEME: &str = "Fruity (Default)";

/// One account, stored under its lowercase username. Fields missing from older
/// files are filled with defaults on load, and unknown fields are carried through
/// the whole-record rewrite untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "password")]
    pub password_hash: String,

    #[serde(default)]
    pub options: UserOptions,

    #[serde(default)]
    pub overall_score: f64,

    #[serde(default)]
    pub game_data: BTreeMap<String, GameRecords>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(password_hash: String, options: UserOptions) -> Self {
        Self {
            password_hash,
            options,
            overall_score: 0.0,
            game_data: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Creates the per-game entry on first access.
    pub fn game_records_mut(&mut self, game: &str) -> &mut GameRecords {
        self.game_data.entry(game.to_string()).or_default()
    }

    pub fn record_score(&self, game: &str, difficulty: Difficulty) -> Option<f64> {
        self.game_data
            .get(game)
            .and_then(|records| records.get(difficulty))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserOptions {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub hidden_music: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for UserOptions {
    fn default() -> Self {
        UserOptions {
            volume: DEFAULT_VOLUME,
            theme: DEFAULT_THEME.to_string(),
            hidden_music: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Best score per difficulty for one game, keyed `record_score_<difficulty>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecords(BTreeMap<String, f64>);

impl GameRecords {
    pub fn get(&self, difficulty: Difficulty) -> Option<f64> {
        self.0.get(&difficulty.record_key()).copied()
    }

    pub fn set(&mut self, difficulty: Difficulty, score: f64) {
        self.0.insert(difficulty.record_key(), score);
    }
}
