use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::{UserOptions, DEFAULT_THEME, DEFAULT_VOLUME};

const SETTINGS_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_volume")]
    pub default_volume: u8,

    #[serde(default = "default_theme")]
    pub default_theme: String,
}

fn default_version() -> u32 {
    1
}
fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets/matching_tiles")
}
fn default_hide_delay_ms() -> u64 {
    750
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_volume() -> u8 {
    DEFAULT_VOLUME
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: SETTINGS_VERSION,
            data_file: default_data_file(),
            assets_dir: default_assets_dir(),
            hide_delay_ms: default_hide_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            default_volume: default_volume(),
            default_theme: default_theme(),
        }
    }
}

impl Settings {
    /// Settings from the user's config dir with environment overrides applied. A missing
    /// or unreadable file is replaced by the defaults.
    pub fn load() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!(target: "settings", "No config directory; using default settings");
                Settings::default()
            }
        };
        settings.apply_env_overrides();
        settings
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(e) => warn!(target: "settings", "Ignoring unreadable settings at {:?}: {}", path, e),
            }
        }
        let default = Settings::default();
        if let Err(e) = default.save_to(path) {
            warn!(target: "settings", "Could not write default settings to {:?}: {}", path, e);
        }
        default
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?.join("recollect");
        path.push("settings.json");
        Some(path)
    }

    fn migrate(&mut self) {
        match self.version {
            0 | 1 => {
                self.version = SETTINGS_VERSION;
            }
            _ => (),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn apply_env_overrides(&mut self) {
        if let Some(data_file) = Self::data_file_from_env() {
            debug!(target: "settings", "Using data file {:?} from environment", data_file);
            self.data_file = data_file;
        }
        if let Some(assets_dir) = Self::assets_dir_from_env() {
            debug!(target: "settings", "Using assets dir {:?} from environment", assets_dir);
            self.assets_dir = assets_dir;
        }
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Options given to accounts created on this machine.
    pub fn default_user_options(&self) -> UserOptions {
        UserOptions {
            volume: self.default_volume,
            theme: self.default_theme.clone(),
            ..UserOptions::default()
        }
    }

    pub fn data_file_from_env() -> Option<PathBuf> {
        std::env::var_os("RECOLLECT_DATA_FILE").map(PathBuf::from)
    }

    pub fn assets_dir_from_env() -> Option<PathBuf> {
        std::env::var_os("RECOLLECT_ASSETS_DIR").map(PathBuf::from)
    }

    pub fn seed_from_env() -> Option<u64> {
        let value = std::env::var("RECOLLECT_SEED").ok()?;
        match value.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(target: "settings", "Ignoring RECOLLECT_SEED={:?}: not a number", value);
                None
            }
        }
    }
}
