use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

/// Catalogue used when neither the CLI nor the config file names one.
pub const DEFAULT_SONGS_PATH: &str = "data/songs.csv";

/// Application configuration loaded from TOML config file.
/// All fields have defaults; the config file is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Song catalogue to load when `--songs` is not given.
    pub songs_path: Option<PathBuf>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            songs_path: None,
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/moodlist/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path, falling back to defaults on error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve the catalogue path: CLI > config > `data/songs.csv`.
    pub fn resolve_songs_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.songs_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONGS_PATH))
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
