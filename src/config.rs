//! `labyrinth.toml` settings. Every field has a default, so a missing file
//! or a partial one is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::DEFAULT_HEALTH;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_map")]
    pub map: PathBuf,
    #[serde(default = "default_riddles")]
    pub riddles: PathBuf,
    #[serde(default = "default_maps_dir")]
    pub maps_dir: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    #[serde(default = "default_journal")]
    pub journal: PathBuf,
}

fn default_map() -> PathBuf {
    PathBuf::from("maps/mapa_teste.json")
}

fn default_riddles() -> PathBuf {
    PathBuf::from("data/enigmas.json")
}

fn default_maps_dir() -> PathBuf {
    PathBuf::from("maps")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_journal() -> PathBuf {
    PathBuf::from("logs/game.log")
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            map: default_map(),
            riddles: default_riddles(),
            maps_dir: default_maps_dir(),
            reports_dir: default_reports_dir(),
            journal: default_journal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_starting_health")]
    pub starting_health: i64,
}

fn default_starting_health() -> i64 {
    DEFAULT_HEALTH
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            starting_health: default_starting_health(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Log lines go here instead of stderr, which the play screen owns.
    /// An empty path sends them to stderr anyway.
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("logs/labyrinth.log"))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|file| !file.as_os_str().is_empty())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("cannot parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }
}
