//! Settings for the terminal frontend, resolved as defaults → config file → CLI flags.
//!
//! The config file lives at `~/.flipsweep/config.toml` unless `--config` points elsewhere. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use flipsweep_core::{Coord, GameConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: Coord = 20;
pub const DEFAULT_HEIGHT: Coord = 20;
pub const DEFAULT_MINE_PERCENT: f64 = 10.0;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mine_percent: Option<f64>,
    pub seed: Option<u64>,
    pub log_level: Option<LevelFilter>,
}

/// Values given on the command line; `None` means "not specified".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mine_percent: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: Coord,
    pub height: Coord,
    /// Mine density as shown to the player, `0..=100`.
    pub mine_percent: f64,
    pub seed: u64,
    pub log_level: Option<LevelFilter>,
}

impl Settings {
    pub fn resolve(file: &FileConfig, cli: &Overrides, fallback_seed: u64) -> Self {
        Self {
            width: cli.width.or(file.width).unwrap_or(DEFAULT_WIDTH),
            height: cli.height.or(file.height).unwrap_or(DEFAULT_HEIGHT),
            mine_percent: cli
                .mine_percent
                .or(file.mine_percent)
                .unwrap_or(DEFAULT_MINE_PERCENT),
            seed: cli.seed.or(file.seed).unwrap_or(fallback_seed),
            log_level: file.log_level,
        }
    }

    /// Converts the player-facing percentage into the fraction the core expects.
    pub fn game_config(&self) -> flipsweep_core::Result<GameConfig> {
        GameConfig::new((self.width, self.height), self.mine_percent / 100.0)
    }
}

/// Returns the path to `~/.flipsweep/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".flipsweep").join("config.toml"))
}

/// Loads the config file. An explicit path must exist; the default one may be absent.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    let path = match (explicit, config_path()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) if path.exists() => path,
        (None, _) => {
            log::debug!("No config file found, using defaults");
            return Ok(FileConfig::default());
        }
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config =
        parse(&contents).with_context(|| format!("parsing config file {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    log::debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse(contents: &str) -> anyhow::Result<FileConfig> {
    Ok(toml::from_str(contents)?)
}

/// Seed used when neither the command line nor the config file fixes one.
pub fn time_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
