//! Runtime configuration.
//!
//! Settings come from an optional TOML file (`cavequest.toml` in the data
//! directory, or whatever `CAVEQUEST_CONFIG` points at). Every key is optional
//! and a missing file means all defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;
use crate::player::DEFAULT_PLAYER_NAME;
use crate::save_files::SAVE_DIR;

pub const CONFIG_ENV: &str = "CAVEQUEST_CONFIG";
pub const CONFIG_FILE: &str = "cavequest.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub player_name: String,
    pub save_dir: PathBuf,
    pub autosave_interval_secs: u64,
    /// Fixed seed for combat rolls; drawn from entropy when absent.
    pub rng_seed: Option<u64>,
    /// World file to load instead of the built-in cave.
    pub world_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            save_dir: PathBuf::from(SAVE_DIR),
            autosave_interval_secs: 30,
            rng_seed: None,
            world_file: None,
        }
    }
}

impl GameConfig {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

/// Where to look for the config file.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV).map_or_else(|| data_path(CONFIG_FILE), PathBuf::from)
}

/// Load the config at `path`, falling back to defaults if the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed, or holds an
/// invalid setting.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        info!("no config at {}, using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config = parse_config(&raw).with_context(|| format!("in config {}", path.display()))?;
    info!("config loaded from {}", path.display());
    Ok(config)
}

/// Parse and check config text.
///
/// # Errors
/// Returns an error on malformed TOML, unknown keys, or invalid values.
pub fn parse_config(raw: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(raw).context("parsing config TOML")?;
    if config.autosave_interval_secs == 0 {
        bail!("autosave_interval_secs must be at least 1");
    }
    if config.player_name.trim().is_empty() {
        bail!("player_name must not be empty");
    }
    Ok(config)
}
