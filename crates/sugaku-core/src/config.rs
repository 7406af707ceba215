//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_ROUNDS;
use crate::model::ProblemKind;
use crate::player::DEFAULT_STATS_FILE;

/// File name searched for in the working directory.
pub const CONFIG_FILE: &str = "sugaku.toml";

/// Overrides the statistics file from any config file.
pub const STATS_FILE_ENV: &str = "SUGAKU_STATS_FILE";

const MIN_INTERFACE_WIDTH: usize = 40;

/// Top-level sugaku configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SugakuConfig {
    /// Where player statistics are persisted.
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
    /// Questions per game.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Pause after each verdict, in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    /// Width of the console panels.
    #[serde(default = "default_interface_width")]
    pub interface_width: usize,
    /// Problem kinds on offer. Empty means all.
    #[serde(default)]
    pub kinds: Vec<ProblemKind>,
    /// Fixed RNG seed for reproducible games.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_stats_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATS_FILE)
}
fn default_rounds() -> usize {
    DEFAULT_ROUNDS
}
fn default_pause_ms() -> u64 {
    2000
}
fn default_interface_width() -> usize {
    120
}

impl Default for SugakuConfig {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            rounds: default_rounds(),
            pause_ms: default_pause_ms(),
            interface_width: default_interface_width(),
            kinds: Vec::new(),
            seed: None,
        }
    }
}

impl SugakuConfig {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.rounds >= 1, "rounds must be at least 1");
        anyhow::ensure!(
            self.interface_width >= MIN_INTERFACE_WIDTH,
            "interface_width must be at least {MIN_INTERFACE_WIDTH}"
        );
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `sugaku.toml` in the current directory
/// 2. `~/.config/sugaku/config.toml`
///
/// `SUGAKU_STATS_FILE` overrides the statistics file.
pub fn load_config_from(path: Option<&Path>) -> Result<SugakuConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SugakuConfig::default(),
    };

    if let Ok(stats_file) = std::env::var(STATS_FILE_ENV) {
        if !stats_file.trim().is_empty() {
            config.stats_file = PathBuf::from(stats_file);
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<SugakuConfig> {
    Ok(toml::from_str::<SugakuConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sugaku"))
}
