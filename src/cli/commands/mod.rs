//! Subcommands of the `ttt-rl` driver and the helpers they share

pub mod q_learning;
pub mod value_iteration;

use std::{
    fs::{self, File},
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{DefensiveOpponent, RandomOpponent},
    config::SolverConfig,
    ports::Opponent,
    tictactoe::Player,
};

/// Fixed opponent the agent is trained and evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentArg {
    /// Uniformly random legal moves
    Random,
    /// Wins when it can, blocks when it must, random otherwise
    Defensive,
}

impl OpponentArg {
    /// Build the opponent, seeded when `seed` is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Opponent> {
        match (self, seed) {
            (OpponentArg::Random, Some(seed)) => Box::new(RandomOpponent::with_seed(seed)),
            (OpponentArg::Random, None) => Box::new(RandomOpponent::new()),
            (OpponentArg::Defensive, Some(seed)) => Box::new(DefensiveOpponent::with_seed(seed)),
            (OpponentArg::Defensive, None) => Box::new(DefensiveOpponent::new()),
        }
    }
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Derive an independent seed for a secondary random stream.
pub(crate) fn derive_seed(seed: Option<u64>, offset: u64) -> Option<u64> {
    seed.map(|s| s.wrapping_add(offset))
}

/// Load the configuration file if one was given, else the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    match path {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(SolverConfig::default()),
    }
}

pub(crate) fn sanitize_summary_path(raw: &Path, default_name: &str) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push(default_name);
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Write `summary` as pretty JSON, creating parent directories as needed.
pub(crate) fn write_summary<T: Serialize>(
    raw: &Path,
    default_name: &str,
    summary: &T,
) -> Result<PathBuf> {
    let path = sanitize_summary_path(raw, default_name);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    to_writer_pretty(file, summary)
        .with_context(|| format!("failed to write summary to {}", path.display()))?;
    Ok(path)
}
