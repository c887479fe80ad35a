use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use time::{Date, Weekday};

use crate::calendar::{iso_date, weekday_name};
use crate::roster::Member;

const CONFIG_FILE: &str = ".friday-rota.toml";
const SEED: &str = include_str!("../data/seed.toml");

/// Configuration for friday-rota team rotations
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields, title = "friday-rota Configuration")]
pub struct Config {
    /// Weekday of the recurring event (e.g., "friday")
    #[serde(deserialize_with = "weekday_name::deserialize")]
    #[schemars(with = "String")]
    pub cycle_day: Weekday,
    /// Team shown when none is selected
    pub default_team: Option<String>,
    /// Number of upcoming turns to list (default: rest of the roster)
    pub upcoming_count: Option<usize>,
    /// Number of past turns to list
    pub history_count: usize,
    /// Number of birthdays / name days to list
    pub anniversary_count: usize,
    /// Teams and their rosters
    pub teams: Vec<TeamConfig>,
}

/// One team and its rotation
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct TeamConfig {
    /// Unique team identifier
    pub id: String,
    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: String,
    /// Date of the first turn, YYYY-MM-DD
    #[serde(deserialize_with = "iso_date::deserialize")]
    #[schemars(with = "String")]
    pub start_date: Date,
    /// Roster position responsible for the first turn
    #[serde(default)]
    pub start_index: usize,
    /// Members in rotation order
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle_day: Weekday::Friday,
            default_team: None,
            upcoming_count: None,
            history_count: 5,
            anniversary_count: 5,
            teams: vec![],
        }
    }
}

impl Config {
    /// Load config from .friday-rota.toml, searching up from the given
    /// directory; falls back to the built-in teams.
    pub fn load(start_dir: &Path) -> Result<Self> {
        if let Some(path) = find_config_file(start_dir) {
            Self::from_file(&path)
        } else {
            tracing::debug!("no {CONFIG_FILE} found, using built-in teams");
            Self::seed()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// The built-in teams compiled into the binary.
    pub fn seed() -> Result<Self> {
        toml::from_str(SEED).context("Failed to parse built-in team data")
    }
}

/// Search for .friday-rota.toml from start_dir upward
fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
