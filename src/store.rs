//! State kept between runs, behind the `StateStore` trait.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::calendar::iso_date;
use crate::clock::ClockOverride;

/// Persisted per-team record.
///
/// `current_index` is only a cache of the last computed assignee; it is
/// rewritten on every refresh and never read back as the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationRecord {
    /// Start date set with `restart`, replacing the configured one
    #[serde(with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    pub current_index: usize,
}

/// On-disk layout of the state file.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateFile {
    pub selected_team: Option<String>,
    pub teams: BTreeMap<String, RotationRecord>,
    pub clock: ClockOverride,
}

/// Durable storage for everything that must survive a restart.
///
/// Loads never fail: missing or unreadable data reads as absent.
pub trait StateStore {
    fn load_rotation_state(&self, team_id: &str) -> Option<RotationRecord>;
    fn save_rotation_state(&mut self, team_id: &str, record: &RotationRecord) -> Result<()>;
    fn load_selected_team(&self) -> Option<String>;
    fn save_selected_team(&mut self, team_id: &str) -> Result<()>;
    fn load_clock(&self) -> ClockOverride;
    fn save_clock(&mut self, clock: ClockOverride) -> Result<()>;
}

/// JSON state file, rewritten atomically on every save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: StateFile,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty state; a corrupt
    /// one is logged and ignored.
    pub fn open(path: &Path) -> Self {
        let state = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
                    StateFile::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no state file yet");
                StateFile::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read state file");
                StateFile::default()
            }
        };
        Self {
            path: path.to_path_buf(),
            state,
        }
    }

    /// Write tmp, then rename over the real file.
    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory: {}", parent.display())
                })?;
            }
        }
        let tmp_path = self.path.with_extension("tmp");
        let data = serde_json::to_string_pretty(&self.state)?;
        fs::write(&tmp_path, data)
            .with_context(|| format!("Failed to write state: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to write state: {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

impl StateStore for FileStore {
    fn load_rotation_state(&self, team_id: &str) -> Option<RotationRecord> {
        self.state.teams.get(team_id).cloned()
    }

    fn save_rotation_state(&mut self, team_id: &str, record: &RotationRecord) -> Result<()> {
        self.state
            .teams
            .insert(team_id.to_string(), record.clone());
        self.flush()
    }

    fn load_selected_team(&self) -> Option<String> {
        self.state.selected_team.clone()
    }

    fn save_selected_team(&mut self, team_id: &str) -> Result<()> {
        self.state.selected_team = Some(team_id.to_string());
        self.flush()
    }

    fn load_clock(&self) -> ClockOverride {
        self.state.clock
    }

    fn save_clock(&mut self, clock: ClockOverride) -> Result<()> {
        self.state.clock = clock;
        self.flush()
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub state: StateFile,
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn load_rotation_state(&self, team_id: &str) -> Option<RotationRecord> {
        self.state.teams.get(team_id).cloned()
    }

    fn save_rotation_state(&mut self, team_id: &str, record: &RotationRecord) -> Result<()> {
        self.state
            .teams
            .insert(team_id.to_string(), record.clone());
        Ok(())
    }

    fn load_selected_team(&self) -> Option<String> {
        self.state.selected_team.clone()
    }

    fn save_selected_team(&mut self, team_id: &str) -> Result<()> {
        self.state.selected_team = Some(team_id.to_string());
        Ok(())
    }

    fn load_clock(&self) -> ClockOverride {
        self.state.clock
    }

    fn save_clock(&mut self, clock: ClockOverride) -> Result<()> {
        self.state.clock = clock;
        Ok(())
    }
}

/// Default state file location, `<data dir>/friday-rota/state.json`.
pub fn default_state_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("cannot determine data directory")?;
    Ok(data_dir.join("friday-rota").join("state.json"))
}
