//! Team registry and per-team rotation state.
//!
//! [`TeamRegistry`] is built once from the loaded [`Config`]; [`TeamState`]
//! layers the persisted records (selection, restarted start dates, cached
//! index) over it and answers rotation queries against the injected clock.

use std::collections::HashSet;

use anyhow::Result;
use time::{Date, Weekday};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::RotaError;
use crate::model::Turn;
use crate::roster::{Member, Roster};
use crate::rotation::Rotation;
use crate::store::{RotationRecord, StateStore};

#[derive(Debug, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub roster: Roster,
    /// Start date from the team data; a restart stored in state wins over it
    pub start_date: Date,
    pub start_index: usize,
}

#[derive(Debug, Clone)]
pub struct TeamRegistry {
    cycle_day: Weekday,
    default_team: Option<String>,
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Build the registry, rejecting duplicate team or member ids.
    pub fn from_config(config: &Config) -> Result<Self, RotaError> {
        let mut seen = HashSet::new();
        let mut teams = Vec::with_capacity(config.teams.len());
        for tc in &config.teams {
            if !seen.insert(tc.id.as_str()) {
                return Err(RotaError::DuplicateTeam { id: tc.id.clone() });
            }
            let name = if tc.name.trim().is_empty() {
                tc.id.clone()
            } else {
                tc.name.clone()
            };
            teams.push(Team {
                id: tc.id.clone(),
                name,
                roster: Roster::new(&tc.id, tc.members.clone())?,
                start_date: tc.start_date,
                start_index: tc.start_index,
            });
        }
        Ok(Self {
            cycle_day: config.cycle_day,
            default_team: config.default_team.clone(),
            teams,
        })
    }

    pub fn get(&self, id: &str) -> Result<&Team, RotaError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| RotaError::TeamNotFound { id: id.to_string() })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

/// Rotation queries over a registry, backed by a [`StateStore`] and a
/// [`Clock`].
pub struct TeamState<'r, S, C> {
    registry: &'r TeamRegistry,
    store: S,
    clock: C,
}

impl<'r, S: StateStore, C: Clock> TeamState<'r, S, C> {
    pub fn new(registry: &'r TeamRegistry, store: S, clock: C) -> Self {
        Self {
            registry,
            store,
            clock,
        }
    }

    pub fn registry(&self) -> &'r TeamRegistry {
        self.registry
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn get_roster(&self, team_id: &str) -> Result<&'r Roster, RotaError> {
        Ok(&self.registry.get(team_id)?.roster)
    }

    /// Effective start date: the stored restart date if any, else the
    /// configured one.
    pub fn get_start_date(&self, team_id: &str) -> Result<Date, RotaError> {
        let team = self.registry.get(team_id)?;
        let stored = self
            .store
            .load_rotation_state(team_id)
            .and_then(|r| r.start_date);
        Ok(stored.unwrap_or(team.start_date))
    }

    pub fn rotation(&self, team_id: &str) -> Result<Rotation, RotaError> {
        let team = self.registry.get(team_id)?;
        Ok(
            Rotation::new(self.get_start_date(team_id)?, self.registry.cycle_day)
                .with_start_index(team.start_index),
        )
    }

    pub fn current_turn(&self, team_id: &str) -> Result<Turn<'r>, RotaError> {
        let roster = self.get_roster(team_id)?;
        self.rotation(team_id)?
            .current_turn(roster.members(), self.today())
    }

    pub fn get_current_member(&self, team_id: &str) -> Result<&'r Member, RotaError> {
        Ok(self.current_turn(team_id)?.member)
    }

    /// Recompute the current index and store it alongside the team's record.
    pub fn refresh_current_index(&mut self, team_id: &str) -> Result<usize> {
        let roster = self.get_roster(team_id)?;
        let index = self
            .rotation(team_id)?
            .current_index(roster.len(), self.today())?;
        let mut record = self
            .store
            .load_rotation_state(team_id)
            .unwrap_or_default();
        if record.current_index != index {
            tracing::debug!(
                team = team_id,
                from = record.current_index,
                to = index,
                "current index refreshed"
            );
        }
        record.current_index = index;
        self.store.save_rotation_state(team_id, &record)?;
        Ok(index)
    }

    /// Persist `team_id` as the selected team.
    pub fn select_team(&mut self, team_id: &str) -> Result<&'r Team> {
        let team = self.registry.get(team_id)?;
        self.store.save_selected_team(&team.id)?;
        tracing::info!(team = team_id, "team selected");
        Ok(team)
    }

    /// The persisted selection, if it still names a registered team.
    pub fn selected_team(&self) -> Option<&'r Team> {
        let id = self.store.load_selected_team()?;
        match self.registry.get(&id) {
            Ok(team) => Some(team),
            Err(_) => {
                tracing::warn!(team = %id, "ignoring selection of unknown team");
                None
            }
        }
    }

    /// Pick the team a command acts on: the explicit id, then the persisted
    /// selection, then the configured default, then the first team.
    pub fn resolve_team(&self, explicit: Option<&str>) -> Result<&'r Team, RotaError> {
        if let Some(id) = explicit {
            return self.registry.get(id);
        }
        if let Some(team) = self.selected_team() {
            return Ok(team);
        }
        if let Some(id) = &self.registry.default_team {
            return self.registry.get(id);
        }
        self.registry.teams.first().ok_or(RotaError::NoTeams)
    }

    /// Start the team's rotation over from `start_date`.
    pub fn restart(&mut self, team_id: &str, start_date: Date) -> Result<usize> {
        let team = self.registry.get(team_id)?;
        let rotation = Rotation::new(start_date, self.registry.cycle_day)
            .with_start_index(team.start_index);
        let index = rotation.current_index(team.roster.len(), self.today())?;
        let record = RotationRecord {
            start_date: Some(start_date),
            current_index: index,
        };
        self.store.save_rotation_state(team_id, &record)?;
        tracing::info!(
            team = team_id,
            start = %start_date,
            member = %self.get_current_member(team_id)?.name,
            "rotation restarted"
        );
        Ok(index)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::helpers::FixedClock;
    use time::macros::{date, datetime};

    fn config() -> Config {
        toml::from_str(
            r#"
[[teams]]
id = "dev"
name = "Development"
start_date = "2025-02-07"

[[teams.members]]
id = "a"
name = "Anna"

[[teams.members]]
id = "b"
name = "Ben"

[[teams.members]]
id = "c"
name = "Cleo"

[[teams.members]]
id = "d"
name = "Dan"

[[teams]]
id = "ops"
start_date = "2025-01-03"
start_index = 1

[[teams.members]]
id = "x"
name = "Xavier"

[[teams.members]]
id = "y"
name = "Yara"

[[teams]]
id = "empty"
start_date = "2025-01-03"
"#,
        )
        .unwrap()
    }

    fn state_at(
        registry: &TeamRegistry,
        today: Date,
    ) -> TeamState<'_, MemoryStore, FixedClock> {
        TeamState::new(
            registry,
            MemoryStore::default(),
            FixedClock(today.midnight().assume_utc()),
        )
    }

    #[test]
    fn test_registry_rejects_duplicate_team() {
        let mut config = config();
        let dup = config.teams[0].clone();
        config.teams.push(dup);
        let err = TeamRegistry::from_config(&config).unwrap_err();
        assert_eq!(err, RotaError::DuplicateTeam { id: "dev".into() });
    }

    #[test]
    fn test_registry_name_falls_back_to_id() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        assert_eq!(registry.get("ops").unwrap().name, "ops");
        assert_eq!(registry.get("dev").unwrap().name, "Development");
    }

    #[test]
    fn test_unknown_team_is_error() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(
            state.get_roster("nope").unwrap_err(),
            RotaError::TeamNotFound { id: "nope".into() }
        );
        assert!(state.get_current_member("nope").is_err());
    }

    #[test]
    fn test_current_member_follows_clock() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(state.get_current_member("dev").unwrap().id, "a");
        let state = state_at(&registry, date!(2025 - 02 - 10));
        assert_eq!(state.get_current_member("dev").unwrap().id, "b");
    }

    #[test]
    fn test_start_index_offsets_rotation() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let state = state_at(&registry, date!(2025 - 01 - 03));
        assert_eq!(state.get_current_member("ops").unwrap().id, "y");
    }

    #[test]
    fn test_empty_roster_queries_fail() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(
            state.current_turn("empty").unwrap_err(),
            RotaError::InvalidRoster { len: 0 }
        );
    }

    #[test]
    fn test_refresh_persists_index() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut state = state_at(&registry, date!(2025 - 02 - 21));
        assert_eq!(state.refresh_current_index("dev").unwrap(), 2);
        let record = state.store().load_rotation_state("dev").unwrap();
        assert_eq!(record.current_index, 2);
        assert!(record.start_date.is_none());
    }

    #[test]
    fn test_stale_cached_index_is_not_trusted() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut store = MemoryStore::default();
        store
            .save_rotation_state(
                "dev",
                &RotationRecord {
                    start_date: None,
                    current_index: 17,
                },
            )
            .unwrap();
        let clock = FixedClock(datetime!(2025-02-07 12:00 UTC));
        let mut state = TeamState::new(&registry, store, clock);
        assert_eq!(state.get_current_member("dev").unwrap().id, "a");
        assert_eq!(state.refresh_current_index("dev").unwrap(), 0);
    }

    #[test]
    fn test_restart_overrides_start_date() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut state = state_at(&registry, date!(2025 - 03 - 14));
        assert_eq!(state.get_current_member("dev").unwrap().id, "b");

        let index = state.restart("dev", date!(2025 - 03 - 14)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(state.get_start_date("dev").unwrap(), date!(2025 - 03 - 14));
        assert_eq!(state.get_current_member("dev").unwrap().id, "a");

        // refresh keeps the restart date
        state.refresh_current_index("dev").unwrap();
        assert_eq!(state.get_start_date("dev").unwrap(), date!(2025 - 03 - 14));
    }

    #[test]
    fn test_select_team_persists() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut state = state_at(&registry, date!(2025 - 02 - 07));
        state.select_team("ops").unwrap();
        assert_eq!(state.store().load_selected_team().as_deref(), Some("ops"));
        assert_eq!(state.resolve_team(None).unwrap().id, "ops");
    }

    #[test]
    fn test_select_unknown_team_fails_without_saving() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut state = state_at(&registry, date!(2025 - 02 - 07));
        let err = state.select_team("nope").unwrap_err();
        assert_eq!(
            err.downcast_ref::<RotaError>(),
            Some(&RotaError::TeamNotFound { id: "nope".into() })
        );
        assert!(state.store().load_selected_team().is_none());
    }

    #[test]
    fn test_resolve_team_order() {
        let mut config = config();
        let registry = TeamRegistry::from_config(&config).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(state.resolve_team(None).unwrap().id, "dev");
        assert_eq!(state.resolve_team(Some("ops")).unwrap().id, "ops");
        assert!(state.resolve_team(Some("nope")).is_err());

        config.default_team = Some("ops".into());
        let registry = TeamRegistry::from_config(&config).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(state.resolve_team(None).unwrap().id, "ops");
    }

    #[test]
    fn test_stale_selection_is_ignored() {
        let registry = TeamRegistry::from_config(&config()).unwrap();
        let mut store = MemoryStore::default();
        store.save_selected_team("gone").unwrap();
        let clock = FixedClock(datetime!(2025-02-07 00:00 UTC));
        let state = TeamState::new(&registry, store, clock);
        assert!(state.selected_team().is_none());
        assert_eq!(state.resolve_team(None).unwrap().id, "dev");
    }

    #[test]
    fn test_no_teams() {
        let registry = TeamRegistry::from_config(&Config::default()).unwrap();
        let state = state_at(&registry, date!(2025 - 02 - 07));
        assert_eq!(state.resolve_team(None).unwrap_err(), RotaError::NoTeams);
    }
}
