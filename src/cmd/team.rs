use anyhow::Result;
use time::Date;

use crate::cli::Format;
use crate::clock::Clock;
use crate::model::{RestartResult, RosterResult, SelectResult, TeamSummary, TeamsResult};
use crate::output::{print_restart, print_roster, print_select, print_teams};
use crate::store::StateStore;
use crate::team::TeamState;

use super::team_ref;

pub fn cmd_roster<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    team: Option<&str>,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    let current_index = if team.roster.is_empty() {
        None
    } else {
        Some(
            state
                .rotation(&team.id)?
                .current_index(team.roster.len(), state.today())?,
        )
    };

    let result = RosterResult {
        team: team_ref(team),
        current_index,
        members: team.roster.members(),
    };
    print_roster(&result, format);
    Ok(())
}

pub fn cmd_teams<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    format: &Format,
) -> Result<()> {
    let active = state.resolve_team(None).ok().map(|t| t.id.as_str());

    let mut teams = Vec::new();
    for team in state.registry().teams() {
        teams.push(TeamSummary {
            id: &team.id,
            name: &team.name,
            members: team.roster.len(),
            start_date: state.get_start_date(&team.id)?,
            selected: active == Some(team.id.as_str()),
        });
    }

    print_teams(&TeamsResult { teams }, format);
    Ok(())
}

pub fn cmd_select<S: StateStore, C: Clock>(
    state: &mut TeamState<'_, S, C>,
    team: &str,
    format: &Format,
) -> Result<()> {
    let team = state.select_team(team)?;
    print_select(
        &SelectResult {
            selected: team_ref(team),
        },
        format,
    );
    Ok(())
}

pub fn cmd_restart<S: StateStore, C: Clock>(
    state: &mut TeamState<'_, S, C>,
    team: Option<&str>,
    start_date: Date,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    state.restart(&team.id, start_date)?;

    let result = RestartResult {
        team: team_ref(team),
        start_date,
        current: state.current_turn(&team.id)?,
    };
    print_restart(&result, format);
    Ok(())
}
