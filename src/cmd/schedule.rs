use anyhow::Result;

use crate::cli::Format;
use crate::clock::Clock;
use crate::config::Config;
use crate::model::{ScheduleKind, ScheduleResult};
use crate::output::print_schedule;
use crate::store::StateStore;
use crate::team::TeamState;

use super::team_ref;

pub fn cmd_upcoming<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    config: &Config,
    team: Option<&str>,
    count: Option<usize>,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    let today = state.today();
    let turns = state.rotation(&team.id)?.upcoming_turns(
        team.roster.members(),
        today,
        count.or(config.upcoming_count),
    )?;

    let result = ScheduleResult {
        team: team_ref(team),
        today,
        kind: ScheduleKind::Upcoming,
        turns,
    };
    print_schedule(&result, format);
    Ok(())
}

pub fn cmd_history<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    config: &Config,
    team: Option<&str>,
    count: Option<usize>,
    all: bool,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    let today = state.today();
    let limit = if all {
        None
    } else {
        Some(count.unwrap_or(config.history_count))
    };
    let turns = state
        .rotation(&team.id)?
        .past_turns(team.roster.members(), today, limit)?;

    let result = ScheduleResult {
        team: team_ref(team),
        today,
        kind: ScheduleKind::History,
        turns,
    };
    print_schedule(&result, format);
    Ok(())
}
