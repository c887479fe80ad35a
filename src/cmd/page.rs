use std::path::Path;

use anyhow::{Context, Result};

use crate::clock::{format_instant, Clock};
use crate::config::Config;
use crate::model::PageResult;
use crate::output::html::render_page;
use crate::store::StateStore;
use crate::team::TeamState;

use super::team_ref;

/// Gather everything shown on the schedule page for one team.
pub(crate) fn build_page<'r, S: StateStore, C: Clock>(
    state: &TeamState<'r, S, C>,
    config: &Config,
    team: Option<&str>,
) -> Result<PageResult<'r>> {
    let team = state.resolve_team(team)?;
    let today = state.today();
    let rotation = state.rotation(&team.id)?;
    let members = team.roster.members();

    Ok(PageResult {
        team: team_ref(team),
        today,
        generated_at: format_instant(state.clock().now()),
        current: rotation.current_turn(members, today)?,
        upcoming: rotation.upcoming_turns(members, today, config.upcoming_count)?,
        history: rotation.past_turns(members, today, Some(config.history_count))?,
        members,
        allergens: team.roster.allergens().into_iter().collect(),
        members_with_allergens: team.roster.members_with_allergens(),
        birthdays: team
            .roster
            .upcoming_birthdays(today, config.anniversary_count)?,
        name_days: team
            .roster
            .upcoming_name_days(today, config.anniversary_count)?,
    })
}

pub fn cmd_page<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    config: &Config,
    team: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let page = build_page(state, config, team)?;
    let html = render_page(&page);

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
