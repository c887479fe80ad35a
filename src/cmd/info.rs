use anyhow::Result;

use crate::cli::Format;
use crate::clock::Clock;
use crate::config::Config;
use crate::model::{AllergenResult, AnniversaryKind, AnniversaryResult};
use crate::output::{print_allergens, print_anniversaries};
use crate::store::StateStore;
use crate::team::TeamState;

use super::team_ref;

pub fn cmd_allergens<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    team: Option<&str>,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    let result = AllergenResult {
        team: team_ref(team),
        allergens: team.roster.allergens().into_iter().collect(),
        members: team.roster.members_with_allergens(),
    };
    print_allergens(&result, format);
    Ok(())
}

pub fn cmd_anniversaries<S: StateStore, C: Clock>(
    state: &TeamState<'_, S, C>,
    config: &Config,
    team: Option<&str>,
    kind: AnniversaryKind,
    count: Option<usize>,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    let today = state.today();
    let entries = team
        .roster
        .upcoming(kind, today, count.unwrap_or(config.anniversary_count))?;

    let result = AnniversaryResult {
        team: team_ref(team),
        today,
        kind,
        entries,
    };
    print_anniversaries(&result, format);
    Ok(())
}
