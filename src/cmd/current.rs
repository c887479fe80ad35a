use anyhow::Result;

use crate::cli::Format;
use crate::clock::Clock;
use crate::model::CurrentResult;
use crate::output::print_current;
use crate::store::StateStore;
use crate::team::TeamState;

use super::team_ref;

pub fn cmd_current<S: StateStore, C: Clock>(
    state: &mut TeamState<'_, S, C>,
    team: Option<&str>,
    persist_index: bool,
    format: &Format,
) -> Result<()> {
    let team = state.resolve_team(team)?;
    if persist_index {
        state.refresh_current_index(&team.id)?;
    }

    let result = CurrentResult {
        team: team_ref(team),
        today: state.today(),
        turn: state.current_turn(&team.id)?,
    };
    print_current(&result, format);
    Ok(())
}
