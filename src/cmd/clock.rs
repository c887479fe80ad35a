use anyhow::Result;

use crate::cli::{ClockAction, Format};
use crate::clock::{format_instant, parse_instant, Clock, ClockProvider};
use crate::model::ClockResult;
use crate::output::print_clock;
use crate::store::StateStore;

/// Apply a clock action and persist the resulting override.
pub(crate) fn apply_clock_action<S: StateStore, C: Clock>(
    store: &mut S,
    clock: &mut ClockProvider<C>,
    action: &ClockAction,
) -> Result<()> {
    match action {
        ClockAction::Show => return Ok(()),
        ClockAction::Enable { instant } => clock.enable_override(parse_instant(instant)?),
        ClockAction::Disable => clock.disable_override(),
        ClockAction::Advance { days } => clock.advance_override(*days)?,
    }
    store.save_clock(clock.override_state())?;
    tracing::info!(
        overridden = clock.is_overridden(),
        now = %format_instant(clock.now()),
        "clock updated"
    );
    Ok(())
}

pub fn cmd_clock<S: StateStore, C: Clock>(
    store: &mut S,
    mut clock: ClockProvider<C>,
    action: &ClockAction,
    format: &Format,
) -> Result<()> {
    apply_clock_action(store, &mut clock, action)?;

    let result = ClockResult {
        overridden: clock.is_overridden(),
        now: format_instant(clock.now()),
        today: clock.today(),
    };
    print_clock(&result, format);
    Ok(())
}
