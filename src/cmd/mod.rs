mod clock;
mod completions;
mod current;
mod info;
mod page;
mod schedule;
mod team;

pub use self::clock::cmd_clock;
pub use self::completions::cmd_completions;
pub use self::current::cmd_current;
pub use self::info::{cmd_allergens, cmd_anniversaries};
pub use self::page::cmd_page;
pub use self::schedule::{cmd_history, cmd_upcoming};
pub use self::team::{cmd_restart, cmd_roster, cmd_select, cmd_teams};

use crate::model::TeamRef;
use crate::team::Team;

pub(crate) fn team_ref(team: &Team) -> TeamRef<'_> {
    TeamRef {
        id: &team.id,
        name: &team.name,
    }
}
