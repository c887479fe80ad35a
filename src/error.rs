//! Error types for the rotation core.

/// Error type for every fallible operation in the calendar, rotation,
/// anniversary and team modules.
///
/// Command code wraps these in `anyhow` with context; the core itself
/// never swallows or defaults them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotaError {
    /// A rotation query was made against an empty roster.
    #[error("invalid roster: rotation needs at least one member (got {len})")]
    InvalidRoster {
        /// Length of the offending roster.
        len: usize,
    },

    /// No team is registered under the requested id.
    #[error("team not found: '{id}'")]
    TeamNotFound {
        /// The unknown team id.
        id: String,
    },

    /// A date or month-day string could not be parsed.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The raw input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Date arithmetic left the range the calendar can represent.
    #[error("date out of range")]
    DateOutOfRange,

    /// The clock override was advanced while disabled.
    #[error("clock override is not enabled")]
    NoClockOverride,

    /// The registry holds no teams, so there is nothing to select.
    #[error("no teams configured")]
    NoTeams,

    /// Two teams in the registry share an id.
    #[error("duplicate team id: '{id}'")]
    DuplicateTeam {
        /// The repeated id.
        id: String,
    },

    /// Two members of one roster share an id.
    #[error("duplicate member id '{id}' in team '{team}'")]
    DuplicateMember {
        /// Team whose roster holds the duplicate.
        team: String,
        /// The repeated member id.
        id: String,
    },
}

impl RotaError {
    pub(crate) fn invalid_date(input: &str, reason: impl Into<String>) -> Self {
        RotaError::InvalidDate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
