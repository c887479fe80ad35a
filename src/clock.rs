//! The clock every date computation reads. `ClockProvider` wraps the system
//! clock with an optional fixed instant; the caller persists that override
//! through the state store, so it outlives a single run.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, OffsetDateTime};

use crate::calendar;
use crate::error::RotaError;

/// Source of "now" for every time-dependent computation.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;

    /// The calendar date of [`Clock::now`], in the clock's own offset.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Wall-clock time, in the local offset when it can be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// A pinned instant that replaces the wall clock while enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockOverride {
    pub enabled: bool,
    #[serde(with = "rfc3339_option")]
    pub fixed_instant: Option<OffsetDateTime>,
}

impl ClockOverride {
    fn active_instant(&self) -> Option<OffsetDateTime> {
        if self.enabled {
            self.fixed_instant
        } else {
            None
        }
    }
}

/// A [`Clock`] that defers to `base` unless an override is active.
#[derive(Debug, Clone)]
pub struct ClockProvider<C = SystemClock> {
    base: C,
    state: ClockOverride,
}

impl ClockProvider<SystemClock> {
    pub fn system(state: ClockOverride) -> Self {
        Self::new(SystemClock, state)
    }
}

impl<C: Clock> ClockProvider<C> {
    pub fn new(base: C, state: ClockOverride) -> Self {
        Self { base, state }
    }

    pub fn enable_override(&mut self, instant: OffsetDateTime) {
        self.state = ClockOverride {
            enabled: true,
            fixed_instant: Some(instant),
        };
    }

    pub fn disable_override(&mut self) {
        self.state = ClockOverride::default();
    }

    /// Move the pinned instant by `delta_days` (negative goes back).
    pub fn advance_override(&mut self, delta_days: i64) -> Result<(), RotaError> {
        let current = self
            .state
            .active_instant()
            .ok_or(RotaError::NoClockOverride)?;
        let moved = current
            .checked_add(Duration::days(delta_days))
            .ok_or(RotaError::DateOutOfRange)?;
        self.state.fixed_instant = Some(moved);
        Ok(())
    }

    pub fn is_overridden(&self) -> bool {
        self.state.active_instant().is_some()
    }

    pub fn override_state(&self) -> ClockOverride {
        self.state
    }
}

impl<C: Clock> Clock for ClockProvider<C> {
    fn now(&self) -> OffsetDateTime {
        self.state.active_instant().unwrap_or_else(|| self.base.now())
    }
}

/// Parse an override instant: RFC 3339, or a bare `YYYY-MM-DD` meaning
/// midnight UTC on that date.
pub fn parse_instant(s: &str) -> Result<OffsetDateTime, RotaError> {
    let trimmed = s.trim();
    if let Ok(instant) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(instant);
    }
    let date = calendar::parse_date(trimmed)?;
    Ok(date.midnight().assume_utc())
}

pub fn format_instant(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.date().to_string())
}

mod rfc3339_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        instant: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(i) => serializer.serialize_some(&format_instant(*i)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom))
            .transpose()
    }
}
