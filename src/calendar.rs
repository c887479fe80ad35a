//! Calendar arithmetic on whole days.
//!
//! Every function works on `time::Date`, so time-of-day never enters the
//! computation: a reference instant is reduced to its calendar date before it
//! reaches this module.
//!
//! Same-day policy: when a date already falls on the target weekday,
//! [`next_occurrence_of_weekday`] returns that date rather than the one a week
//! later. Every caller in the crate relies on this.

use serde::{Deserialize, Deserializer, Serializer};
use time::macros::format_description;
use time::{Date, Duration, Weekday};

use crate::error::RotaError;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<Date, RotaError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(RotaError::invalid_date(s, "empty input"));
    }
    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map_err(|e| RotaError::invalid_date(s, e.to_string()))
}

/// Parse a weekday name (`friday`, `Fri`, ...), case-insensitive.
pub fn parse_weekday(s: &str) -> Result<Weekday, RotaError> {
    let weekday = match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Weekday::Monday,
        "tuesday" | "tue" => Weekday::Tuesday,
        "wednesday" | "wed" => Weekday::Wednesday,
        "thursday" | "thu" => Weekday::Thursday,
        "friday" | "fri" => Weekday::Friday,
        "saturday" | "sat" => Weekday::Saturday,
        "sunday" | "sun" => Weekday::Sunday,
        _ => return Err(RotaError::invalid_date(s, "not a weekday name")),
    };
    Ok(weekday)
}

/// Move `date` by a signed number of days.
pub fn shift_days(date: Date, days: i64) -> Result<Date, RotaError> {
    date.checked_add(Duration::days(days))
        .ok_or(RotaError::DateOutOfRange)
}

fn days_ahead(from: Weekday, to: Weekday) -> i64 {
    let from = i64::from(from.number_days_from_monday());
    let to = i64::from(to.number_days_from_monday());
    (to - from).rem_euclid(7)
}

/// First date on or after `date` that falls on `target`.
pub fn next_occurrence_of_weekday(date: Date, target: Weekday) -> Result<Date, RotaError> {
    shift_days(date, days_ahead(date.weekday(), target))
}

/// The cycle-day instance that owns the (Monday-based) week of `date`.
///
/// On or before the cycle day this is the occurrence later in the same week;
/// past it, the one in the following week.
pub fn current_cycle_anchor(date: Date, target: Weekday) -> Result<Date, RotaError> {
    // With the same-day policy the owning occurrence is simply the next one.
    next_occurrence_of_weekday(date, target)
}

/// Absolute number of days between two dates.
pub fn days_between(a: Date, b: Date) -> i64 {
    (b - a).whole_days().abs()
}

/// Signed number of days from `from` to `to`.
///
/// Both ends are whole days, so the result is exact: a date one calendar day
/// ahead is always 1, never a truncated fraction.
pub fn days_until(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Whole weeks between two dates, `floor(days_between / 7)`.
pub fn weeks_between(a: Date, b: Date) -> i64 {
    days_between(a, b) / 7
}

/// Serde adapter storing a `Date` as `YYYY-MM-DD`.
pub mod iso_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_date(&s).map_err(serde::de::Error::custom)
    }

    /// Same encoding for `Option<Date>`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_some(&d.to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let s: Option<String> = Option::deserialize(deserializer)?;
            s.map(|s| parse_date(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Serde adapter reading a weekday from its English name.
pub mod weekday_name {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_weekday(&s).map_err(serde::de::Error::custom)
    }
}
