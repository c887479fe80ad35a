use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, Month};

use crate::calendar;
use crate::error::RotaError;

/// Longest possible length of each month, leap years included.
const MAX_DAYS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// An annual recurrence such as a birthday, written `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    pub fn new(month: u8, day: u8) -> Result<Self, RotaError> {
        let raw = format!("{month:02}-{day:02}");
        if !(1..=12).contains(&month) {
            return Err(RotaError::invalid_date(&raw, "month must be 1..=12"));
        }
        let max = MAX_DAYS[usize::from(month - 1)];
        if day == 0 || day > max {
            return Err(RotaError::invalid_date(
                &raw,
                format!("day must be 1..={max} for month {month}"),
            ));
        }
        Ok(Self { month, day })
    }

    /// The concrete date of this recurrence in `year`.
    ///
    /// February 29th resolves to March 1st in years without one.
    pub fn in_year(self, year: i32) -> Result<Date, RotaError> {
        let (month, day) = if self.month == 2 && self.day == 29 && !time::util::is_leap_year(year)
        {
            (3, 1)
        } else {
            (self.month, self.day)
        };
        let month = Month::try_from(month).map_err(|_| RotaError::DateOutOfRange)?;
        Date::from_calendar_date(year, month, day).map_err(|_| RotaError::DateOutOfRange)
    }

    /// Human label, e.g. `15 April`.
    pub fn label(self) -> String {
        match Month::try_from(self.month) {
            Ok(m) => format!("{} {}", self.day, m),
            Err(_) => self.to_string(),
        }
    }
}

impl FromStr for MonthDay {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (m, d) = trimmed
            .split_once('-')
            .ok_or_else(|| RotaError::invalid_date(s, "expected MM-DD"))?;
        let month: u8 = m
            .parse()
            .map_err(|_| RotaError::invalid_date(s, "month is not a number"))?;
        let day: u8 = d
            .parse()
            .map_err(|_| RotaError::invalid_date(s, "day is not a number"))?;
        MonthDay::new(month, day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Nearest date on or after `reference` on which `month_day` falls.
pub fn next_annual_occurrence(month_day: MonthDay, reference: Date) -> Result<Date, RotaError> {
    let this_year = month_day.in_year(reference.year())?;
    if this_year >= reference {
        return Ok(this_year);
    }
    month_day.in_year(reference.year() + 1)
}

/// Days from `reference` to the next occurrence of `month_day`; 0 on the day.
pub fn days_until_annual_occurrence(
    month_day: MonthDay,
    reference: Date,
) -> Result<i64, RotaError> {
    let next = next_annual_occurrence(month_day, reference)?;
    Ok(calendar::days_until(reference, next))
}
