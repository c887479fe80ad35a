use serde::Serialize;
use time::Date;

use crate::anniversary::MonthDay;
use crate::calendar::iso_date;
use crate::roster::Member;

/// One scheduled occurrence of the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn<'a> {
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Position of `member` in the roster
    pub index: usize,
    pub member: &'a Member,
    /// Days from the reference date; past turns report 0
    pub days_remaining: i64,
    pub is_today: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnniversaryKind {
    Birthday,
    NameDay,
}

impl AnniversaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnniversaryKind::Birthday => "Birthdays",
            AnniversaryKind::NameDay => "Name days",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Anniversary<'a> {
    pub member: &'a Member,
    pub kind: AnniversaryKind,
    pub month_day: MonthDay,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TeamRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CurrentResult<'a> {
    pub team: TeamRef<'a>,
    #[serde(with = "iso_date")]
    pub today: Date,
    pub turn: Turn<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    Upcoming,
    History,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResult<'a> {
    pub team: TeamRef<'a>,
    #[serde(with = "iso_date")]
    pub today: Date,
    pub kind: ScheduleKind,
    pub turns: Vec<Turn<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RosterResult<'a> {
    pub team: TeamRef<'a>,
    /// None for an empty roster
    pub current_index: Option<usize>,
    pub members: &'a [Member],
}

#[derive(Debug, Serialize)]
pub struct TeamSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub members: usize,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct TeamsResult<'a> {
    pub teams: Vec<TeamSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AllergenResult<'a> {
    pub team: TeamRef<'a>,
    pub allergens: Vec<&'a str>,
    pub members: Vec<&'a Member>,
}

#[derive(Debug, Serialize)]
pub struct AnniversaryResult<'a> {
    pub team: TeamRef<'a>,
    #[serde(with = "iso_date")]
    pub today: Date,
    pub kind: AnniversaryKind,
    pub entries: Vec<Anniversary<'a>>,
}

/// Everything the schedule page shows for one team.
#[derive(Debug, Serialize)]
pub struct PageResult<'a> {
    pub team: TeamRef<'a>,
    #[serde(with = "iso_date")]
    pub today: Date,
    pub generated_at: String,
    pub current: Turn<'a>,
    pub upcoming: Vec<Turn<'a>>,
    pub history: Vec<Turn<'a>>,
    pub members: &'a [Member],
    pub allergens: Vec<&'a str>,
    pub members_with_allergens: Vec<&'a Member>,
    pub birthdays: Vec<Anniversary<'a>>,
    pub name_days: Vec<Anniversary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ClockResult {
    pub overridden: bool,
    pub now: String,
    #[serde(with = "iso_date")]
    pub today: Date,
}

#[derive(Debug, Serialize)]
pub struct SelectResult<'a> {
    pub selected: TeamRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct RestartResult<'a> {
    pub team: TeamRef<'a>,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    pub current: Turn<'a>,
}
