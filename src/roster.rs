use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use time::Date;

use crate::anniversary::{days_until_annual_occurrence, next_annual_occurrence, MonthDay};
use crate::error::RotaError;
use crate::model::{Anniversary, AnniversaryKind};

/// One rotation participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct Member {
    /// Stable identifier, unique within the team
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar initials; derived from the name when omitted
    #[serde(default)]
    pub initials: String,
    /// Job title or role
    #[serde(default)]
    pub position: String,
    /// Food allergens to avoid when this team's breakfast is bought
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    /// Birthday as MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub birthdate: Option<MonthDay>,
    /// Name day as MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub name_day: Option<MonthDay>,
}

impl Member {
    #[cfg(test)]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            initials: initials_from_name(name),
            position: String::new(),
            allergens: BTreeSet::new(),
            birthdate: None,
            name_day: None,
        }
    }

    pub fn has_allergens(&self) -> bool {
        !self.allergens.is_empty()
    }
}

fn initials_from_name(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Ordered rotation sequence. Order is fixed at construction and never
/// changed by rotation queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Build a roster, rejecting repeated member ids.
    pub fn new(team_id: &str, members: Vec<Member>) -> Result<Self, RotaError> {
        let mut seen = HashSet::new();
        let mut members = members;
        for member in &mut members {
            if !seen.insert(member.id.clone()) {
                return Err(RotaError::DuplicateMember {
                    team: team_id.to_string(),
                    id: member.id.clone(),
                });
            }
            if member.initials.trim().is_empty() {
                member.initials = initials_from_name(&member.name);
            }
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Unique allergens across the team, sorted.
    pub fn allergens(&self) -> BTreeSet<&str> {
        self.members
            .iter()
            .flat_map(|m| m.allergens.iter().map(String::as_str))
            .collect()
    }

    /// Members with at least one allergen, in roster order.
    pub fn members_with_allergens(&self) -> Vec<&Member> {
        self.members.iter().filter(|m| m.has_allergens()).collect()
    }

    pub fn upcoming_birthdays(
        &self,
        reference: Date,
        count: usize,
    ) -> Result<Vec<Anniversary<'_>>, RotaError> {
        self.upcoming(AnniversaryKind::Birthday, reference, count)
    }

    pub fn upcoming_name_days(
        &self,
        reference: Date,
        count: usize,
    ) -> Result<Vec<Anniversary<'_>>, RotaError> {
        self.upcoming(AnniversaryKind::NameDay, reference, count)
    }

    /// Next occurrences of one kind of anniversary, soonest first.
    ///
    /// Members without that date are skipped; ties keep roster order.
    pub fn upcoming(
        &self,
        kind: AnniversaryKind,
        reference: Date,
        count: usize,
    ) -> Result<Vec<Anniversary<'_>>, RotaError> {
        let mut entries = Vec::new();
        for member in &self.members {
            let month_day = match kind {
                AnniversaryKind::Birthday => member.birthdate,
                AnniversaryKind::NameDay => member.name_day,
            };
            let Some(month_day) = month_day else {
                continue;
            };
            entries.push(Anniversary {
                member,
                kind,
                month_day,
                date: next_annual_occurrence(month_day, reference)?,
                days_remaining: days_until_annual_occurrence(month_day, reference)?,
            });
        }
        entries.sort_by_key(|e| e.days_remaining);
        entries.truncate(count);
        Ok(entries)
    }
}
