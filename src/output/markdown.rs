use crate::model::*;
use crate::roster::Member;

/// Escape characters that break markdown table cells.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
        .replace('\n', " ")
        .replace('\r', "")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('`', "\\`")
}

fn allergen_cell(member: &Member) -> String {
    let list: Vec<&str> = member.allergens.iter().map(String::as_str).collect();
    escape_cell(&list.join(", "))
}

pub(super) fn relative_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

pub fn format_current(result: &CurrentResult) -> String {
    let turn = &result.turn;
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("## {}", escape_cell(result.team.name)));
    lines.push(String::new());
    let who = format!(
        "**{}** ({})",
        escape_cell(&turn.member.name),
        escape_cell(&turn.member.initials)
    );
    if turn.is_today {
        lines.push(format!("Today, {} brings breakfast.", who));
    } else {
        lines.push(format!(
            "{} brings breakfast on {} {} ({}).",
            who,
            turn.date.weekday(),
            turn.date,
            relative_days(turn.days_remaining)
        ));
    }
    if turn.member.has_allergens() {
        lines.push(String::new());
        lines.push(format!("Allergens: {}", allergen_cell(turn.member)));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_schedule(result: &ScheduleResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("| Date | # | Member | When |".to_string());
    lines.push("|------|---|--------|------|".to_string());

    for turn in &result.turns {
        let when = match result.kind {
            ScheduleKind::Upcoming => relative_days(turn.days_remaining),
            ScheduleKind::History => "done".to_string(),
        };
        lines.push(format!(
            "| {} | {} | {} | {} |",
            turn.date,
            turn.index + 1,
            escape_cell(&turn.member.name),
            when
        ));
    }

    lines.push(String::new());
    lines.push(format!("**{} turns**", result.turns.len()));
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_roster(result: &RosterResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("| # | Member | Initials | Position | Allergens | Current |".to_string());
    lines.push("|---|--------|----------|----------|-----------|---------|".to_string());

    for (i, member) in result.members.iter().enumerate() {
        let current = if result.current_index == Some(i) { "yes" } else { "" };
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            i + 1,
            escape_cell(&member.name),
            escape_cell(&member.initials),
            escape_cell(&member.position),
            allergen_cell(member),
            current
        ));
    }

    lines.push(String::new());
    lines.push(format!("**{} members**", result.members.len()));
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_teams(result: &TeamsResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("| Id | Name | Members | Start | Selected |".to_string());
    lines.push("|----|------|---------|-------|----------|".to_string());

    for team in &result.teams {
        let selected = if team.selected { "yes" } else { "" };
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            escape_cell(team.id),
            escape_cell(team.name),
            team.members,
            team.start_date,
            selected
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

pub fn format_allergens(result: &AllergenResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if result.allergens.is_empty() {
        lines.push("No allergens in this team.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    let all: Vec<String> = result.allergens.iter().map(|a| escape_cell(a)).collect();
    lines.push(format!("**Allergens:** {}", all.join(", ")));
    lines.push(String::new());
    lines.push("| Member | Allergens |".to_string());
    lines.push("|--------|-----------|".to_string());
    for member in &result.members {
        lines.push(format!(
            "| {} | {} |",
            escape_cell(&member.name),
            allergen_cell(member)
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_anniversaries(result: &AnniversaryResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("| Date | Member | When |".to_string());
    lines.push("|------|--------|------|".to_string());

    for entry in &result.entries {
        lines.push(format!(
            "| {} | {} | {} |",
            entry.month_day.label(),
            escape_cell(&entry.member.name),
            relative_days(entry.days_remaining)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "**{} {}**",
        result.entries.len(),
        result.kind.as_str().to_lowercase()
    ));
    lines.push(String::new());
    lines.join("\n")
}
