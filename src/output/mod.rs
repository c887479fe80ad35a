pub mod html;
mod markdown;

use colored::*;
use serde::Serialize;

use crate::cli::Format;
use crate::model::*;
use crate::roster::Member;

use markdown::relative_days;

fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).expect("failed to serialize");
    println!("{}", json);
}

fn member_label(member: &Member) -> String {
    format!("{} [{}]", member.name, member.initials)
}

fn allergen_text(member: &Member) -> String {
    member
        .allergens
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn colorize_when(days: i64) -> ColoredString {
    let text = relative_days(days);
    match days {
        0 => text.green().bold(),
        1..=2 => text.yellow(),
        _ => text.normal(),
    }
}

fn team_header(team: &TeamRef) -> ColoredString {
    format!("{} ({})", team.name, team.id).bold().underline()
}

pub fn print_current(result: &CurrentResult, format: &Format) {
    match format {
        Format::Text => {
            let turn = &result.turn;
            println!("{}", team_header(&result.team));
            if turn.is_today {
                println!(
                    "  Today: {} brings breakfast",
                    member_label(turn.member).green().bold()
                );
            } else {
                println!(
                    "  Next: {} on {} {} ({})",
                    member_label(turn.member).bold(),
                    turn.date.weekday(),
                    turn.date,
                    colorize_when(turn.days_remaining)
                );
            }
            if turn.member.has_allergens() {
                println!("  Allergens: {}", allergen_text(turn.member).red());
            }
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_current(result)),
    }
}

pub fn print_schedule(result: &ScheduleResult, format: &Format) {
    match format {
        Format::Text => {
            let title = match result.kind {
                ScheduleKind::Upcoming => "Upcoming turns",
                ScheduleKind::History => "Past turns",
            };
            println!("{}", format!("{}: {}", title, result.team.name).bold().underline());
            for turn in &result.turns {
                let when = match result.kind {
                    ScheduleKind::Upcoming => colorize_when(turn.days_remaining),
                    ScheduleKind::History => "".normal(),
                };
                println!(
                    "  {}  {:>2}. {}  {}",
                    turn.date,
                    turn.index + 1,
                    member_label(turn.member),
                    when
                );
            }
            if result.turns.is_empty() {
                println!("  {}", "no turns".dimmed());
            }
            println!("\n{} turns", result.turns.len());
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_schedule(result)),
    }
}

pub fn print_roster(result: &RosterResult, format: &Format) {
    match format {
        Format::Text => {
            println!("{}", team_header(&result.team));
            for (i, member) in result.members.iter().enumerate() {
                let mut line = format!("{:>4}. {}", i + 1, member_label(member));
                if !member.position.is_empty() {
                    line.push_str(&format!("  {}", member.position.dimmed()));
                }
                if member.has_allergens() {
                    line.push_str(&format!("  ({})", allergen_text(member).red()));
                }
                if result.current_index == Some(i) {
                    println!("{} {}", "▶".green().bold(), line.trim_start());
                } else {
                    println!("{}", line);
                }
            }
            println!("\n{} members", result.members.len());
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_roster(result)),
    }
}

pub fn print_teams(result: &TeamsResult, format: &Format) {
    match format {
        Format::Text => {
            for team in &result.teams {
                let marker = if team.selected { "*".green().bold() } else { " ".normal() };
                println!(
                    "{} {:<12} {}  {} members, since {}",
                    marker,
                    team.id.bold(),
                    team.name,
                    team.members,
                    team.start_date
                );
            }
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_teams(result)),
    }
}

pub fn print_allergens(result: &AllergenResult, format: &Format) {
    match format {
        Format::Text => {
            println!("{}", team_header(&result.team));
            if result.allergens.is_empty() {
                println!("  {}", "no allergens".green());
                return;
            }
            println!("  Avoid: {}", result.allergens.join(", ").red().bold());
            for member in &result.members {
                println!("  {}: {}", member_label(member), allergen_text(member));
            }
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_allergens(result)),
    }
}

pub fn print_anniversaries(result: &AnniversaryResult, format: &Format) {
    match format {
        Format::Text => {
            println!(
                "{}",
                format!("{}: {}", result.kind.as_str(), result.team.name)
                    .bold()
                    .underline()
            );
            for entry in &result.entries {
                println!(
                    "  {:<12} {}  {}",
                    entry.month_day.label(),
                    member_label(entry.member),
                    colorize_when(entry.days_remaining)
                );
            }
            if result.entries.is_empty() {
                println!("  {}", "none recorded".dimmed());
            }
        }
        Format::Json => print_json(result),
        Format::Markdown => print!("{}", markdown::format_anniversaries(result)),
    }
}

pub fn print_select(result: &SelectResult, format: &Format) {
    match format {
        Format::Json => print_json(result),
        _ => println!(
            "Selected team {} ({})",
            result.selected.name.bold(),
            result.selected.id
        ),
    }
}

pub fn print_restart(result: &RestartResult, format: &Format) {
    match format {
        Format::Json => print_json(result),
        _ => println!(
            "Restarted {} from {}; current turn: {} on {}",
            result.team.name.bold(),
            result.start_date,
            member_label(result.current.member),
            result.current.date
        ),
    }
}

pub fn print_clock(result: &ClockResult, format: &Format) {
    match format {
        Format::Json => print_json(result),
        _ => {
            let mode = if result.overridden {
                "overridden".yellow().bold()
            } else {
                "system".green()
            };
            println!("Clock: {} ({}), today is {}", mode, result.now, result.today);
        }
    }
}
