mod anniversary;
mod calendar;
mod cli;
mod clock;
mod cmd;
mod config;
mod error;
mod logging;
mod model;
mod output;
mod roster;
mod rotation;
mod store;
mod team;
#[cfg(test)]
mod test_helpers;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use clock::{format_instant, Clock, ClockProvider};
use cmd::*;
use config::Config;
use model::AnniversaryKind;
use store::{default_state_path, FileStore, StateStore};
use team::{TeamRegistry, TeamState};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(2);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions { shell } = cli.command {
        return cmd_completions(shell);
    }

    let state_path = match cli.state {
        Some(p) => p,
        None => default_state_path()?,
    };
    let mut store = FileStore::open(&state_path);
    let mut clock = ClockProvider::system(store.load_clock());
    if clock.is_overridden() {
        tracing::info!(now = %format_instant(clock.now()), "clock override active");
    }

    if let Command::Clock { ref action } = cli.command {
        return cmd_clock(&mut store, clock, action, &cli.format);
    }

    // One-shot override, never written back.
    if let Some(today) = cli.today {
        clock.enable_override(today.midnight().assume_utc());
    }

    let root = match cli.root {
        Some(p) => p,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::load(&root)?,
    };
    let registry = TeamRegistry::from_config(&config)?;
    let mut state = TeamState::new(&registry, store, clock);

    // A simulated date must not leak into the cached index.
    let persist_index = cli.today.is_none();
    let format = &cli.format;
    match cli.command {
        Command::Current { team } => {
            cmd_current(&mut state, team.as_deref(), persist_index, format)
        }
        Command::Upcoming { team, count } => {
            cmd_upcoming(&state, &config, team.as_deref(), count, format)
        }
        Command::History { team, count, all } => {
            cmd_history(&state, &config, team.as_deref(), count, all, format)
        }
        Command::Roster { team } => cmd_roster(&state, team.as_deref(), format),
        Command::Teams => cmd_teams(&state, format),
        Command::Select { team } => cmd_select(&mut state, &team, format),
        Command::Restart { start_date, team } => {
            cmd_restart(&mut state, team.as_deref(), start_date, format)
        }
        Command::Allergens { team } => cmd_allergens(&state, team.as_deref(), format),
        Command::Birthdays { team, count } => cmd_anniversaries(
            &state,
            &config,
            team.as_deref(),
            AnniversaryKind::Birthday,
            count,
            format,
        ),
        Command::NameDays { team, count } => cmd_anniversaries(
            &state,
            &config,
            team.as_deref(),
            AnniversaryKind::NameDay,
            count,
            format,
        ),
        Command::Page { team, output } => {
            cmd_page(&state, &config, team.as_deref(), output.as_deref())
        }
        Command::Clock { .. } | Command::Completions { .. } => unreachable!(),
    }
}
