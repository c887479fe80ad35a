use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use time::Date;

#[derive(Parser)]
#[command(
    name = "friday-rota",
    version,
    about = "Weekly rotation of who brings breakfast on Friday"
)]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: Format,

    /// Directory where the search for .friday-rota.toml starts
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Team data file (skips the upward search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (default: <data dir>/friday-rota/state.json)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Pretend today is this date, for this run only
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    pub today: Option<Date>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show who brings breakfast this cycle
    #[command(alias = "now")]
    Current {
        #[arg(long)]
        team: Option<String>,
    },

    /// List the next turns
    Upcoming {
        #[arg(long)]
        team: Option<String>,

        /// Number of turns (default: rest of the roster)
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// List past turns, most recent first
    History {
        #[arg(long)]
        team: Option<String>,

        #[arg(long, short = 'n', conflicts_with = "all")]
        count: Option<usize>,

        /// Every turn since the start date
        #[arg(long)]
        all: bool,
    },

    /// Show the team's members in rotation order
    Roster {
        #[arg(long)]
        team: Option<String>,
    },

    /// List registered teams
    Teams,

    /// Select the team used when --team is omitted
    Select {
        /// Team id
        team: String,
    },

    /// Restart a team's rotation from a new start date
    Restart {
        #[arg(value_name = "YYYY-MM-DD", value_parser = parse_today)]
        start_date: Date,

        #[arg(long)]
        team: Option<String>,
    },

    /// List the team's allergens and who has them
    Allergens {
        #[arg(long)]
        team: Option<String>,
    },

    /// Upcoming birthdays
    Birthdays {
        #[arg(long)]
        team: Option<String>,

        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Upcoming name days
    #[command(name = "namedays")]
    NameDays {
        #[arg(long)]
        team: Option<String>,

        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Render the schedule page as a standalone HTML document
    Page {
        #[arg(long)]
        team: Option<String>,

        /// Write to FILE instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Inspect or pin the clock used for every date computation
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Show the current time and whether it is overridden
    Show,

    /// Pin the clock to an instant (YYYY-MM-DD or RFC 3339)
    Enable { instant: String },

    /// Return to the system clock
    Disable,

    /// Move the pinned clock by a number of days
    Advance {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
}

fn parse_today(s: &str) -> Result<Date, String> {
    crate::calendar::parse_date(s).map_err(|e| e.to_string())
}
