//! Argument definitions for the `positions` shell.

use clap::{Args, Parser, Subcommand, ValueEnum};
use positions_core::NumberFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "positions",
    version,
    about = "365 positions tracker - one number per day, each number once"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite database file (default: $POSITIONS_DB_PATH or the temp dir).
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error; default: $POSITIONS_LOG_LEVEL).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show pick counts and the latest pick.
    Status,
    /// Print a month grid (defaults to the current month).
    Calendar(CalendarArgs),
    /// Print the number board.
    Board(BoardArgs),
    /// Check whether a number is still available.
    Check {
        #[arg(value_name = "NUMBER")]
        number: String,
    },
    /// Lock in NUMBER for DATE (YYYY-MM-DD). Cannot be undone.
    Pick {
        #[arg(value_name = "DATE")]
        date: String,
        #[arg(value_name = "NUMBER")]
        number: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Write the export document (default: ./positions-tracker-export.json).
    Export {
        #[arg(long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Replace all picks with the entries of an export document.
    Import {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        #[arg(long)]
        yes: bool,
    },
    /// Remove all picks.
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Year to show.
    #[arg(long, requires = "month")]
    pub year: Option<i32>,
    /// Month to show (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Step back N months from the starting month.
    #[arg(long, value_name = "N", conflicts_with = "next")]
    pub prev: Option<u32>,
    /// Step forward N months from the starting month.
    #[arg(long, value_name = "N")]
    pub next: Option<u32>,
}

#[derive(Args)]
pub struct BoardArgs {
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Available,
    Used,
}

impl From<FilterArg> for NumberFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => NumberFilter::All,
            FilterArg::Available => NumberFilter::Available,
            FilterArg::Used => NumberFilter::Used,
        }
    }
}
