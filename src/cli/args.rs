use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "sleeptrack")]
#[command(about = "Track your sleep and rate how well you slept")]
#[command(long_about = "sleeptrack - a sleep tracker for the terminal

Start tracking when you go to bed, stop when you wake up, then rate how
well you slept. Nights are stored in a local SQLite database.

QUICK START:
  sleeptrack start          Start tracking tonight
  sleeptrack stop           Stop tracking and rate the night
  sleeptrack rate 4         Rate the most recent night (0-5)
  sleeptrack list           Show every recorded night
  sleeptrack tui            Interactive tracker screen

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` setting in config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory holding config.yaml and sleep.db
    #[arg(long, env = "SLEEPTRACK_HOME", global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking a night
    ///
    /// Records the current time as the start of tonight's sleep. If a night
    /// is already being tracked it is left untouched.
    Start,

    /// Stop tracking the current night
    ///
    /// Records the current time as the end of the open night. Rate it
    /// afterwards with 'sleeptrack rate'.
    Stop,

    /// Show the night currently being tracked
    Status,

    /// Rate how well you slept
    ///
    /// Accepts a number from 0 (very bad) to 5 (excellent) or a name such as
    /// "so-so" or "pretty good".
    ///
    /// Examples:
    ///   sleeptrack rate 4
    ///   sleeptrack rate excellent --night 12
    Rate {
        /// Quality rating (0-5 or a name)
        quality: String,

        /// Night id to rate (default: the most recent night)
        #[arg(long, short = 'n')]
        night: Option<i64>,
    },

    /// List recorded nights, newest first
    #[command(alias = "ls")]
    List {
        /// Maximum number of nights to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Delete every recorded night
    Clear {
        /// Confirm deletion
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Open the interactive tracker screen
    Tui,

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
