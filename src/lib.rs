//! sleeptrack - a sleep tracker for the terminal
//!
//! Nights are recorded in a local SQLite database. The tracker and rating
//! view-models expose observable state that the CLI and TUI bind to.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod night;
pub mod output;
pub mod storage;
pub mod tui;
pub mod viewmodel;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::SleepError;
pub use night::{Quality, SleepNight};
pub use viewmodel::{SleepQualityViewModel, SleepTrackerViewModel};
