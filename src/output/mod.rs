//! Output formatting for sleeptrack.
//!
//! This module provides formatters for displaying nights in the CLI.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::DisplayConfig;
use crate::error::SleepError;
use crate::night::SleepNight;

pub use json::*;
pub use pretty::*;

/// Format nights based on output format
///
/// # Errors
///
/// Returns `SleepError::Parse` if JSON serialization fails.
pub fn format_nights(
    nights: &[SleepNight],
    labels: &DisplayConfig,
    format: OutputFormat,
) -> Result<String, SleepError> {
    match format {
        OutputFormat::Pretty => Ok(format_nights_pretty(nights, labels)),
        OutputFormat::Json => format_nights_json(nights),
    }
}

/// Format a single night based on output format
///
/// # Errors
///
/// Returns `SleepError::Parse` if JSON serialization fails.
pub fn format_night(
    night: &SleepNight,
    labels: &DisplayConfig,
    format: OutputFormat,
) -> Result<String, SleepError> {
    match format {
        OutputFormat::Pretty => Ok(format_night_pretty(night, labels)),
        OutputFormat::Json => format_night_json(night),
    }
}
