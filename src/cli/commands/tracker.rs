//! Tracking command implementations.
//!
//! Each command builds a tracker view-model, waits for it to load tonight,
//! triggers one action and renders the outcome.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::cli::context::AppContext;
use crate::error::SleepError;
use crate::format::format_hms;
use crate::night::SleepNight;
use crate::output::{format_night, format_nights, to_json};

/// Start tracking tonight.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn start(ctx: &AppContext, format: OutputFormat) -> Result<String, SleepError> {
    let vm = ctx.tracker();

    let (already, tonight) = ctx.block_on(async {
        vm.settle().await;
        let before = vm.tonight().borrow().clone();
        let tonight = vm.on_start_tracking().await?;
        Ok::<_, SleepError>((before.is_some(), tonight))
    })?;

    let tonight =
        tonight.ok_or_else(|| SleepError::NotFound("Night was not recorded".to_string()))?;

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "night": tonight,
            "already_tracking": already,
        })),
        OutputFormat::Pretty => {
            let since = tonight
                .start_local()
                .map_or_else(|| "?".to_string(), |t| t.format("%H:%M").to_string());
            if already {
                Ok(format!(
                    "{}\n   {}",
                    format!("Already tracking night #{} since {since}", tonight.night_id).yellow(),
                    "Use 'sleeptrack stop' when you wake up".dimmed()
                ))
            } else {
                Ok(format!(
                    "{}\n   {}",
                    format!("🌙 Tracking night #{} from {since}. Sleep well!", tonight.night_id)
                        .green(),
                    "Use 'sleeptrack stop' when you wake up".dimmed()
                ))
            }
        }
    }
}

/// Stop tracking the open night.
///
/// # Errors
///
/// Returns `SleepError::NotFound` if no night is being tracked, or an error if
/// storage fails.
pub fn stop(ctx: &AppContext, format: OutputFormat) -> Result<String, SleepError> {
    let vm = ctx.tracker();

    let stopped = ctx.block_on(async {
        let stopped = vm.on_stop_tracking().await?;
        // The rating prompt below stands in for the quality screen.
        vm.done_navigating();
        Ok::<_, SleepError>(stopped)
    })?;

    let Some(night) = stopped else {
        return Err(SleepError::NotFound(
            "No night is being tracked. Start one with 'sleeptrack start'".to_string(),
        ));
    };

    match format {
        OutputFormat::Json => to_json(&night),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(format!("☀️  Good morning! Night #{} ended.", night.night_id));
            output.push(format!("   Slept: {}", format_hms(night.duration())));
            output.push(String::new());
            output.push(
                "   How did you sleep? 'sleeptrack rate <0-5>'"
                    .dimmed()
                    .to_string(),
            );
            Ok(output.join("\n"))
        }
    }
}

/// Show the night being tracked.
///
/// # Errors
///
/// Returns an error if storage fails or JSON serialization fails.
pub fn status(ctx: &AppContext, format: OutputFormat) -> Result<String, SleepError> {
    let vm = ctx.tracker();
    ctx.block_on(vm.settle());
    let tonight = vm.tonight().borrow().clone();

    match (tonight, format) {
        (Some(night), format) => format_night(&night, &ctx.config.display, format),
        (None, OutputFormat::Json) => Ok("null".to_string()),
        (None, OutputFormat::Pretty) => Ok(format!(
            "Not tracking.\n   {}",
            "Start with 'sleeptrack start'".dimmed()
        )),
    }
}

/// List recorded nights, newest first.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn list(
    ctx: &AppContext,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<String, SleepError> {
    let vm = ctx.tracker();
    let feed = vm.nights();
    let nights: Vec<SleepNight> = feed
        .borrow()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    format_nights(&nights, &ctx.config.display, format)
}

/// Delete every recorded night.
///
/// # Errors
///
/// Returns `SleepError::ConfirmationRequired` without `--force`, or an error if storage fails.
pub fn clear(ctx: &AppContext, force: bool, format: OutputFormat) -> Result<String, SleepError> {
    let vm = ctx.tracker();
    let count = vm.nights().borrow().len();

    if !force {
        return Err(SleepError::ConfirmationRequired(format!(
            "This will delete all {count} recorded nights.\nUse --force to confirm."
        )));
    }

    ctx.block_on(vm.on_clear())?;

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "cleared": count })),
        OutputFormat::Pretty => Ok(format!("Cleared {count} nights.")),
    }
}
