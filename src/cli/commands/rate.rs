//! Sleep quality rating command.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::cli::context::AppContext;
use crate::error::SleepError;
use crate::night::Quality;
use crate::output::to_json;

/// Rate a night, defaulting to the most recent one.
///
/// # Errors
///
/// Returns an error if the quality cannot be parsed, the night does not exist
/// or is still being tracked, or storage fails.
pub fn rate(
    ctx: &AppContext,
    quality: &str,
    night: Option<i64>,
    format: OutputFormat,
) -> Result<String, SleepError> {
    let quality = Quality::parse(quality)?;

    let target = match night {
        Some(key) => ctx.database.get(key)?,
        None => ctx.database.get_tonight()?,
    };
    let Some(target) = target else {
        return Err(SleepError::NotFound(night.map_or_else(
            || "No nights recorded yet".to_string(),
            |key| format!("Night {key}"),
        )));
    };

    if target.is_in_progress() {
        return Err(SleepError::Config(format!(
            "Night #{} is still being tracked. Stop it first with 'sleeptrack stop'.",
            target.night_id
        )));
    }

    let vm = ctx.quality(target.night_id);
    let rated = ctx.block_on(async {
        let rated = vm.on_set_sleep_quality(quality.rating()).await?;
        vm.done_navigating();
        Ok::<_, SleepError>(rated)
    })?;

    match format {
        OutputFormat::Json => to_json(&rated),
        OutputFormat::Pretty => Ok(format!(
            "{} Night #{} rated: {}",
            "✓".green(),
            rated.night_id,
            ctx.config.display.quality_name(rated.sleep_quality).bold()
        )),
    }
}
