//! Display text for a list of nights.
//!
//! The tracker screen shows every night as a block of labelled lines. Labels
//! come from [`DisplayConfig`] so they can be localized without code changes.

use chrono::Duration;

use crate::config::DisplayConfig;
use crate::night::SleepNight;

/// Turns the ordered nights into a single display string.
pub trait NightFormatter: Send + Sync {
    /// Render `nights` in the order given.
    fn format_nights(&self, nights: &[SleepNight]) -> String;
}

/// Plain-text formatter driven by configurable labels.
#[derive(Debug, Clone, Default)]
pub struct TextNightFormatter {
    labels: DisplayConfig,
}

impl TextNightFormatter {
    #[must_use]
    pub const fn new(labels: DisplayConfig) -> Self {
        Self { labels }
    }

    fn format_time(&self, millis: i64) -> String {
        let night = SleepNight::new(millis);
        night.start_local().map_or_else(
            || millis.to_string(),
            |t| self.labels.format_time(&t),
        )
    }
}

impl NightFormatter for TextNightFormatter {
    fn format_nights(&self, nights: &[SleepNight]) -> String {
        let labels = &self.labels;
        let mut out = String::from(&labels.title);
        out.push('\n');

        for night in nights {
            out.push('\n');
            out.push_str(&format!(
                "{}\t{}\n",
                labels.start_label,
                self.format_time(night.start_time_milli)
            ));

            if !night.is_in_progress() {
                out.push_str(&format!(
                    "{}\t{}\n",
                    labels.end_label,
                    self.format_time(night.end_time_milli)
                ));
                out.push_str(&format!(
                    "{}\t{}\n",
                    labels.quality_label,
                    labels.quality_name(night.sleep_quality)
                ));
                out.push_str(&format!(
                    "{}\t{}\n",
                    labels.hours_slept_label,
                    format_hms(night.duration())
                ));
            }
        }

        out
    }
}

/// Format a duration as `H:MM:SS`. Negative durations render with a sign.
#[must_use]
pub fn format_hms(d: Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{sign}{hours}:{minutes:02}:{seconds:02}")
}
