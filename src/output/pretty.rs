use colored::{ColoredString, Colorize};

use crate::config::DisplayConfig;
use crate::format::format_hms;
use crate::night::SleepNight;

/// Format a list of nights as a pretty table
pub fn format_nights_pretty(nights: &[SleepNight], labels: &DisplayConfig) -> String {
    if nights.is_empty() {
        return format!("{} (0 nights)\n  No nights recorded", labels.title);
    }

    let mut output = format!("{} ({} nights)\n", labels.title, nights.len());
    output.push_str(&format!(
        "{:>5}  {:<16}  {:<16}  {:>9}  {}\n",
        "ID", "Start", "End", "Slept", "Quality"
    ));
    output.push_str(&"─".repeat(64));
    output.push('\n');

    for night in nights {
        let start = night
            .start_local()
            .map_or_else(|| "?".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());

        let (end, slept) = if night.is_in_progress() {
            ("in progress".blue().to_string(), "-".to_string())
        } else {
            let end = night
                .end_local()
                .map_or_else(|| "?".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
            (end, format_hms(night.duration()))
        };

        output.push_str(&format!(
            "{:>5}  {:<16}  {:<16}  {:>9}  {}\n",
            night.night_id,
            start,
            end,
            slept,
            quality_colored(night, labels)
        ));
    }

    output
}

/// Format a single night as pretty output
pub fn format_night_pretty(night: &SleepNight, labels: &DisplayConfig) -> String {
    let mut lines = Vec::new();

    let state = if night.is_in_progress() {
        "▶ tracking".blue().bold()
    } else {
        "■ ended".green().bold()
    };
    lines.push(format!("Night #{}  {state}", night.night_id));
    lines.push("─".repeat(40));

    if let Some(start) = night.start_local() {
        lines.push(format!(
            "{:<12} {}",
            labels.start_label,
            labels.format_time(&start)
        ));
    }

    if let Some(end) = night.end_local() {
        lines.push(format!(
            "{:<12} {}",
            labels.end_label,
            labels.format_time(&end)
        ));
        lines.push(format!(
            "{:<12} {}",
            labels.quality_label,
            quality_colored(night, labels)
        ));
        lines.push(format!(
            "{:<12} {}",
            "Slept:",
            format_hms(night.duration())
        ));
    }

    lines.join("\n")
}

fn quality_colored(night: &SleepNight, labels: &DisplayConfig) -> ColoredString {
    let name = labels.quality_name(night.sleep_quality);
    match night.sleep_quality {
        0 | 1 => name.red(),
        2 | 3 => name.yellow(),
        4 | 5 => name.green(),
        _ => name.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(id: i64, quality: i32) -> SleepNight {
        SleepNight {
            night_id: id,
            start_time_milli: 1_700_000_000_000,
            end_time_milli: 1_700_000_000_000 + 27_000_000,
            sleep_quality: quality,
        }
    }

    #[test]
    fn test_empty_list() {
        let result = format_nights_pretty(&[], &DisplayConfig::default());
        assert!(result.contains("0 nights"));
        assert!(result.contains("No nights recorded"));
    }

    #[test]
    fn test_list_rows() {
        colored::control::set_override(false);
        let nights = vec![closed(2, 4), SleepNight::new(1_700_000_000_000)];
        let result = format_nights_pretty(&nights, &DisplayConfig::default());

        assert!(result.contains("2 nights"));
        assert!(result.contains("7:30:00"));
        assert!(result.contains("Pretty good"));
        assert!(result.contains("in progress"));
        assert!(result.contains("--"));
    }

    #[test]
    fn test_single_closed_night() {
        colored::control::set_override(false);
        let result = format_night_pretty(&closed(5, 0), &DisplayConfig::default());

        assert!(result.contains("Night #5"));
        assert!(result.contains("ended"));
        assert!(result.contains("Very bad"));
        assert!(result.contains("7:30:00"));
    }

    #[test]
    fn test_single_open_night() {
        colored::control::set_override(false);
        let result = format_night_pretty(&SleepNight::new(1_700_000_000_000), &DisplayConfig::default());

        assert!(result.contains("tracking"));
        assert!(!result.contains("Quality"));
    }
}
