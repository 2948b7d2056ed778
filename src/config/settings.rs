//! Configuration settings for sleeptrack.
//!
//! Settings are loaded from `~/.sleeptrack/config.yaml`.

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::SleepError;
use crate::night::Quality;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Labels and formats used when rendering nights.
    pub display: DisplayConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Pattern used for start and end times unless overridden.
pub const DEFAULT_DATE_FORMAT: &str = "%A %b-%d-%Y Time: %H:%M";

/// Labels used by the night formatter.
///
/// Every string can be overridden to localize the display text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Heading printed above the nights.
    pub title: String,
    pub start_label: String,
    pub end_label: String,
    pub quality_label: String,
    pub hours_slept_label: String,
    /// Shown for an unrated night.
    pub unrated_label: String,
    /// One name per rating, from 0 (worst) to 5 (best).
    pub quality_names: Vec<String>,
    /// `chrono` strftime pattern for start and end times.
    pub date_format: String,
}

impl DisplayConfig {
    /// Name for a stored rating, falling back to the built-in name.
    #[must_use]
    pub fn quality_name(&self, rating: i32) -> String {
        let Ok(quality) = Quality::from_rating(rating) else {
            return self.unrated_label.clone();
        };

        usize::try_from(rating)
            .ok()
            .and_then(|i| self.quality_names.get(i))
            .cloned()
            .unwrap_or_else(|| quality.display_name().to_string())
    }

    /// Reject a `date_format` chrono cannot render.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::Config` naming the bad pattern.
    pub fn validate(&self) -> Result<(), SleepError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SleepError::Config(format!(
                "display.date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Render `time` with `date_format`, or the default pattern if it is invalid.
    #[must_use]
    pub fn format_time(&self, time: &DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", time.format(&self.date_format)).is_err() {
            out.clear();
            // The default pattern always renders.
            let _ = write!(out, "{}", time.format(DEFAULT_DATE_FORMAT));
        }
        out
    }
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Here is your sleep data".to_string(),
            start_label: "Start:".to_string(),
            end_label: "End:".to_string(),
            quality_label: "Quality:".to_string(),
            hours_slept_label: "Hours:Minutes:Seconds".to_string(),
            unrated_label: "--".to_string(),
            quality_names: Quality::ALL
                .iter()
                .map(|q| q.display_name().to_string())
                .collect(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Read `config.yaml`, or the defaults when it has not been written yet.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::Config` if the file is unreadable, not valid YAML,
    /// or sets a `date_format` chrono cannot render.
    pub fn load_from_path(path: &Path) -> Result<Self, SleepError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SleepError::Config(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| SleepError::Config(format!("Invalid {}: {e}", path.display())))?;
        config.display.validate()?;
        Ok(config)
    }

    /// Write these settings to `path` as YAML.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::Config` if serialization or the write fails.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SleepError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SleepError::Config(format!("Cannot serialize settings: {e}")))?;

        fs::write(path, yaml)
            .map_err(|e| SleepError::Config(format!("Cannot write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.display.quality_names.len(), 6);
        assert_eq!(config.display.unrated_label, "--");
    }

    #[test]
    fn test_first_run_uses_defaults() {
        let home = TempDir::new().unwrap();
        let config = Config::load_from_path(&home.path().join("config.yaml")).unwrap();

        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_localized_labels_survive_save() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.yaml");

        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;
        config.display.title = "Deine Schlafdaten".to_string();

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.general.default_output, OutputFormat::Json);
        assert_eq!(loaded.display.title, "Deine Schlafdaten");
    }

    #[test]
    fn test_partial_labels_keep_other_defaults() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.yaml");

        let partial_yaml = r"
display:
  start_label: 'Begin:'
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.display.start_label, "Begin:");
        assert_eq!(config.display.end_label, "End:");
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.yaml");
        std::fs::write(&config_path, "general: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(SleepError::Config(_))
        ));
    }

    #[test]
    fn test_bad_date_format_is_a_config_error() {
        let home = TempDir::new().unwrap();
        let config_path = home.path().join("config.yaml");
        std::fs::write(&config_path, "display:\n  date_format: '%Q'\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();

        assert!(matches!(err, SleepError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_format_time_falls_back_on_bad_pattern() {
        let time = Local.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let display = DisplayConfig {
            date_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };

        assert_eq!(
            display.format_time(&time),
            DisplayConfig::default().format_time(&time)
        );
    }

    #[test]
    fn test_quality_name_lookup() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.quality_name(-1), "--");
        assert_eq!(display.quality_name(2), "So-so");
        assert_eq!(display.quality_name(9), "--");

        display.quality_names = vec!["Schlecht".to_string()];
        assert_eq!(display.quality_name(0), "Schlecht");
        assert_eq!(display.quality_name(5), "Excellent");
    }
}
