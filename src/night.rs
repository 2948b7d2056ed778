//! The sleep night record.
//!
//! One `SleepNight` is stored per sleep session. A night whose end time equals
//! its start time is still in progress; a quality of `-1` means it has not
//! been rated yet.

use chrono::{DateTime, Duration, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::SleepError;

/// Quality value of a night that has not been rated.
pub const UNRATED: i32 = -1;

/// One night's sleep session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepNight {
    /// Row id assigned by the store (0 until inserted).
    pub night_id: i64,
    /// Milliseconds since the Unix epoch.
    pub start_time_milli: i64,
    /// Equal to `start_time_milli` while the session is open.
    pub end_time_milli: i64,
    /// Rating from 0 to 5, or [`UNRATED`].
    pub sleep_quality: i32,
}

impl SleepNight {
    /// Create an open, unrated night starting at `start_time_milli`.
    #[must_use]
    pub const fn new(start_time_milli: i64) -> Self {
        Self {
            night_id: 0,
            start_time_milli,
            end_time_milli: start_time_milli,
            sleep_quality: UNRATED,
        }
    }

    /// Whether the session is still open.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        self.end_time_milli == self.start_time_milli
    }

    /// Whether a quality rating has been recorded.
    #[must_use]
    pub const fn is_rated(&self) -> bool {
        self.sleep_quality != UNRATED
    }

    /// Time slept. Zero while the session is open.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.end_time_milli - self.start_time_milli)
    }

    /// Start time in the local timezone.
    #[must_use]
    pub fn start_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.start_time_milli).single()
    }

    /// End time in the local timezone, or `None` while in progress.
    #[must_use]
    pub fn end_local(&self) -> Option<DateTime<Local>> {
        if self.is_in_progress() {
            return None;
        }
        Local.timestamp_millis_opt(self.end_time_milli).single()
    }

    /// The rating as a [`Quality`], if one has been recorded.
    #[must_use]
    pub fn quality(&self) -> Option<Quality> {
        Quality::from_rating(self.sleep_quality).ok()
    }
}

/// The six sleep quality levels offered by the rating screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    VeryBad,
    Poor,
    SoSo,
    Ok,
    PrettyGood,
    Excellent,
}

impl Quality {
    /// All levels in rating order.
    pub const ALL: [Self; 6] = [
        Self::VeryBad,
        Self::Poor,
        Self::SoSo,
        Self::Ok,
        Self::PrettyGood,
        Self::Excellent,
    ];

    /// Convert a stored rating into a level.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::InvalidQuality` if the rating is outside `0..=5`.
    pub fn from_rating(rating: i32) -> Result<Self, SleepError> {
        usize::try_from(rating)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SleepError::InvalidQuality(rating))
    }

    /// The stored rating for this level.
    #[must_use]
    pub const fn rating(self) -> i32 {
        match self {
            Self::VeryBad => 0,
            Self::Poor => 1,
            Self::SoSo => 2,
            Self::Ok => 3,
            Self::PrettyGood => 4,
            Self::Excellent => 5,
        }
    }

    /// Parse a level from a rating number or a name.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::Parse` if the input names no level, or
    /// `SleepError::InvalidQuality` for an out-of-range number.
    pub fn parse(s: &str) -> Result<Self, SleepError> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Self::from_rating(n);
        }
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "verybad" | "awful" => Ok(Self::VeryBad),
            "poor" | "bad" => Ok(Self::Poor),
            "soso" | "meh" => Ok(Self::SoSo),
            "ok" | "okay" => Ok(Self::Ok),
            "prettygood" | "good" => Ok(Self::PrettyGood),
            "excellent" | "great" => Ok(Self::Excellent),
            _ => Err(SleepError::Parse(format!("Unknown sleep quality: {s}"))),
        }
    }

    /// Default English name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::VeryBad => "Very bad",
            Self::Poor => "Poor",
            Self::SoSo => "So-so",
            Self::Ok => "OK",
            Self::PrettyGood => "Pretty good",
            Self::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
