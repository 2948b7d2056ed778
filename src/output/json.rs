//! JSON output formatting for sleeptrack.

use serde::Serialize;
use serde_json::json;

use crate::error::SleepError;
use crate::night::SleepNight;

/// Format nights as JSON
///
/// # Errors
///
/// Returns `SleepError::Parse` if JSON serialization fails.
pub fn format_nights_json(nights: &[SleepNight]) -> Result<String, SleepError> {
    let output = json!({
        "count": nights.len(),
        "items": nights
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single night as JSON, with its derived state alongside.
///
/// # Errors
///
/// Returns `SleepError::Parse` if JSON serialization fails.
pub fn format_night_json(night: &SleepNight) -> Result<String, SleepError> {
    let output = json!({
        "night": night,
        "in_progress": night.is_in_progress(),
        "quality": night.quality(),
        "duration_seconds": night.duration().num_seconds(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `SleepError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SleepError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_night(id: i64, hours: i64, quality: i32) -> SleepNight {
        SleepNight {
            night_id: id,
            start_time_milli: 1_000,
            end_time_milli: 1_000 + hours * 3_600_000,
            sleep_quality: quality,
        }
    }

    #[test]
    fn test_format_nights_json_empty() {
        let result = format_nights_json(&[]).unwrap();

        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_nights_json_fields() {
        let result = format_nights_json(&[make_night(3, 8, 4)]).unwrap();

        assert!(result.contains("\"count\": 1"));
        assert!(result.contains("\"night_id\": 3"));
        assert!(result.contains("\"start_time_milli\": 1000"));
        assert!(result.contains("\"sleep_quality\": 4"));
    }

    #[test]
    fn test_format_night_json_derived_state() {
        let result = format_night_json(&make_night(1, 2, 5)).unwrap();

        assert!(result.contains("\"in_progress\": false"));
        assert!(result.contains("\"quality\": \"excellent\""));
        assert!(result.contains("\"duration_seconds\": 7200"));
    }

    #[test]
    fn test_format_night_json_unrated_open() {
        let result = format_night_json(&SleepNight::new(1_000)).unwrap();

        assert!(result.contains("\"in_progress\": true"));
        assert!(result.contains("\"quality\": null"));
    }

    #[test]
    fn test_to_json_round_trips_night() {
        let night = make_night(9, 1, 0);
        let parsed: SleepNight = serde_json::from_str(&to_json(&night).unwrap()).unwrap();
        assert_eq!(parsed, night);
    }
}
