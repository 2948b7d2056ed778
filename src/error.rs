//! Error types for sleeptrack.

use thiserror::Error;

/// Errors produced by storage, configuration and the view-models.
#[derive(Debug, Error)]
pub enum SleepError {
    /// A `SQLite` operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or parsing failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A sleep quality rating outside `0..=5`.
    #[error("Invalid sleep quality {0}: expected a rating from 0 to 5")]
    InvalidQuality(i32),

    /// The terminal UI could not be driven.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A background action could not complete.
    #[error("Task error: {0}")]
    Task(String),

    /// A destructive command was run without `--force`.
    #[error("{0}")]
    ConfirmationRequired(String),

    /// The action was dropped because its view-model was torn down.
    #[error("Action cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for SleepError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for SleepError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<tokio::task::JoinError> for SleepError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}
