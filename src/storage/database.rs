//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.sleeptrack/sleep.db` and contains the
//! `daily_sleep_quality_table` of recorded nights.

use std::path::Path;

use log::debug;
use rusqlite::Connection;

use crate::error::SleepError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the nights database at `path` and bring its schema
    /// up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, SleepError> {
        let conn = Connection::open(path).map_err(|e| {
            SleepError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        debug!("Opened sleep database at {}", path.display());

        Self::from_connection(conn)
    }

    /// Open a private in-memory database with the current schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, SleepError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            SleepError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, SleepError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version stored in `PRAGMA user_version`.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, SleepError> {
        migrations::get_version(&self.conn)
    }

    /// Borrow the raw connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
