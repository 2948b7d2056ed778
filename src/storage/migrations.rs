//! Schema migrations for the nights database.
//!
//! The schema version lives in `PRAGMA user_version`; each step below moves it
//! up by one and runs whenever a database is opened.

use rusqlite::Connection;

use crate::error::SleepError;

/// Latest schema version.
const CURRENT_VERSION: i32 = 1;

/// Schema version of `conn`; 0 for a fresh file.
pub fn get_version(conn: &Connection) -> Result<i32, SleepError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| SleepError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), SleepError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| SleepError::Database(format!("Failed to set schema version: {e}")))
}

/// Apply every step between the stored version and [`CURRENT_VERSION`].
pub fn run(conn: &Connection) -> Result<(), SleepError> {
    let stored = get_version(conn)?;

    for version in (stored + 1)..=CURRENT_VERSION {
        log::info!("Migrating sleep database to schema v{version}");
        apply(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn apply(conn: &Connection, version: i32) -> Result<(), SleepError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(SleepError::Database(format!("No migration to schema v{version}"))),
    }
}

/// Migration v1: the nights table.
///
/// `AUTOINCREMENT` keeps ids monotonic even after a clear.
fn migrate_v1(conn: &Connection) -> Result<(), SleepError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS daily_sleep_quality_table (
            night_id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time_milli INTEGER NOT NULL,
            end_time_milli INTEGER NOT NULL,
            quality_rating INTEGER NOT NULL DEFAULT -1
        );
        ",
    )
    .map_err(|e| SleepError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_defaults_quality_to_unrated() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO daily_sleep_quality_table (start_time_milli, end_time_milli)
             VALUES (1000, 1000)",
            [],
        )
        .unwrap();

        let quality: i32 = conn
            .query_row(
                "SELECT quality_rating FROM daily_sleep_quality_table",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(quality, -1);
    }

    #[test]
    fn test_rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_ids_never_reused() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let insert = "INSERT INTO daily_sleep_quality_table (start_time_milli, end_time_milli)
                      VALUES (1, 1)";
        conn.execute(insert, []).unwrap();
        conn.execute("DELETE FROM daily_sleep_quality_table", []).unwrap();
        conn.execute(insert, []).unwrap();

        assert_eq!(conn.last_insert_rowid(), 2);
    }
}
