//! `SQLite` implementation of the nights storage contract.

use std::sync::Mutex;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::watch;

use super::dao::SleepDatabaseDao;
use super::database::Database;
use crate::error::SleepError;
use crate::night::SleepNight;

const SELECT_NIGHT: &str = r"SELECT night_id, start_time_milli, end_time_milli, quality_rating
                              FROM daily_sleep_quality_table";

/// Nights storage backed by a `SQLite` database.
///
/// Every mutation re-reads the table and publishes it to the
/// [`SleepDatabaseDao::get_all_nights`] feed.
pub struct SqliteSleepDao {
    db: Mutex<Database>,
    nights: watch::Sender<Vec<SleepNight>>,
}

impl SqliteSleepDao {
    /// Wrap an open database.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing nights cannot be read.
    pub fn new(db: Database) -> Result<Self, SleepError> {
        let initial = query_all(db.connection())?;
        let (nights, _) = watch::channel(initial);
        Ok(Self {
            db: Mutex::new(db),
            nights,
        })
    }

    /// Open a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self, SleepError> {
        Self::new(Database::open_in_memory()?)
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, SleepError>,
    ) -> Result<T, SleepError> {
        let db = self
            .db
            .lock()
            .map_err(|_| SleepError::Database("Database lock poisoned".to_string()))?;
        f(db.connection())
    }

    fn publish(&self, conn: &Connection) -> Result<(), SleepError> {
        let all = query_all(conn)?;
        self.nights.send_replace(all);
        Ok(())
    }
}

impl SleepDatabaseDao for SqliteSleepDao {
    fn insert(&self, night: &SleepNight) -> Result<i64, SleepError> {
        self.with_connection(|conn| {
            conn.execute(
                r"INSERT INTO daily_sleep_quality_table
                  (start_time_milli, end_time_milli, quality_rating)
                  VALUES (?1, ?2, ?3)",
                params![
                    night.start_time_milli,
                    night.end_time_milli,
                    night.sleep_quality
                ],
            )
            .map_err(|e| SleepError::Database(format!("Failed to insert night: {e}")))?;

            let id = conn.last_insert_rowid();
            debug!("Inserted night {id}");
            self.publish(conn)?;
            Ok(id)
        })
    }

    fn update(&self, night: &SleepNight) -> Result<(), SleepError> {
        self.with_connection(|conn| {
            let rows = conn
                .execute(
                    r"UPDATE daily_sleep_quality_table SET
                      start_time_milli = ?1,
                      end_time_milli = ?2,
                      quality_rating = ?3
                      WHERE night_id = ?4",
                    params![
                        night.start_time_milli,
                        night.end_time_milli,
                        night.sleep_quality,
                        night.night_id
                    ],
                )
                .map_err(|e| SleepError::Database(format!("Failed to update night: {e}")))?;

            if rows == 0 {
                debug!("Update ignored: no night {}", night.night_id);
                return Ok(());
            }
            self.publish(conn)
        })
    }

    fn get(&self, key: i64) -> Result<Option<SleepNight>, SleepError> {
        self.with_connection(|conn| {
            conn.query_row(
                &format!("{SELECT_NIGHT} WHERE night_id = ?1"),
                [key],
                row_to_night,
            )
            .optional()
            .map_err(|e| SleepError::Database(format!("Failed to query night {key}: {e}")))
        })
    }

    fn get_tonight(&self) -> Result<Option<SleepNight>, SleepError> {
        self.with_connection(|conn| {
            conn.query_row(
                &format!("{SELECT_NIGHT} ORDER BY night_id DESC LIMIT 1"),
                [],
                row_to_night,
            )
            .optional()
            .map_err(|e| SleepError::Database(format!("Failed to query latest night: {e}")))
        })
    }

    fn get_all_nights(&self) -> watch::Receiver<Vec<SleepNight>> {
        self.nights.subscribe()
    }

    fn clear(&self) -> Result<(), SleepError> {
        self.with_connection(|conn| {
            let rows = conn
                .execute("DELETE FROM daily_sleep_quality_table", [])
                .map_err(|e| SleepError::Database(format!("Failed to clear nights: {e}")))?;
            debug!("Cleared {rows} nights");
            self.publish(conn)
        })
    }
}

fn query_all(conn: &Connection) -> Result<Vec<SleepNight>, SleepError> {
    let mut stmt = conn
        .prepare(&format!("{SELECT_NIGHT} ORDER BY night_id DESC"))
        .map_err(|e| SleepError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map([], row_to_night)
        .map_err(|e| SleepError::Database(format!("Failed to query nights: {e}")))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| SleepError::Database(e.to_string()))
}

/// Convert a database row to a `SleepNight`.
fn row_to_night(row: &Row<'_>) -> Result<SleepNight, rusqlite::Error> {
    Ok(SleepNight {
        night_id: row.get(0)?,
        start_time_milli: row.get(1)?,
        end_time_milli: row.get(2)?,
        sleep_quality: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_dao() -> SqliteSleepDao {
        SqliteSleepDao::in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let dao = create_test_dao();

        let id = dao.insert(&SleepNight::new(1_000)).unwrap();
        assert!(id > 0);

        let loaded = dao.get(id).unwrap().unwrap();
        assert_eq!(loaded.night_id, id);
        assert_eq!(loaded.start_time_milli, 1_000);
        assert_eq!(loaded.end_time_milli, 1_000);
        assert_eq!(loaded.sleep_quality, -1);
    }

    #[test]
    fn test_insert_ignores_caller_id() {
        let dao = create_test_dao();

        let mut night = SleepNight::new(1_000);
        night.night_id = 99;
        let id = dao.insert(&night).unwrap();

        assert_eq!(id, 1);
        assert!(dao.get(99).unwrap().is_none());
    }

    #[test]
    fn test_get_missing() {
        let dao = create_test_dao();
        assert!(dao.get(42).unwrap().is_none());
    }

    #[test]
    fn test_get_tonight_returns_latest() {
        let dao = create_test_dao();
        assert!(dao.get_tonight().unwrap().is_none());

        dao.insert(&SleepNight::new(1_000)).unwrap();
        let second = dao.insert(&SleepNight::new(500)).unwrap();

        // Latest by creation, not by start time
        assert_eq!(dao.get_tonight().unwrap().unwrap().night_id, second);
    }

    #[test]
    fn test_update() {
        let dao = create_test_dao();
        let id = dao.insert(&SleepNight::new(1_000)).unwrap();

        let mut night = dao.get(id).unwrap().unwrap();
        night.end_time_milli = 9_000;
        night.sleep_quality = 4;
        dao.update(&night).unwrap();

        assert_eq!(dao.get(id).unwrap().unwrap(), night);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let dao = create_test_dao();
        dao.insert(&SleepNight::new(1_000)).unwrap();

        let mut ghost = SleepNight::new(5);
        ghost.night_id = 77;
        dao.update(&ghost).unwrap();

        assert_eq!(dao.get_all_nights().borrow().len(), 1);
    }

    #[test]
    fn test_all_nights_newest_first() {
        let dao = create_test_dao();
        for start in [100, 200, 300] {
            dao.insert(&SleepNight::new(start)).unwrap();
        }

        let nights = dao.get_all_nights().borrow().clone();
        let starts: Vec<i64> = nights.iter().map(|n| n.start_time_milli).collect();
        assert_eq!(starts, vec![300, 200, 100]);
    }

    #[test]
    fn test_all_nights_feed_observes_mutations() {
        let dao = create_test_dao();
        let mut rx = dao.get_all_nights();
        assert!(rx.borrow_and_update().is_empty());

        let id = dao.insert(&SleepNight::new(1_000)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].night_id, id);

        let mut night = dao.get(id).unwrap().unwrap();
        night.end_time_milli = 2_000;
        dao.update(&night).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].end_time_milli, 2_000);

        dao.clear().unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_clear_keeps_ids_monotonic() {
        let dao = create_test_dao();
        let first = dao.insert(&SleepNight::new(1)).unwrap();
        dao.clear().unwrap();
        assert!(dao.get_tonight().unwrap().is_none());

        let second = dao.insert(&SleepNight::new(2)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_existing_rows_seed_the_feed() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sleep.db");

        {
            let dao = SqliteSleepDao::new(Database::open_at(&path).unwrap()).unwrap();
            dao.insert(&SleepNight::new(1_000)).unwrap();
        }

        let dao = SqliteSleepDao::new(Database::open_at(&path).unwrap()).unwrap();
        assert_eq!(dao.get_all_nights().borrow().len(), 1);
    }
}
