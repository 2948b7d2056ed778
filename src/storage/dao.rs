//! Storage contract for sleep nights.

use tokio::sync::watch;

use crate::error::SleepError;
use crate::night::SleepNight;

/// Data access for the nights table.
///
/// All methods block; callers on an async runtime should run them through
/// `tokio::task::spawn_blocking`.
#[cfg_attr(test, mockall::automock)]
pub trait SleepDatabaseDao: Send + Sync {
    /// Store a new night and return the id assigned to it.
    ///
    /// The `night_id` of the argument is ignored.
    fn insert(&self, night: &SleepNight) -> Result<i64, SleepError>;

    /// Overwrite the stored night with the same id. Unknown ids are ignored.
    fn update(&self, night: &SleepNight) -> Result<(), SleepError>;

    /// Look up a night by id.
    fn get(&self, key: i64) -> Result<Option<SleepNight>, SleepError>;

    /// The most recently created night, whether open or closed.
    fn get_tonight(&self) -> Result<Option<SleepNight>, SleepError>;

    /// A live view of every night, newest first.
    ///
    /// The receiver sees a new value after every insert, update and clear.
    fn get_all_nights(&self) -> watch::Receiver<Vec<SleepNight>>;

    /// Delete every night.
    fn clear(&self) -> Result<(), SleepError>;
}
