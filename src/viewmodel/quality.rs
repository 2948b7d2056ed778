//! View-model for the sleep quality rating screen.

use std::sync::Arc;

use log::info;
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::scope::{run_blocking, ActionHandle, ViewModelScope};
use crate::error::SleepError;
use crate::night::{Quality, SleepNight};
use crate::storage::SleepDatabaseDao;

/// Rates one stored night and then signals a return to the tracker.
pub struct SleepQualityViewModel {
    night_key: i64,
    database: Arc<dyn SleepDatabaseDao>,
    navigate_to_sleep_tracker: Arc<watch::Sender<bool>>,
    scope: ViewModelScope,
}

impl SleepQualityViewModel {
    #[must_use]
    pub fn new(night_key: i64, database: Arc<dyn SleepDatabaseDao>, runtime: Handle) -> Self {
        Self {
            night_key,
            database,
            navigate_to_sleep_tracker: Arc::new(watch::channel(false).0),
            scope: ViewModelScope::new(runtime),
        }
    }

    /// Id of the night being rated.
    #[must_use]
    pub const fn night_key(&self) -> i64 {
        self.night_key
    }

    /// True once the rating has been saved, until acknowledged.
    #[must_use]
    pub fn navigate_to_sleep_tracker(&self) -> watch::Receiver<bool> {
        self.navigate_to_sleep_tracker.subscribe()
    }

    /// Store `rating` (0 to 5) on the night.
    ///
    /// Resolves to the updated night. Fails with `InvalidQuality` for an
    /// out-of-range rating and `NotFound` if the night no longer exists.
    pub fn on_set_sleep_quality(&self, rating: i32) -> ActionHandle<SleepNight> {
        let key = self.night_key;
        let database = Arc::clone(&self.database);
        let navigate = Arc::clone(&self.navigate_to_sleep_tracker);

        self.scope.launch("set sleep quality", async move {
            let quality = Quality::from_rating(rating)?;

            let night = run_blocking(&database, move |db| {
                let mut night = db
                    .get(key)?
                    .ok_or_else(|| SleepError::NotFound(format!("Night {key}")))?;
                night.sleep_quality = quality.rating();
                db.update(&night)?;
                Ok(night)
            })
            .await?;

            info!("Rated night {key} as {quality}");
            navigate.send_replace(true);
            Ok(night)
        })
    }

    /// Acknowledge the navigation signal.
    pub fn done_navigating(&self) {
        self.navigate_to_sleep_tracker.send_if_modified(|pending| {
            let was = *pending;
            *pending = false;
            was
        });
    }

    /// Wait for every action launched so far.
    pub async fn settle(&self) {
        self.scope.settle().await;
    }

    /// Cancel pending actions.
    pub fn on_cleared(&self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteSleepDao;

    fn closed_night(dao: &SqliteSleepDao) -> i64 {
        let mut night = SleepNight::new(1_000);
        night.end_time_milli = 5_000;
        dao.insert(&night).unwrap()
    }

    #[tokio::test]
    async fn test_set_quality_persists_and_signals() {
        let dao = Arc::new(SqliteSleepDao::in_memory().unwrap());
        let key = closed_night(&dao);
        let vm = SleepQualityViewModel::new(key, dao.clone(), Handle::current());
        assert!(!*vm.navigate_to_sleep_tracker().borrow());

        let rated = vm.on_set_sleep_quality(4).await.unwrap();

        assert_eq!(rated.sleep_quality, 4);
        assert_eq!(dao.get(key).unwrap().unwrap().sleep_quality, 4);
        assert_eq!(dao.get(key).unwrap().unwrap().end_time_milli, 5_000);
        assert!(*vm.navigate_to_sleep_tracker().borrow());

        vm.done_navigating();
        assert!(!*vm.navigate_to_sleep_tracker().borrow());
    }

    #[tokio::test]
    async fn test_invalid_rating_rejected() {
        let dao = Arc::new(SqliteSleepDao::in_memory().unwrap());
        let key = closed_night(&dao);
        let vm = SleepQualityViewModel::new(key, dao.clone(), Handle::current());

        let result = vm.on_set_sleep_quality(7).await;

        assert!(matches!(result, Err(SleepError::InvalidQuality(7))));
        assert_eq!(dao.get(key).unwrap().unwrap().sleep_quality, -1);
        assert!(!*vm.navigate_to_sleep_tracker().borrow());
    }

    #[tokio::test]
    async fn test_missing_night() {
        let dao = Arc::new(SqliteSleepDao::in_memory().unwrap());
        let vm = SleepQualityViewModel::new(99, dao, Handle::current());

        let result = vm.on_set_sleep_quality(3).await;

        assert!(matches!(result, Err(SleepError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_done_navigating_without_signal() {
        let dao = Arc::new(SqliteSleepDao::in_memory().unwrap());
        let vm = SleepQualityViewModel::new(1, dao, Handle::current());
        let mut rx = vm.navigate_to_sleep_tracker();

        vm.done_navigating();

        assert!(!rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }
}
