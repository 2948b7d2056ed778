//! View-model for the sleep tracker screen.
//!
//! Exposes the stored nights and the current session ("tonight") as watch
//! channels a UI can bind to, and offers the start, stop and clear actions.

use std::sync::Arc;

use log::{info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::scope::{run_blocking, ActionHandle, ViewModelScope};
use crate::clock::{Clock, SystemClock};
use crate::error::SleepError;
use crate::format::NightFormatter;
use crate::night::SleepNight;
use crate::storage::SleepDatabaseDao;

/// State shared between the view-model and its queued actions.
struct TrackerState {
    database: Arc<dyn SleepDatabaseDao>,
    formatter: Arc<dyn NightFormatter>,
    clock: Arc<dyn Clock>,
    nights: watch::Receiver<Vec<SleepNight>>,
    nights_string: watch::Sender<String>,
    clear_button_visible: watch::Sender<bool>,
    tonight: watch::Sender<Option<SleepNight>>,
    start_button_visible: watch::Sender<bool>,
    stop_button_visible: watch::Sender<bool>,
    navigate_to_sleep_quality: watch::Sender<Option<SleepNight>>,
}

impl TrackerState {
    /// The most recent night if it is still open.
    ///
    /// A most-recent night that has already ended counts as no night at all.
    async fn tonight_from_database(&self) -> Result<Option<SleepNight>, SleepError> {
        let night = run_blocking(&self.database, |db| db.get_tonight()).await?;
        Ok(night.filter(SleepNight::is_in_progress))
    }

    fn set_tonight(&self, night: Option<SleepNight>) {
        let present = night.is_some();
        self.tonight.send_replace(night);
        publish(&self.start_button_visible, !present);
        publish(&self.stop_button_visible, present);
    }

    /// Recompute everything derived from the nights feed.
    fn sync_nights(&self) {
        let nights = self.nights.borrow().clone();
        publish(&self.clear_button_visible, !nights.is_empty());
        publish(&self.nights_string, self.formatter.format_nights(&nights));
    }

    async fn initialize(&self) -> Result<Option<SleepNight>, SleepError> {
        let tonight = self.tonight_from_database().await?;
        self.set_tonight(tonight.clone());
        Ok(tonight)
    }

    async fn start_tracking(&self) -> Result<Option<SleepNight>, SleepError> {
        let current = self.tonight.borrow().clone();
        if let Some(open) = current.filter(SleepNight::is_in_progress) {
            warn!("Start ignored: night {} is already in progress", open.night_id);
            return Ok(Some(open));
        }

        if let Some(open) = self.tonight_from_database().await? {
            warn!("Start ignored: resuming open night {}", open.night_id);
            self.set_tonight(Some(open.clone()));
            return Ok(Some(open));
        }

        let night = SleepNight::new(self.clock.now_millis());
        let id = run_blocking(&self.database, move |db| db.insert(&night)).await?;
        info!("Started night {id}");
        self.sync_nights();

        let tonight = self.tonight_from_database().await?;
        self.set_tonight(tonight.clone());
        Ok(tonight)
    }

    async fn stop_tracking(&self) -> Result<Option<SleepNight>, SleepError> {
        let current = self.tonight.borrow().clone();
        let Some(mut night) = current.filter(SleepNight::is_in_progress) else {
            return Ok(None);
        };

        // An end equal to the start would read back as still open.
        night.end_time_milli = self.clock.now_millis().max(night.start_time_milli + 1);
        let stored = night.clone();
        run_blocking(&self.database, move |db| db.update(&stored)).await?;
        info!("Stopped night {}", night.night_id);
        self.sync_nights();

        self.set_tonight(Some(night.clone()));
        self.navigate_to_sleep_quality.send_replace(Some(night.clone()));
        Ok(Some(night))
    }

    async fn clear(&self) -> Result<(), SleepError> {
        run_blocking(&self.database, |db| db.clear()).await?;
        info!("Cleared all nights");
        self.sync_nights();
        self.set_tonight(None);
        Ok(())
    }
}

/// Send `value` only if it differs from the current one.
fn publish<T: PartialEq>(tx: &watch::Sender<T>, value: T) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

/// View-model for the sleep tracker screen.
///
/// Construction queues an initialization that loads tonight from storage.
/// Every action returns immediately; await the returned [`ActionHandle`] or
/// [`settle`](Self::settle) to observe its effect.
pub struct SleepTrackerViewModel {
    state: Arc<TrackerState>,
    scope: ViewModelScope,
}

impl SleepTrackerViewModel {
    /// Create a view-model using the system clock.
    #[must_use]
    pub fn new(
        database: Arc<dyn SleepDatabaseDao>,
        formatter: Arc<dyn NightFormatter>,
        runtime: Handle,
    ) -> Self {
        Self::with_clock(database, formatter, Arc::new(SystemClock), runtime)
    }

    /// Create a view-model with an explicit time source.
    #[must_use]
    pub fn with_clock(
        database: Arc<dyn SleepDatabaseDao>,
        formatter: Arc<dyn NightFormatter>,
        clock: Arc<dyn Clock>,
        runtime: Handle,
    ) -> Self {
        let nights = database.get_all_nights();
        let initial = nights.borrow().clone();

        let state = Arc::new(TrackerState {
            nights_string: watch::channel(formatter.format_nights(&initial)).0,
            clear_button_visible: watch::channel(!initial.is_empty()).0,
            tonight: watch::channel(None).0,
            start_button_visible: watch::channel(true).0,
            stop_button_visible: watch::channel(false).0,
            navigate_to_sleep_quality: watch::channel(None).0,
            database,
            formatter,
            clock,
            nights,
        });

        let scope = ViewModelScope::new(runtime);

        let watcher = Arc::clone(&state);
        scope.spawn_watcher(async move {
            let mut feed = watcher.nights.clone();
            while feed.changed().await.is_ok() {
                watcher.sync_nights();
            }
        });

        let init = Arc::clone(&state);
        drop(scope.launch("initialize", async move { init.initialize().await }));

        Self { state, scope }
    }

    /// Every stored night, newest first.
    #[must_use]
    pub fn nights(&self) -> watch::Receiver<Vec<SleepNight>> {
        self.state.nights.clone()
    }

    /// The nights rendered by the formatter.
    #[must_use]
    pub fn nights_string(&self) -> watch::Receiver<String> {
        self.state.nights_string.subscribe()
    }

    /// The current session, if one is being tracked.
    #[must_use]
    pub fn tonight(&self) -> watch::Receiver<Option<SleepNight>> {
        self.state.tonight.subscribe()
    }

    /// True while there is no current session.
    #[must_use]
    pub fn start_button_visible(&self) -> watch::Receiver<bool> {
        self.state.start_button_visible.subscribe()
    }

    /// True while there is a current session.
    #[must_use]
    pub fn stop_button_visible(&self) -> watch::Receiver<bool> {
        self.state.stop_button_visible.subscribe()
    }

    /// True while any night is stored.
    #[must_use]
    pub fn clear_button_visible(&self) -> watch::Receiver<bool> {
        self.state.clear_button_visible.subscribe()
    }

    /// Set to the night that just ended; reset with [`done_navigating`](Self::done_navigating).
    #[must_use]
    pub fn navigate_to_sleep_quality(&self) -> watch::Receiver<Option<SleepNight>> {
        self.state.navigate_to_sleep_quality.subscribe()
    }

    /// Start a new night.
    ///
    /// Ignored while a night is already open; the open night is returned
    /// instead and no record is created.
    pub fn on_start_tracking(&self) -> ActionHandle<Option<SleepNight>> {
        let state = Arc::clone(&self.state);
        self.scope
            .launch("start tracking", async move { state.start_tracking().await })
    }

    /// End the open night and signal navigation to the rating screen.
    ///
    /// Resolves to the ended night, or `None` if no night was open.
    pub fn on_stop_tracking(&self) -> ActionHandle<Option<SleepNight>> {
        let state = Arc::clone(&self.state);
        self.scope
            .launch("stop tracking", async move { state.stop_tracking().await })
    }

    /// Delete every night and forget tonight.
    pub fn on_clear(&self) -> ActionHandle<()> {
        let state = Arc::clone(&self.state);
        self.scope.launch("clear", async move { state.clear().await })
    }

    /// Acknowledge the navigation signal.
    pub fn done_navigating(&self) {
        publish(&self.state.navigate_to_sleep_quality, None);
    }

    /// Wait for every action launched so far, including initialization.
    pub async fn settle(&self) {
        self.scope.settle().await;
    }

    /// Tear down: cancel pending actions and stop observing storage.
    pub fn on_cleared(&self) {
        self.scope.cancel();
    }

    /// Wait for background tasks to exit after [`on_cleared`](Self::on_cleared).
    pub async fn closed(&self) {
        self.scope.closed().await;
    }
}
