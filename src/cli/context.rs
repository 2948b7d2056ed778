//! Shared state for command execution.

use std::future::Future;
use std::sync::Arc;

use log::debug;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::config::{Config, Paths};
use crate::error::SleepError;
use crate::format::TextNightFormatter;
use crate::storage::{Database, SleepDatabaseDao, SqliteSleepDao};
use crate::viewmodel::{SleepQualityViewModel, SleepTrackerViewModel};

/// Configuration, storage and the async runtime the view-models run on.
pub struct AppContext {
    pub config: Config,
    pub paths: Paths,
    pub database: Arc<dyn SleepDatabaseDao>,
    runtime: Runtime,
}

impl AppContext {
    /// Load config and open the database under `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the config
    /// cannot be parsed, the database cannot be opened, or the runtime fails
    /// to start.
    pub fn open(paths: Paths) -> Result<Self, SleepError> {
        paths.ensure_dirs()?;
        let config = Config::load_from_path(&paths.config_file)?;
        Self::with_config(paths, config)
    }

    /// Open the database under `paths` with an already loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the runtime fails
    /// to start.
    pub fn with_config(paths: Paths, config: Config) -> Result<Self, SleepError> {
        paths.ensure_dirs()?;
        let database = SqliteSleepDao::new(Database::open_at(&paths.database)?)?;

        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sleeptrack-rt")
            .enable_all()
            .build()?;
        debug!("Using data directory {}", paths.root.display());

        Ok(Self {
            config,
            paths,
            database: Arc::new(database),
            runtime,
        })
    }

    /// A tracker view-model over this context's database.
    #[must_use]
    pub fn tracker(&self) -> SleepTrackerViewModel {
        SleepTrackerViewModel::new(
            Arc::clone(&self.database),
            Arc::new(TextNightFormatter::new(self.config.display.clone())),
            self.handle(),
        )
    }

    /// A rating view-model for the night `key`.
    #[must_use]
    pub fn quality(&self, key: i64) -> SleepQualityViewModel {
        SleepQualityViewModel::new(key, Arc::clone(&self.database), self.handle())
    }

    /// Handle to the runtime for spawning.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Drive `future` to completion on the runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
