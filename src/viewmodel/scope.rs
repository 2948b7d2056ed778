//! Action dispatch for view-models.
//!
//! Each view-model owns a [`ViewModelScope`]. Actions are queued on a single
//! worker task and run one after another in the order they were launched, so
//! every step of one action completes before the next action begins. Storage
//! calls inside an action run on the blocking pool via [`run_blocking`].
//!
//! Cancelling the scope stops the worker at its next suspension point; queued
//! and in-flight actions resolve to [`SleepError::Cancelled`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use log::{debug, error};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::error::SleepError;
use crate::storage::SleepDatabaseDao;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Owner of a view-model's background work.
pub struct ViewModelScope {
    runtime: Handle,
    jobs: mpsc::UnboundedSender<Job>,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl ViewModelScope {
    /// Create a scope whose worker runs on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let tasks = TaskTracker::new();

        tasks.spawn_on(run_jobs(rx, cancel.clone()), &runtime);

        Self {
            runtime,
            jobs,
            cancel,
            tasks,
        }
    }

    /// Queue `action` behind every previously launched action.
    ///
    /// The returned handle may be awaited for the result or dropped.
    pub fn launch<T, F>(&self, name: &'static str, action: F) -> ActionHandle<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, SleepError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job = async move {
            debug!("{name} started");
            let result = action.await;
            if let Err(e) = &result {
                error!("{name} failed: {e}");
            }
            // The caller may have dropped its handle.
            let _ = tx.send(result);
        };

        if self.jobs.send(Box::pin(job)).is_err() {
            debug!("{name} dropped: scope already torn down");
        }

        ActionHandle { rx }
    }

    /// Run a long-lived task that stops when the scope is cancelled.
    pub fn spawn_watcher<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tasks.spawn_on(
            async move {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = task => {}
                }
            },
            &self.runtime,
        );
    }

    /// Wait until every action launched so far has finished.
    pub async fn settle(&self) {
        let (tx, rx) = oneshot::channel();
        let marker = async move {
            let _ = tx.send(());
        };
        if self.jobs.send(Box::pin(marker)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Cancel all pending and running work.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Cancelling view-model scope");
            self.cancel.cancel();
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the worker and watchers to exit after cancellation.
    pub async fn closed(&self) {
        self.tasks.close();
        self.tasks.wait().await;
    }
}

impl Drop for ViewModelScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_jobs(mut rx: mpsc::UnboundedReceiver<Job>, cancel: CancellationToken) {
    loop {
        let job = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = job => {}
        }
    }
    debug!("View-model worker stopped");
}

/// Result of a launched action.
///
/// Resolves to [`SleepError::Cancelled`] if the scope was torn down before the
/// action finished.
#[must_use = "an action handle does nothing unless awaited; drop it to fire and forget"]
pub struct ActionHandle<T> {
    rx: oneshot::Receiver<Result<T, SleepError>>,
}

impl<T> Future for ActionHandle<T> {
    type Output = Result<T, SleepError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SleepError::Cancelled)))
    }
}

/// Run a storage call on the blocking pool.
///
/// # Errors
///
/// Returns the storage error, or `SleepError::Task` if the blocking task panicked.
pub async fn run_blocking<T, F>(database: &Arc<dyn SleepDatabaseDao>, f: F) -> Result<T, SleepError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SleepDatabaseDao) -> Result<T, SleepError> + Send + 'static,
{
    let database = Arc::clone(database);
    tokio::task::spawn_blocking(move || f(database.as_ref())).await?
}
