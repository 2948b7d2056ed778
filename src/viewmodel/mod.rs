//! View-models for the tracker and rating screens.
//!
//! A view-model exposes `tokio::sync::watch` receivers a UI binds to and
//! action methods a UI calls. Actions run in the background, one at a time,
//! in the order they were triggered.

mod quality;
mod scope;
mod tracker;

pub use quality::SleepQualityViewModel;
pub use scope::{run_blocking, ActionHandle, ViewModelScope};
pub use tracker::SleepTrackerViewModel;
