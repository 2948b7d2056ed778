//! Command-line interface for sleeptrack.

pub mod args;
pub mod commands;
pub mod context;

pub use context::AppContext;
