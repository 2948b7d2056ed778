//! Command implementations for sleeptrack.
//!
//! Every command returns the text to print on success.

mod completions;
mod rate;
mod tracker;

pub use completions::completions;
pub use rate::rate;
pub use tracker::{clear, list, start, status, stop};
