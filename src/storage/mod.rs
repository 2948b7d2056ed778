//! Storage layer for sleeptrack.
//!
//! This module provides SQLite-based persistence for sleep nights:
//! - `Database`: connection wrapper that runs schema migrations
//! - `SleepDatabaseDao`: the storage contract the view-models depend on
//! - `SqliteSleepDao`: the `SQLite` implementation of that contract

mod dao;
mod database;
mod migrations;
mod sqlite;

#[cfg(test)]
pub use dao::MockSleepDatabaseDao;
pub use dao::SleepDatabaseDao;
pub use database::Database;
pub use sqlite::SqliteSleepDao;
