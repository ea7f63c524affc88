//! Storage layer for health-gauge
//!
//! `SQLite` storage via sqlx, plus an in-memory backend with the same
//! semantics for tests and throwaway runs.

mod error;
mod memory;
mod migrations;
mod sqlite;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use migrations::SCHEMA_VERSION;
pub use sqlite::SqliteStorage;
pub use traits::{GaugeStore, StorageBackend, ValueStore};
