//! Test utilities and module declarations for storage tests.

use chrono::{DateTime, TimeZone, Utc};
use health_gauge_core::GaugeInput;
use tempfile::TempDir;

use crate::SqliteStorage;

pub async fn create_test_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = SqliteStorage::new(&db_path).await.unwrap();
    (storage, temp_dir)
}

pub fn test_input(name: &str, unit: &str) -> GaugeInput {
    GaugeInput::new(name, unit, "star", 100.0).with_description("Test Description")
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

mod history_tests;
mod value_tests;
