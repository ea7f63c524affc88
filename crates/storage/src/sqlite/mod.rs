//! `SQLite` storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod gauges;
mod values;

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use health_gauge_core::{Gauge, SQLITE_BUSY_TIMEOUT_SECS, SQLITE_POOL_MAX_CONNECTIONS};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};

use crate::error::StorageError;
use crate::migrations::run_migrations;

pub(crate) const GAUGE_COLUMNS: &str =
    "id, name, description, unit, icon, target, step, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if missing) the database at `db_path` and migrate it.
    pub async fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, SQLITE_POOL_MAX_CONNECTIONS).await
    }

    pub async fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Migration(format!(
                "cannot create database directory {}: {e}",
                parent.display()
            )))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .connect_with(options)
            .await?;

        run_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(path = %db_path.display(), pool_size, "SqliteStorage initialized");
        Ok(Self { pool })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn ensure_gauge_exists(&self, id: i64) -> Result<(), StorageError> {
        let found = sqlx::query("SELECT 1 FROM gauges WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found.map(|_| ()).ok_or(StorageError::gauge_not_found(id))
    }
}

pub(crate) fn row_to_gauge(row: &SqliteRow) -> Result<Gauge, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Gauge {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        unit: row.try_get("unit")?,
        icon: row.try_get("icon")?,
        target: row.try_get("target")?,
        step: row.try_get("step")?,
        created_at,
        updated_at,
    })
}
