//! GaugeStore implementation for SqliteStorage.

use async_trait::async_trait;
use chrono::Utc;
use health_gauge_core::{Gauge, GaugeInput};

use super::{GAUGE_COLUMNS, SqliteStorage, row_to_gauge};
use crate::error::StorageError;
use crate::traits::GaugeStore;

#[async_trait]
impl GaugeStore for SqliteStorage {
    async fn create_gauge(&self, input: &GaugeInput) -> Result<Gauge, StorageError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO gauges (name, description, unit, icon, target, step, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.unit)
        .bind(&input.icon)
        .bind(input.target)
        .bind(input.step)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(gauge_id = id, name = %input.name, "gauge created");
        Ok(Gauge {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            unit: input.unit.clone(),
            icon: input.icon.clone(),
            target: input.target,
            step: input.step,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_gauge(&self, id: i64) -> Result<Gauge, StorageError> {
        let row = sqlx::query(&format!("SELECT {GAUGE_COLUMNS} FROM gauges WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => row_to_gauge(&r),
            None => Err(StorageError::gauge_not_found(id)),
        }
    }

    async fn list_gauges(&self) -> Result<Vec<Gauge>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {GAUGE_COLUMNS} FROM gauges ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_gauge).collect()
    }

    async fn update_gauge(&self, id: i64, input: &GaugeInput) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE gauges
             SET name = ?, description = ?, unit = ?, icon = ?, target = ?, step = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.unit)
        .bind(&input.icon)
        .bind(input.target)
        .bind(input.step)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::gauge_not_found(id));
        }
        Ok(())
    }

    async fn delete_gauge(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM gauges WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::gauge_not_found(id));
        }
        tracing::debug!(gauge_id = id, "gauge deleted with its values");
        Ok(())
    }
}
