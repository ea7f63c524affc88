//! ValueStore implementation for SqliteStorage.
//!
//! "Current value" is the most recently written row (highest id), not the
//! row with the latest `recorded_at`: a back-dated entry becomes current.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use health_gauge_core::{Bucket, BucketAverage, GaugeValue};
use sqlx::Row;

use super::SqliteStorage;
use crate::error::StorageError;
use crate::traits::ValueStore;

/// Read-clamp-append in one statement, so concurrent adjustments serialize on
/// the SQLite write lock instead of losing updates.
const ADJUST_SQL: &str = "
INSERT INTO gauge_values (gauge_id, value, recorded_at)
SELECT g.id,
       CASE WHEN ?2 < 0 THEN MAX(0.0, cur.value + ?2) ELSE cur.value + ?2 END,
       ?3
FROM gauges g,
     (SELECT COALESCE(
         (SELECT value FROM gauge_values WHERE gauge_id = ?1 ORDER BY id DESC LIMIT 1),
         0.0) AS value) AS cur
WHERE g.id = ?1
RETURNING value";

#[async_trait]
impl ValueStore for SqliteStorage {
    async fn record_value(
        &self,
        gauge_id: i64,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<GaugeValue, StorageError> {
        let result = sqlx::query(
            "INSERT INTO gauge_values (gauge_id, value, recorded_at)
             SELECT id, ?, ? FROM gauges WHERE id = ?",
        )
        .bind(value)
        .bind(recorded_at)
        .bind(gauge_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::gauge_not_found(gauge_id));
        }
        Ok(GaugeValue { id: result.last_insert_rowid(), gauge_id, value, recorded_at })
    }

    async fn current_value(&self, gauge_id: i64) -> Result<f64, StorageError> {
        let row = sqlx::query(
            "SELECT (SELECT value FROM gauge_values WHERE gauge_id = g.id ORDER BY id DESC LIMIT 1)
                    AS value
             FROM gauges g WHERE g.id = ?",
        )
        .bind(gauge_id)
        .fetch_optional(&self.pool)
        .await?;
        let row = row.ok_or(StorageError::gauge_not_found(gauge_id))?;
        let value: Option<f64> = row.try_get("value")?;
        Ok(value.unwrap_or(0.0))
    }

    async fn adjust_value(
        &self,
        gauge_id: i64,
        delta: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<f64, StorageError> {
        let row = sqlx::query(ADJUST_SQL)
            .bind(gauge_id)
            .bind(delta)
            .bind(recorded_at)
            .fetch_optional(&self.pool)
            .await?;
        let row = row.ok_or(StorageError::gauge_not_found(gauge_id))?;
        let value: f64 = row.try_get("value")?;
        tracing::debug!(gauge_id, delta, value, "gauge value adjusted");
        Ok(value)
    }

    async fn history(
        &self,
        gauge_id: i64,
        bucket: Bucket,
    ) -> Result<Vec<BucketAverage>, StorageError> {
        self.ensure_gauge_exists(gauge_id).await?;
        let rows = sqlx::query(&format!(
            "SELECT {} AS bucket_key, AVG(value) AS average, COUNT(*) AS samples
             FROM gauge_values
             WHERE gauge_id = ?
             GROUP BY bucket_key
             ORDER BY bucket_key DESC",
            bucket_key_sql(bucket)
        ))
        .bind(gauge_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<BucketAverage, StorageError> {
                let key: String = row.try_get("bucket_key")?;
                Ok(BucketAverage {
                    bucket: bucket_label(bucket, &key)?,
                    average: row.try_get("average")?,
                    samples: row.try_get("samples")?,
                })
            })
            .collect()
    }
}

/// Grouping key per bucket. Weeks group on their Monday (`YYYY-MM-DD`), which
/// sorts chronologically and needs no ISO week support from SQLite.
const fn bucket_key_sql(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Month => "strftime('%Y-%m', recorded_at)",
        Bucket::Week => "date(recorded_at, 'weekday 0', '-6 days')",
    }
}

fn bucket_label(bucket: Bucket, key: &str) -> Result<String, StorageError> {
    match bucket {
        Bucket::Month => Ok(key.to_owned()),
        Bucket::Week => NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(Bucket::week_label)
            .map_err(|e| StorageError::DataCorruption {
                context: format!("week start '{key}'"),
                source: Box::new(e),
            }),
    }
}
