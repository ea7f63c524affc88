use async_trait::async_trait;
use chrono::{DateTime, Utc};
use health_gauge_core::{Bucket, BucketAverage, GaugeValue};

use crate::error::StorageError;

/// Observations recorded against gauges.
#[async_trait]
pub trait ValueStore: Send + Sync {
    /// Append an observation. Fails with `NotFound` if the gauge is absent.
    async fn record_value(
        &self,
        gauge_id: i64,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<GaugeValue, StorageError>;

    /// Most recently written value, or 0 when nothing has been recorded yet.
    async fn current_value(&self, gauge_id: i64) -> Result<f64, StorageError>;

    /// Atomically append `current + delta` and return it.
    ///
    /// A negative `delta` never takes the result below zero.
    async fn adjust_value(
        &self,
        gauge_id: i64,
        delta: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<f64, StorageError>;

    /// Per-bucket averages, most recent bucket first. Empty buckets are absent.
    async fn history(
        &self,
        gauge_id: i64,
        bucket: Bucket,
    ) -> Result<Vec<BucketAverage>, StorageError>;
}
