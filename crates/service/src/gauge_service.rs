//! Gauge orchestration: validation in front of storage, step policy for
//! increment/decrement, and readings for rendering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use health_gauge_core::{
    Bucket, BucketAverage, Gauge, GaugeInput, GaugeReading, GaugeValue, validate_gauge_input,
};
use health_gauge_storage::StorageBackend;

use crate::error::ServiceError;

pub struct GaugeService {
    storage: Arc<dyn StorageBackend>,
}

impl GaugeService {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn list_gauges(&self) -> Result<Vec<Gauge>, ServiceError> {
        Ok(self.storage.list_gauges().await?)
    }

    /// Every gauge paired with its current value, in listing order.
    pub async fn list_readings(&self) -> Result<Vec<GaugeReading>, ServiceError> {
        let gauges = self.storage.list_gauges().await?;
        let mut readings = Vec::with_capacity(gauges.len());
        for gauge in gauges {
            let value = self.storage.current_value(gauge.id).await?;
            readings.push(GaugeReading::new(gauge, value));
        }
        Ok(readings)
    }

    pub async fn get_gauge(&self, id: i64) -> Result<Gauge, ServiceError> {
        Ok(self.storage.get_gauge(id).await?)
    }

    pub async fn get_reading(&self, id: i64) -> Result<GaugeReading, ServiceError> {
        let gauge = self.storage.get_gauge(id).await?;
        let value = self.storage.current_value(id).await?;
        Ok(GaugeReading::new(gauge, value))
    }

    pub async fn create_gauge(&self, input: GaugeInput) -> Result<Gauge, ServiceError> {
        let input = checked(input)?;
        let gauge = self.storage.create_gauge(&input).await?;
        tracing::info!(gauge_id = gauge.id, name = %gauge.name, "Gauge created");
        Ok(gauge)
    }

    /// Full overwrite of the mutable fields; returns the stored result.
    pub async fn update_gauge(&self, id: i64, input: GaugeInput) -> Result<Gauge, ServiceError> {
        let input = checked(input)?;
        self.storage.update_gauge(id, &input).await?;
        tracing::info!(gauge_id = id, "Gauge updated");
        Ok(self.storage.get_gauge(id).await?)
    }

    pub async fn delete_gauge(&self, id: i64) -> Result<(), ServiceError> {
        self.storage.delete_gauge(id).await?;
        tracing::info!(gauge_id = id, "Gauge deleted");
        Ok(())
    }

    pub async fn record_value(
        &self,
        gauge_id: i64,
        value: f64,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<GaugeValue, ServiceError> {
        if !value.is_finite() {
            return Err(ServiceError::validation("value", "Value must be a valid number"));
        }
        let recorded_at = recorded_at.unwrap_or_else(Utc::now);
        Ok(self.storage.record_value(gauge_id, value, recorded_at).await?)
    }

    pub async fn current_value(&self, gauge_id: i64) -> Result<f64, ServiceError> {
        Ok(self.storage.current_value(gauge_id).await?)
    }

    pub async fn history(
        &self,
        gauge_id: i64,
        bucket: Bucket,
    ) -> Result<Vec<BucketAverage>, ServiceError> {
        Ok(self.storage.history(gauge_id, bucket).await?)
    }

    pub async fn increment(&self, gauge_id: i64) -> Result<GaugeReading, ServiceError> {
        self.step(gauge_id, 1.0).await
    }

    /// Never goes below zero.
    pub async fn decrement(&self, gauge_id: i64) -> Result<GaugeReading, ServiceError> {
        self.step(gauge_id, -1.0).await
    }

    async fn step(&self, gauge_id: i64, direction: f64) -> Result<GaugeReading, ServiceError> {
        let gauge = self.storage.get_gauge(gauge_id).await?;
        let delta = direction * gauge.step_size();
        let value = self.storage.adjust_value(gauge_id, delta, Utc::now()).await?;
        tracing::debug!(gauge_id, delta, value, "Gauge adjusted");
        Ok(GaugeReading::new(gauge, value))
    }
}

fn checked(input: GaugeInput) -> Result<GaugeInput, ServiceError> {
    let input = input.normalized();
    let errors = validate_gauge_input(&input);
    if errors.is_empty() {
        Ok(input)
    } else {
        Err(ServiceError::Validation(errors))
    }
}
