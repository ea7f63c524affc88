use async_trait::async_trait;
use health_gauge_core::{Gauge, GaugeInput};

use crate::error::StorageError;

/// CRUD operations on gauge definitions.
#[async_trait]
pub trait GaugeStore: Send + Sync {
    /// Insert a gauge and return it with its assigned id and timestamps.
    async fn create_gauge(&self, input: &GaugeInput) -> Result<Gauge, StorageError>;

    /// Get gauge by id. Fails with `NotFound` if absent.
    async fn get_gauge(&self, id: i64) -> Result<Gauge, StorageError>;

    /// All gauges in id (creation) order.
    async fn list_gauges(&self) -> Result<Vec<Gauge>, StorageError>;

    /// Overwrite every mutable field. Fails with `NotFound` if absent.
    async fn update_gauge(&self, id: i64, input: &GaugeInput) -> Result<(), StorageError>;

    /// Delete a gauge and all of its values. Fails with `NotFound` if absent.
    async fn delete_gauge(&self, id: i64) -> Result<(), StorageError>;
}
