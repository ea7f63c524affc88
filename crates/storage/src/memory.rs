//! In-memory storage backend.
//!
//! Same observable semantics as `SqliteStorage`; everything is lost on drop.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use health_gauge_core::{Bucket, BucketAverage, Gauge, GaugeInput, GaugeValue};

use crate::error::StorageError;
use crate::traits::{GaugeStore, ValueStore};

#[derive(Debug, Default)]
struct MemoryState {
    gauges: BTreeMap<i64, Gauge>,
    /// Insertion order, so the last matching entry is the current value.
    values: Vec<GaugeValue>,
    last_gauge_id: i64,
    last_value_id: i64,
}

impl MemoryState {
    fn ensure_gauge(&self, id: i64) -> Result<(), StorageError> {
        if self.gauges.contains_key(&id) {
            Ok(())
        } else {
            Err(StorageError::gauge_not_found(id))
        }
    }

    fn latest_value(&self, gauge_id: i64) -> f64 {
        self.values.iter().rev().find(|v| v.gauge_id == gauge_id).map_or(0.0, |v| v.value)
    }

    fn push_value(&mut self, gauge_id: i64, value: f64, recorded_at: DateTime<Utc>) -> GaugeValue {
        self.last_value_id += 1;
        let entry = GaugeValue { id: self.last_value_id, gauge_id, value, recorded_at };
        self.values.push(entry.clone());
        entry
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // The state is only mutated under the lock with no panicking paths in between.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GaugeStore for MemoryStorage {
    async fn create_gauge(&self, input: &GaugeInput) -> Result<Gauge, StorageError> {
        let mut state = self.lock();
        state.last_gauge_id += 1;
        let now = Utc::now();
        let gauge = Gauge {
            id: state.last_gauge_id,
            name: input.name.clone(),
            description: input.description.clone(),
            unit: input.unit.clone(),
            icon: input.icon.clone(),
            target: input.target,
            step: input.step,
            created_at: now,
            updated_at: now,
        };
        state.gauges.insert(gauge.id, gauge.clone());
        Ok(gauge)
    }

    async fn get_gauge(&self, id: i64) -> Result<Gauge, StorageError> {
        self.lock().gauges.get(&id).cloned().ok_or(StorageError::gauge_not_found(id))
    }

    async fn list_gauges(&self) -> Result<Vec<Gauge>, StorageError> {
        Ok(self.lock().gauges.values().cloned().collect())
    }

    async fn update_gauge(&self, id: i64, input: &GaugeInput) -> Result<(), StorageError> {
        let mut state = self.lock();
        let gauge = state.gauges.get_mut(&id).ok_or(StorageError::gauge_not_found(id))?;
        gauge.name.clone_from(&input.name);
        gauge.description.clone_from(&input.description);
        gauge.unit.clone_from(&input.unit);
        gauge.icon.clone_from(&input.icon);
        gauge.target = input.target;
        gauge.step = input.step;
        gauge.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_gauge(&self, id: i64) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.gauges.remove(&id).is_none() {
            return Err(StorageError::gauge_not_found(id));
        }
        state.values.retain(|v| v.gauge_id != id);
        Ok(())
    }
}

#[async_trait]
impl ValueStore for MemoryStorage {
    async fn record_value(
        &self,
        gauge_id: i64,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<GaugeValue, StorageError> {
        let mut state = self.lock();
        state.ensure_gauge(gauge_id)?;
        Ok(state.push_value(gauge_id, value, recorded_at))
    }

    async fn current_value(&self, gauge_id: i64) -> Result<f64, StorageError> {
        let state = self.lock();
        state.ensure_gauge(gauge_id)?;
        Ok(state.latest_value(gauge_id))
    }

    async fn adjust_value(
        &self,
        gauge_id: i64,
        delta: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<f64, StorageError> {
        let mut state = self.lock();
        state.ensure_gauge(gauge_id)?;
        let next = state.latest_value(gauge_id) + delta;
        let next = if delta < 0.0 { next.max(0.0) } else { next };
        Ok(state.push_value(gauge_id, next, recorded_at).value)
    }

    async fn history(
        &self,
        gauge_id: i64,
        bucket: Bucket,
    ) -> Result<Vec<BucketAverage>, StorageError> {
        let state = self.lock();
        state.ensure_gauge(gauge_id)?;
        let mut groups: BTreeMap<String, (f64, i64)> = BTreeMap::new();
        for v in state.values.iter().filter(|v| v.gauge_id == gauge_id) {
            let entry = groups.entry(bucket.label(v.recorded_at)).or_insert((0.0, 0));
            entry.0 += v.value;
            entry.1 += 1;
        }
        Ok(groups
            .into_iter()
            .rev()
            .map(|(label, (sum, samples))| BucketAverage {
                bucket: label,
                average: sum / samples as f64,
                samples,
            })
            .collect())
    }
}
