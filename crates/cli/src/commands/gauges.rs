//! One-shot commands against the local database. Output is pretty JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use health_gauge_core::{Bucket, ServerConfig};
use health_gauge_service::{GaugeService, ServiceError};
use health_gauge_storage::SqliteStorage;

async fn open(config: &ServerConfig) -> Result<GaugeService> {
    let storage = SqliteStorage::with_pool_size(&config.db_path, config.pool_size)
        .await
        .with_context(|| format!("opening database {}", config.db_path.display()))?;
    Ok(GaugeService::new(Arc::new(storage)))
}

fn describe(err: ServiceError, id: i64) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("Gauge not found: {id}")
    } else {
        err.into()
    }
}

pub(crate) async fn run_list(config: &ServerConfig) -> Result<()> {
    let readings = open(config).await?.list_readings().await?;
    println!("{}", serde_json::to_string_pretty(&readings)?);
    Ok(())
}

pub(crate) async fn run_show(config: &ServerConfig, id: i64) -> Result<()> {
    let reading = open(config).await?.get_reading(id).await.map_err(|e| describe(e, id))?;
    println!("{}", serde_json::to_string_pretty(&reading)?);
    Ok(())
}

pub(crate) async fn run_history(config: &ServerConfig, id: i64, bucket: Bucket) -> Result<()> {
    let history = open(config).await?.history(id, bucket).await.map_err(|e| describe(e, id))?;
    println!("{}", serde_json::to_string_pretty(&history)?);
    Ok(())
}

pub(crate) async fn run_record(config: &ServerConfig, id: i64, value: f64) -> Result<()> {
    let recorded =
        open(config).await?.record_value(id, value, None).await.map_err(|e| describe(e, id))?;
    println!("{}", serde_json::to_string_pretty(&recorded)?);
    Ok(())
}
