use std::sync::Arc;

use anyhow::Result;
use health_gauge_core::ServerConfig;
use health_gauge_http::{AppState, create_router};
use health_gauge_service::GaugeService;
use health_gauge_storage::SqliteStorage;

pub(crate) async fn run(config: ServerConfig) -> Result<()> {
    let storage = SqliteStorage::with_pool_size(&config.db_path, config.pool_size).await?;
    let gauges = Arc::new(GaugeService::new(Arc::new(storage.clone())));
    let router = create_router(Arc::new(AppState::new(gauges)));

    let addr = config.bind_addr();
    tracing::info!(db = %config.db_path.display(), "Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    storage.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
