//! HTTP server for health-gauge.
//!
//! Server-rendered pages and HTMX fragments for the dashboard and admin
//! screens, plus a small JSON API over the same service.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
pub mod page_error;
mod query_types;
mod views;


use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use health_gauge_service::GaugeService;
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Gauge CRUD, readings and history
    pub gauges: Arc<GaugeService>,
}

impl AppState {
    #[must_use]
    pub const fn new(gauges: Arc<GaugeService>) -> Self {
        Self { gauges }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::pages::dashboard))
        .route("/admin", get(handlers::pages::admin))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/admin/gauges", post(handlers::admin::create_gauge))
        .route("/admin/gauges/new", get(handlers::admin::new_gauge_form))
        .route(
            "/admin/gauges/{id}",
            get(handlers::admin::edit_gauge_form)
                .put(handlers::admin::update_gauge)
                .post(handlers::admin::override_method)
                .delete(handlers::admin::delete_gauge),
        )
        .route("/gauges/{id}/increment", post(handlers::gauges::increment))
        .route("/gauges/{id}/decrement", post(handlers::gauges::decrement))
        .route("/gauges/{id}/values", post(handlers::gauges::record_value))
        .route("/gauges/{id}/history", get(handlers::gauges::history))
        .route("/api/gauges", get(handlers::api::list_gauges).post(handlers::api::create_gauge))
        .route(
            "/api/gauges/{id}",
            get(handlers::api::get_gauge)
                .put(handlers::api::update_gauge)
                .delete(handlers::api::delete_gauge),
        )
        .route("/api/gauges/{id}/values", post(handlers::api::record_value))
        .route("/api/gauges/{id}/history", get(handlers::api::history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
