//! JSON API over the same service the pages use.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use health_gauge_core::{
    BucketAverage, Gauge, GaugeInput, GaugeReading, GaugeValue, validate_gauge_form,
};

use crate::api_error::ApiError;
use crate::query_types::{GaugePayload, HistoryQuery, RecordValueRequest};
use crate::AppState;

pub async fn list_gauges(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GaugeReading>>, ApiError> {
    Ok(Json(state.gauges.list_readings().await?))
}

pub async fn create_gauge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GaugePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Gauge>), ApiError> {
    let input = gauge_input(payload)?;
    let gauge = state.gauges.create_gauge(input).await?;
    Ok((StatusCode::CREATED, Json(gauge)))
}

pub async fn get_gauge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<GaugeReading>, ApiError> {
    Ok(Json(state.gauges.get_reading(id).await?))
}

pub async fn update_gauge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<GaugePayload>, JsonRejection>,
) -> Result<Json<Gauge>, ApiError> {
    let input = gauge_input(payload)?;
    Ok(Json(state.gauges.update_gauge(id, input).await?))
}

pub async fn delete_gauge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.gauges.delete_gauge(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_value(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    req: Result<Json<RecordValueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GaugeValue>), ApiError> {
    let Json(req) = req.map_err(rejected)?;
    let (value, recorded_at) = req.parse().map_err(ApiError::Validation)?;
    let value = state.gauges.record_value(id, value, recorded_at).await?;
    Ok((StatusCode::CREATED, Json(value)))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<BucketAverage>>, ApiError> {
    let bucket = query.bucket().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.gauges.history(id, bucket).await?))
}

/// Runs a JSON body through the form validator so every field error is
/// reported at once.
fn gauge_input(payload: Result<Json<GaugePayload>, JsonRejection>) -> Result<GaugeInput, ApiError> {
    let Json(payload) = payload.map_err(rejected)?;
    let (input, errors) = validate_gauge_form(&payload.into_form());
    if errors.is_empty() { Ok(input) } else { Err(ApiError::Validation(errors)) }
}

fn rejected(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
