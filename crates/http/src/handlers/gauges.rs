//! Dashboard controls. Every handler answers with an HTML fragment.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::response::Html;
use chrono::{DateTime, Utc};

use crate::page_error::PageError;
use crate::query_types::{HistoryQuery, ValueForm};
use crate::{views, AppState};

pub async fn increment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let reading = state.gauges.increment(id).await?;
    Ok(Html(views::gauge_card(&reading)))
}

pub async fn decrement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let reading = state.gauges.decrement(id).await?;
    Ok(Html(views::gauge_card(&reading)))
}

pub async fn record_value(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<ValueForm>,
) -> Result<Html<String>, PageError> {
    let value = form
        .value
        .trim()
        .parse::<f64>()
        .map_err(|_| PageError::BadRequest("Value must be a valid number".to_owned()))?;
    let recorded_at = parse_recorded_at(&form.recorded_at)?;
    state.gauges.record_value(id, value, recorded_at).await?;
    let reading = state.gauges.get_reading(id).await?;
    Ok(Html(views::gauge_card(&reading)))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Result<Html<String>, PageError> {
    let bucket = query.bucket().map_err(|e| PageError::BadRequest(e.to_string()))?;
    let gauge = state.gauges.get_gauge(id).await?;
    let averages = state.gauges.history(id, bucket).await?;
    Ok(Html(views::history_fragment(&gauge, bucket, &averages)))
}

fn parse_recorded_at(raw: &str) -> Result<Option<DateTime<Utc>>, PageError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(raw).map(|t| Some(t.with_timezone(&Utc))).map_err(|_| {
        PageError::BadRequest("Recorded at must be an RFC 3339 timestamp".to_owned())
    })
}
