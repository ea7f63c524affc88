use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::page_error::PageError;
use crate::{views, AppState};

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let readings = state.gauges.list_readings().await?;
    Ok(Html(views::dashboard_page(&readings)))
}

pub async fn admin(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let gauges = state.gauges.list_gauges().await?;
    Ok(Html(views::admin_page(&gauges)))
}
