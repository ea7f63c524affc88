//! Gauge management pages: create/edit forms, update and delete.
//!
//! Full-page submissions redirect back to `/admin`; htmx deletes get an
//! empty fragment so the table row is swapped out in place.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use health_gauge_core::{DEFAULT_ICON, FieldError, GaugeForm, validate_gauge_form};
use health_gauge_service::ServiceError;

use super::{METHOD_OVERRIDE_HEADER, is_htmx};
use crate::page_error::PageError;
use crate::views::{self, FormMode};
use crate::AppState;

const ADMIN_PATH: &str = "/admin";

pub async fn new_gauge_form() -> Html<String> {
    let form = GaugeForm { icon: DEFAULT_ICON.to_owned(), ..GaugeForm::default() };
    Html(views::gauge_form_page(FormMode::Create, &form, &[]))
}

pub async fn edit_gauge_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let gauge = state.gauges.get_gauge(id).await?;
    Ok(Html(views::gauge_form_page(FormMode::Edit(id), &GaugeForm::from(&gauge), &[])))
}

pub async fn create_gauge(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GaugeForm>,
) -> Result<Response, PageError> {
    let (input, errors) = validate_gauge_form(&form);
    if !errors.is_empty() {
        return Ok(invalid_form(FormMode::Create, &form, &errors));
    }
    match state.gauges.create_gauge(input).await {
        Ok(_) => Ok(Redirect::to(ADMIN_PATH).into_response()),
        Err(ServiceError::Validation(errors)) => Ok(invalid_form(FormMode::Create, &form, &errors)),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_gauge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<GaugeForm>,
) -> Result<Response, PageError> {
    apply_update(&state, id, &form).await
}

pub async fn delete_gauge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    apply_delete(&state, id, &headers).await
}

/// `POST /admin/gauges/{id}`: the real method comes from the override
/// header or, for plain HTML forms, the `_method` field.
///
/// The body is optional: a header-only `DELETE` carries none.
pub async fn override_method(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    form: Result<Form<GaugeForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.ok().map(|Form(form)| form);
    let method = headers
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| form.as_ref().and_then(|f| f.method.as_deref()))
        .map(|m| m.trim().to_ascii_uppercase());

    match (method.as_deref(), form) {
        (Some("PUT"), Some(form)) => apply_update(&state, id, &form).await,
        (Some("PUT"), None) => Err(PageError::BadRequest("Form data is required".to_owned())),
        (Some("DELETE"), _) => apply_delete(&state, id, &headers).await,
        (other, _) => {
            tracing::debug!(gauge_id = id, method = ?other, "rejected method override");
            Err(PageError::MethodNotAllowed)
        },
    }
}

async fn apply_update(state: &AppState, id: i64, form: &GaugeForm) -> Result<Response, PageError> {
    let mode = FormMode::Edit(id);
    let (input, errors) = validate_gauge_form(form);
    if !errors.is_empty() {
        return Ok(invalid_form(mode, form, &errors));
    }
    match state.gauges.update_gauge(id, input).await {
        Ok(_) => Ok(Redirect::to(ADMIN_PATH).into_response()),
        Err(ServiceError::Validation(errors)) => Ok(invalid_form(mode, form, &errors)),
        Err(e) => Err(e.into()),
    }
}

async fn apply_delete(
    state: &AppState,
    id: i64,
    headers: &HeaderMap,
) -> Result<Response, PageError> {
    state.gauges.delete_gauge(id).await?;
    if is_htmx(headers) {
        Ok((StatusCode::OK, Html(String::new())).into_response())
    } else {
        Ok(Redirect::to(ADMIN_PATH).into_response())
    }
}

fn invalid_form(mode: FormMode, form: &GaugeForm, errors: &[FieldError]) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(views::gauge_form_page(mode, form, errors)))
        .into_response()
}
