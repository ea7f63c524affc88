#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod admin;
pub mod api;
pub mod gauges;
pub mod pages;

use axum::http::HeaderMap;

/// Set by htmx on every request it issues.
pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Lets clients without native PUT/DELETE tunnel them through POST.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
