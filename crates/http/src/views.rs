//! Server-side HTML rendering.
//!
//! Full pages are wrapped in the embedded layout; fragments returned to HTMX
//! requests are plain strings whose root element carries the id the client
//! swaps on (`gauge-{id}`, `history-{id}`).

use axum::http::StatusCode;
use health_gauge_core::{Bucket, BucketAverage, FieldError, Gauge, GaugeForm, GaugeReading};

/// Embedded page shell with `{{title}}` and `{{content}}` slots.
const LAYOUT_HTML: &str = include_str!("layout.html");

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    fn title(self) -> &'static str {
        match self {
            Self::Create => "New Gauge",
            Self::Edit(_) => "Edit Gauge",
        }
    }

    fn action(self) -> String {
        match self {
            Self::Create => "/admin/gauges".to_owned(),
            Self::Edit(id) => format!("/admin/gauges/{id}"),
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn number(value: f64) -> String {
    format!("{value:.1}")
}

pub fn layout(title: &str, content: &str) -> String {
    LAYOUT_HTML.replace("{{title}}", &escape(title)).replace("{{content}}", content)
}

pub fn dashboard_page(readings: &[GaugeReading]) -> String {
    let body = if readings.is_empty() {
        r#"<div class="alert">No gauges yet. <a class="link" href="/admin/gauges/new">Create one</a>.</div>"#
            .to_owned()
    } else {
        let cards: String = readings.iter().map(gauge_card).collect();
        format!(r#"<div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">{cards}</div>"#)
    };
    layout("Dashboard", &body)
}

/// Dashboard card for one gauge; also the fragment returned by value updates.
pub fn gauge_card(reading: &GaugeReading) -> String {
    let gauge = &reading.gauge;
    let id = gauge.id;
    let value_class =
        if reading.is_over_target() { "stat-value text-error animate-pulse" } else { "stat-value" };
    let description = gauge
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="text-base-content/70">{}</p>"#, escape(d)))
        .unwrap_or_default();
    let swap = format!(r##"hx-target="#gauge-{id}" hx-swap="outerHTML" hx-push-url="false""##);

    format!(
        r##"<div id="gauge-{id}" class="card w-full bg-base-100 shadow-xl">
  <div class="card-body">
    <div class="flex items-center justify-between">
      <h2 class="card-title"><i data-lucide="{icon}"></i> {name}</h2>
      <button class="btn btn-ghost btn-sm" hx-get="/gauges/{id}/history" hx-target="#history-{id}" hx-swap="outerHTML">History</button>
    </div>
    {description}
    <div class="stats shadow">
      <div class="stat">
        <div class="stat-title">Current</div>
        <div class="{value_class}">{value}</div>
        <div class="stat-desc">of {target} {unit} ({percent:.0}%)</div>
      </div>
    </div>
    <progress class="progress progress-primary w-full" value="{progress:.0}" max="100"></progress>
    <div class="flex items-center justify-center gap-4 mt-4">
      <button class="btn btn-circle btn-md sm:btn-lg" hx-post="/gauges/{id}/decrement" {swap} aria-label="Decrease">&minus;</button>
      <button class="btn btn-circle btn-md sm:btn-lg" hx-post="/gauges/{id}/increment" {swap} aria-label="Increase">+</button>
    </div>
    <form class="join mt-2" hx-post="/gauges/{id}/values" {swap}>
      <input class="input input-bordered input-sm join-item w-24" type="number" step="any" name="value" placeholder="{value}">
      <button class="btn btn-sm join-item" type="submit">Set</button>
    </form>
    <div id="history-{id}"></div>
  </div>
</div>"##,
        icon = escape(&gauge.icon),
        name = escape(&gauge.name),
        value = number(reading.value),
        target = number(gauge.target),
        unit = escape(&gauge.unit),
        percent = reading.progress_percent(),
        progress = reading.progress_percent().min(100.0),
    )
}

pub fn admin_page(gauges: &[Gauge]) -> String {
    let rows: String = gauges.iter().map(admin_row).collect();
    let body = format!(
        r#"<div class="flex items-center justify-between mb-4">
  <h1 class="text-2xl font-bold">Manage Gauges</h1>
  <a class="btn btn-primary" href="/admin/gauges/new">New Gauge</a>
</div>
<table class="table bg-base-100">
  <thead><tr><th>Name</th><th>Unit</th><th>Target</th><th>Step</th><th></th></tr></thead>
  <tbody>{rows}</tbody>
</table>"#
    );
    layout("Manage Gauges", &body)
}

fn admin_row(gauge: &Gauge) -> String {
    let id = gauge.id;
    format!(
        r#"<tr id="admin-gauge-{id}">
  <td><i data-lucide="{icon}"></i> {name}</td>
  <td>{unit}</td>
  <td>{target}</td>
  <td>{step}</td>
  <td class="flex gap-2">
    <a class="btn btn-sm" href="/admin/gauges/{id}">Edit</a>
    <form method="post" action="/admin/gauges/{id}">
      <input type="hidden" name="_method" value="DELETE">
      <button class="btn btn-sm btn-error" type="submit" hx-delete="/admin/gauges/{id}" hx-target="closest tr" hx-swap="outerHTML" hx-confirm="Delete this gauge and all its values?">Delete</button>
    </form>
  </td>
</tr>"#,
        icon = escape(&gauge.icon),
        name = escape(&gauge.name),
        unit = escape(&gauge.unit),
        target = number(gauge.target),
        step = number(gauge.step_size()),
    )
}

/// Create/edit form, pre-filled with whatever was submitted.
pub fn gauge_form_page(mode: FormMode, form: &GaugeForm, errors: &[FieldError]) -> String {
    let method_field = match mode {
        FormMode::Create => String::new(),
        FormMode::Edit(_) => r#"<input type="hidden" name="_method" value="PUT">"#.to_owned(),
    };
    let fields = [
        input_field("name", "Name", &form.name, "text", errors),
        textarea_field("description", "Description", &form.description),
        input_field("unit", "Unit", &form.unit, "text", errors),
        input_field("icon", "Icon", &form.icon, "text", errors),
        input_field("target", "Target", &form.target, "text", errors),
        input_field("step", "Step (optional)", &form.step, "text", errors),
    ]
    .concat();
    let body = format!(
        r#"<h1 class="text-2xl font-bold mb-4">{title}</h1>
<form class="card bg-base-100 shadow p-6 max-w-lg" method="post" action="{action}">
  {method_field}
  {fields}
  <div class="flex gap-2 mt-4">
    <button class="btn btn-primary" type="submit">Save</button>
    <a class="btn" href="/admin">Cancel</a>
  </div>
</form>"#,
        title = mode.title(),
        action = mode.action(),
    );
    layout(mode.title(), &body)
}

fn input_field(
    name: &str,
    label: &str,
    value: &str,
    kind: &str,
    errors: &[FieldError],
) -> String {
    let error = errors.iter().find(|e| e.field == name);
    let (class, message) = match error {
        Some(e) => (
            "input input-bordered input-error",
            format!(r#"<span class="label-text-alt text-error">{}</span>"#, escape(&e.message)),
        ),
        None => ("input input-bordered", String::new()),
    };
    format!(
        r#"<label class="form-control">
    <span class="label-text">{label}</span>
    <input class="{class}" type="{kind}" name="{name}" value="{value}">
    {message}
  </label>"#,
        value = escape(value),
    )
}

fn textarea_field(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label class="form-control">
    <span class="label-text">{label}</span>
    <textarea class="textarea textarea-bordered" name="{name}">{value}</textarea>
  </label>"#,
        value = escape(value),
    )
}

/// History table for one gauge, newest bucket first.
pub fn history_fragment(gauge: &Gauge, bucket: Bucket, averages: &[BucketAverage]) -> String {
    let id = gauge.id;
    let toggles: String = [Bucket::Month, Bucket::Week]
        .into_iter()
        .map(|b| {
            let active = if b == bucket { " btn-active" } else { "" };
            format!(
                r##"<button class="btn btn-xs join-item{active}" hx-get="/gauges/{id}/history?bucket={b}" hx-target="#history-{id}" hx-swap="outerHTML">{b}</button>"##
            )
        })
        .collect();
    let table = if averages.is_empty() {
        r#"<p class="text-sm text-base-content/70">No values recorded yet.</p>"#.to_owned()
    } else {
        let rows: String = averages
            .iter()
            .map(|a| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(&a.bucket),
                    number(a.average),
                    a.samples
                )
            })
            .collect();
        format!(
            r#"<table class="table table-xs"><thead><tr><th>{bucket}</th><th>Average ({unit})</th><th>Entries</th></tr></thead><tbody>{rows}</tbody></table>"#,
            unit = escape(&gauge.unit),
        )
    };
    format!(
        r#"<div id="history-{id}" class="mt-2">
  <div class="join mb-2">{toggles}</div>
  {table}
</div>"#
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<div class="alert alert-error"><strong>{code}</strong> {message}</div>
<a class="link" href="/">Back to dashboard</a>"#,
        code = status.as_u16(),
        message = escape(message),
    );
    layout(status.canonical_reason().unwrap_or("Error"), &body)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn gauge() -> Gauge {
        let now = Utc::now();
        Gauge {
            id: 1,
            name: "Test Gauge".to_owned(),
            description: Some("Test Description".to_owned()),
            unit: "units".to_owned(),
            icon: "star".to_owned(),
            target: 100.0,
            step: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_gauge_card_content_and_htmx_wiring() {
        let html = gauge_card(&GaugeReading::new(gauge(), 75.0));
        assert!(html.contains("Test Gauge"));
        assert!(html.contains("Test Description"));
        assert!(html.contains("75.0"));
        assert!(html.contains("100.0"));
        assert!(html.contains(r#"id="gauge-1""#));
        assert!(html.contains(r#"hx-post="/gauges/1/increment""#));
        assert!(html.contains(r#"hx-post="/gauges/1/decrement""#));
        assert!(html.contains(r##"hx-target="#gauge-1""##));
        assert!(html.contains(r#"hx-swap="outerHTML""#));
        assert!(!html.contains("animate-pulse"));
    }

    #[test]
    fn test_gauge_card_over_target() {
        let html = gauge_card(&GaugeReading::new(gauge(), 150.0));
        assert!(html.contains(r#"class="stat-value text-error animate-pulse""#));
    }

    #[test]
    fn test_gauge_card_without_description() {
        let mut g = gauge();
        g.description = None;
        let html = gauge_card(&GaugeReading::new(g, 0.0));
        assert!(!html.contains("text-base-content/70"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut g = gauge();
        g.name = "<script>alert('x')</script>".to_owned();
        let html = gauge_card(&GaugeReading::new(g, 1.0));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_form_shows_errors_and_submitted_values() {
        let form = GaugeForm { name: String::new(), target: "lots".to_owned(), ..GaugeForm::default() };
        let errors = vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("target", "Target must be a valid number"),
        ];
        let html = gauge_form_page(FormMode::Create, &form, &errors);
        assert!(html.contains("Name is required"));
        assert!(html.contains("Target must be a valid number"));
        assert!(html.contains(r#"value="lots""#));
        assert!(html.contains(r#"action="/admin/gauges""#));
        assert!(!html.contains("_method"));
    }

    #[test]
    fn test_edit_form_uses_method_override() {
        let html = gauge_form_page(FormMode::Edit(4), &GaugeForm::from(&gauge()), &[]);
        assert!(html.contains(r#"action="/admin/gauges/4""#));
        assert!(html.contains(r#"name="_method" value="PUT""#));
        assert!(html.contains(r#"value="Test Gauge""#));
    }

    #[test]
    fn test_history_fragment() {
        let averages = vec![
            BucketAverage { bucket: "2025-03".to_owned(), average: 100.0, samples: 2 },
            BucketAverage { bucket: "2025-02".to_owned(), average: 75.0, samples: 1 },
        ];
        let html = history_fragment(&gauge(), Bucket::Month, &averages);
        assert!(html.contains(r#"id="history-1""#));
        let newer = html.find("2025-03").unwrap();
        let older = html.find("2025-02").unwrap();
        assert!(newer < older);
        assert!(html.contains("?bucket=week"));

        let empty = history_fragment(&gauge(), Bucket::Week, &[]);
        assert!(empty.contains("No values recorded yet."));
    }

    #[test]
    fn test_error_page_shows_status() {
        let html = error_page(StatusCode::NOT_FOUND, "Gauge not found");
        assert!(html.contains("404"));
        assert!(html.contains("Gauge not found"));
    }
}
