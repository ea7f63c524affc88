//! Request/query types (Deserialize)

use chrono::{DateTime, Utc};
use health_gauge_core::{Bucket, FieldError, GaugeForm, ParseBucketError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub bucket: Option<String>,
}

impl HistoryQuery {
    /// Missing or blank means monthly buckets.
    pub fn bucket(&self) -> Result<Bucket, ParseBucketError> {
        match self.bucket.as_deref().map(str::trim) {
            None | Some("") => Ok(Bucket::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// Form body for recording a value from the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValueForm {
    pub value: String,
    pub recorded_at: String,
}

/// JSON gauge body. Fields stay loosely typed so a wrong type becomes a
/// field error instead of a rejected body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GaugePayload {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub unit: Option<Value>,
    pub icon: Option<Value>,
    pub target: Option<Value>,
    pub step: Option<Value>,
}

impl GaugePayload {
    /// Text view of the payload, validated like a submitted form.
    #[must_use]
    pub fn into_form(self) -> GaugeForm {
        GaugeForm {
            name: as_text(self.name),
            description: as_text(self.description),
            unit: as_text(self.unit),
            icon: as_text(self.icon),
            target: as_text(self.target),
            step: as_text(self.step),
            method: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordValueRequest {
    pub value: Option<Value>,
    pub recorded_at: Option<Value>,
}

impl RecordValueRequest {
    /// Parses both fields, collecting every failure.
    pub fn parse(&self) -> Result<(f64, Option<DateTime<Utc>>), Vec<FieldError>> {
        let mut errors = Vec::new();
        let value = match self.value.as_ref().and_then(numeric) {
            Some(v) => v,
            None => {
                errors.push(FieldError::new("value", "Value must be a valid number"));
                0.0
            },
        };
        let recorded_at = match &self.recorded_at {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) if raw.trim().is_empty() => None,
            Some(Value::String(raw)) => match DateTime::parse_from_rfc3339(raw.trim()) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(_) => {
                    errors.push(FieldError::new("recorded_at", "Recorded at must be an RFC 3339 timestamp"));
                    None
                },
            },
            Some(_) => {
                errors.push(FieldError::new("recorded_at", "Recorded at must be an RFC 3339 timestamp"));
                None
            },
        };
        if errors.is_empty() { Ok((value, recorded_at)) } else { Err(errors) }
    }
}

fn as_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
