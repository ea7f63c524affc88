//! Gauge form validation.
//!
//! Every rule runs on every submission so the form can show all problems at
//! once. An unparsable target is replaced by 0 so rendering never needs a
//! second failure path.

use serde::{Deserialize, Serialize};

use crate::gauge::{Gauge, GaugeInput};

/// A problem with one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Raw gauge form as submitted by the browser. Every field is text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeForm {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub icon: String,
    pub target: String,
    pub step: String,
    /// Method override for plain HTML forms (`PUT` / `DELETE`).
    #[serde(rename = "_method", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl From<&Gauge> for GaugeForm {
    fn from(gauge: &Gauge) -> Self {
        Self {
            name: gauge.name.clone(),
            description: gauge.description.clone().unwrap_or_default(),
            unit: gauge.unit.clone(),
            icon: gauge.icon.clone(),
            target: gauge.target.to_string(),
            step: gauge.step.map(|s| s.to_string()).unwrap_or_default(),
            method: None,
        }
    }
}

/// Parse and check a submitted form.
///
/// Returns the parsed fields (with placeholders for unparsable numbers) and
/// every rule violation found.
#[must_use]
pub fn validate_gauge_form(form: &GaugeForm) -> (GaugeInput, Vec<FieldError>) {
    let target = parse_finite(&form.target);
    let step_raw = form.step.trim();
    let step = if step_raw.is_empty() { Ok(None) } else { parse_finite(step_raw).map(Some) };

    let input = GaugeInput {
        name: form.name.clone(),
        description: Some(form.description.clone()),
        unit: form.unit.clone(),
        icon: form.icon.clone(),
        target: target.unwrap_or(0.0),
        step: step.clone().ok().flatten(),
    }
    .normalized();

    let mut errors = required_field_errors(&input);
    if target.is_err() {
        errors.push(target_error());
    }
    match step {
        Ok(Some(s)) if s <= 0.0 => errors.push(step_error()),
        Ok(_) => {},
        Err(()) => errors.push(step_error()),
    }
    (input, errors)
}

/// Check an already-typed input, as the service receives it.
#[must_use]
pub fn validate_gauge_input(input: &GaugeInput) -> Vec<FieldError> {
    let mut errors = required_field_errors(input);
    if !input.target.is_finite() {
        errors.push(target_error());
    }
    if input.step.is_some_and(|s| !s.is_finite() || s <= 0.0) {
        errors.push(step_error());
    }
    errors
}

fn required_field_errors(input: &GaugeInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if input.icon.trim().is_empty() {
        errors.push(FieldError::new("icon", "Icon is required"));
    }
    if input.unit.trim().is_empty() {
        errors.push(FieldError::new("unit", "Unit is required"));
    }
    errors
}

fn target_error() -> FieldError {
    FieldError::new("target", "Target must be a valid number")
}

fn step_error() -> FieldError {
    FieldError::new("step", "Step must be a positive number")
}

fn parse_finite(raw: &str) -> Result<f64, ()> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, unit: &str, icon: &str, target: &str) -> GaugeForm {
        GaugeForm {
            name: name.to_owned(),
            unit: unit.to_owned(),
            icon: icon.to_owned(),
            target: target.to_owned(),
            ..GaugeForm::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let (input, errors) = validate_gauge_form(&form("Water", "liters", "droplet", "2"));
        assert!(errors.is_empty());
        assert_eq!(input.name, "Water");
        assert_eq!(input.target, 2.0);
        assert_eq!(input.description, None);
        assert_eq!(input.step, None);
    }

    #[test]
    fn test_collects_every_error() {
        let (input, errors) = validate_gauge_form(&form("", "", "", "lots"));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "icon", "unit", "target"]);
        assert_eq!(input.target, 0.0);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let (_, errors) = validate_gauge_form(&form("   ", "kg", "scale", "70"));
        assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
    }

    #[test]
    fn test_empty_and_non_finite_target() {
        let (_, errors) = validate_gauge_form(&form("Sleep", "hours", "moon", ""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "target");

        let (_, errors) = validate_gauge_form(&form("Sleep", "hours", "moon", "inf"));
        assert_eq!(errors[0].field, "target");
    }

    #[test]
    fn test_negative_and_zero_target_allowed() {
        let (input, errors) = validate_gauge_form(&form("Weight delta", "kg", "scale", "-2.5"));
        assert!(errors.is_empty());
        assert_eq!(input.target, -2.5);

        let (_, errors) = validate_gauge_form(&form("Zero", "kg", "scale", "0"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_step_rules() {
        let mut f = form("Steps", "steps", "walk", "10000");
        f.step = "500".to_owned();
        let (input, errors) = validate_gauge_form(&f);
        assert!(errors.is_empty());
        assert_eq!(input.step, Some(500.0));

        f.step = "0".to_owned();
        let (_, errors) = validate_gauge_form(&f);
        assert_eq!(errors, vec![FieldError::new("step", "Step must be a positive number")]);

        f.step = "abc".to_owned();
        let (input, errors) = validate_gauge_form(&f);
        assert_eq!(errors.len(), 1);
        assert_eq!(input.step, None);
    }

    #[test]
    fn test_validate_typed_input() {
        let mut input = GaugeInput::new("Water", "liters", "droplet", f64::NAN);
        input.step = Some(-1.0);
        let fields: Vec<String> = validate_gauge_input(&input).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["target", "step"]);
    }

    #[test]
    fn test_form_from_gauge_round_trips_fields() {
        let now = chrono::Utc::now();
        let gauge = Gauge {
            id: 3,
            name: "Water".to_owned(),
            description: Some("Daily intake".to_owned()),
            unit: "liters".to_owned(),
            icon: "droplet".to_owned(),
            target: 2.5,
            step: None,
            created_at: now,
            updated_at: now,
        };
        let form = GaugeForm::from(&gauge);
        assert_eq!(form.target, "2.5");
        assert_eq!(form.step, "");
        let (input, errors) = validate_gauge_form(&form);
        assert!(errors.is_empty());
        assert_eq!(input, gauge.to_input());
    }
}
