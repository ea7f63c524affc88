//! Increment step policy for the dashboard "+"/"-" controls.

use crate::constants::{DEFAULT_INCREMENT, HOUR_INCREMENT, LITER_INCREMENT, STEP_COUNT_INCREMENT};

/// Step implied by a unit label. Matching is a case-insensitive substring test.
#[must_use]
pub fn default_step_for_unit(unit: &str) -> f64 {
    let unit = unit.to_lowercase();
    if unit.contains("step") {
        STEP_COUNT_INCREMENT
    } else if unit.contains("liter") || unit.contains("litre") {
        LITER_INCREMENT
    } else if unit.contains("hour") {
        HOUR_INCREMENT
    } else {
        DEFAULT_INCREMENT
    }
}

/// A configured step wins when it is usable; otherwise the unit decides.
#[must_use]
pub fn effective_step(configured: Option<f64>, unit: &str) -> f64 {
    match configured {
        Some(step) if step.is_finite() && step > 0.0 => step,
        _ => default_step_for_unit(unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_heuristics() {
        assert_eq!(default_step_for_unit("steps"), 1000.0);
        assert_eq!(default_step_for_unit("Daily Steps"), 1000.0);
        assert_eq!(default_step_for_unit("liters"), 0.1);
        assert_eq!(default_step_for_unit("litres"), 0.1);
        assert_eq!(default_step_for_unit("hours"), 0.5);
        assert_eq!(default_step_for_unit("glasses"), 1.0);
    }

    #[test]
    fn test_configured_step_wins() {
        assert_eq!(effective_step(Some(250.0), "steps"), 250.0);
    }

    #[test]
    fn test_unusable_configured_step_falls_back() {
        assert_eq!(effective_step(Some(0.0), "hours"), 0.5);
        assert_eq!(effective_step(Some(-1.0), "hours"), 0.5);
        assert_eq!(effective_step(Some(f64::NAN), "hours"), 0.5);
        assert_eq!(effective_step(None, "kcal"), 1.0);
    }
}
