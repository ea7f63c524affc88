//! Gauge definitions and observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::step::effective_step;

/// A tracked metric definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub icon: String,
    pub target: f64,
    /// Explicit increment step. `None` falls back to the unit heuristic.
    pub step: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gauge {
    /// Amount added or removed by one dashboard "+"/"-" press.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        effective_step(self.step, &self.unit)
    }

    /// The mutable fields of this gauge, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn to_input(&self) -> GaugeInput {
        GaugeInput {
            name: self.name.clone(),
            description: self.description.clone(),
            unit: self.unit.clone(),
            icon: self.icon.clone(),
            target: self.target,
            step: self.step,
        }
    }
}

/// Mutable gauge fields, used for both creation and full-overwrite updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit: String,
    pub icon: String,
    pub target: f64,
    #[serde(default)]
    pub step: Option<f64>,
}

impl GaugeInput {
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, icon: impl Into<String>, target: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit: unit.into(),
            icon: icon.into(),
            target,
            step: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Trim text fields and drop a blank description.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            description: self
                .description
                .map(|d| d.trim().to_owned())
                .filter(|d| !d.is_empty()),
            unit: self.unit.trim().to_owned(),
            icon: self.icon.trim().to_owned(),
            target: self.target,
            step: self.step,
        }
    }
}

/// One timestamped observation recorded against a gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeValue {
    pub id: i64,
    pub gauge_id: i64,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// A gauge together with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    #[serde(flatten)]
    pub gauge: Gauge,
    pub value: f64,
}

impl GaugeReading {
    #[must_use]
    pub const fn new(gauge: Gauge, value: f64) -> Self {
        Self { gauge, value }
    }

    /// Progress towards the target in percent. A zero target reports 0.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.gauge.target == 0.0 {
            return 0.0;
        }
        self.value / self.gauge.target * 100.0
    }

    #[must_use]
    pub fn is_over_target(&self) -> bool {
        self.gauge.target > 0.0 && self.value > self.gauge.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(target: f64, unit: &str) -> Gauge {
        let now = Utc::now();
        Gauge {
            id: 1,
            name: "Test Gauge".to_owned(),
            description: None,
            unit: unit.to_owned(),
            icon: "star".to_owned(),
            target,
            step: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_progress_with_target() {
        let reading = GaugeReading::new(gauge(100.0, "units"), 80.0);
        assert!((reading.progress_percent() - 80.0).abs() < f64::EPSILON);
        assert!(!reading.is_over_target());
    }

    #[test]
    fn test_progress_with_zero_target() {
        let reading = GaugeReading::new(gauge(0.0, "units"), 80.0);
        assert_eq!(reading.progress_percent(), 0.0);
        assert!(!reading.is_over_target());
    }

    #[test]
    fn test_over_target() {
        let reading = GaugeReading::new(gauge(100.0, "units"), 150.0);
        assert!(reading.is_over_target());
    }

    #[test]
    fn test_normalized_drops_blank_description() {
        let input = GaugeInput::new("  Water ", " liters", "droplet ", 2.0).with_description("   ");
        let input = input.normalized();
        assert_eq!(input.name, "Water");
        assert_eq!(input.unit, "liters");
        assert_eq!(input.icon, "droplet");
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_reading_serializes_flat() {
        let reading = GaugeReading::new(gauge(10.0, "hours"), 7.5);
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["name"], "Test Gauge");
        assert_eq!(json["value"], 7.5);
    }
}
