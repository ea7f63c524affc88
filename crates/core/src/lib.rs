//! Core types for health-gauge
//!
//! Domain types, form validation and configuration shared by the storage,
//! service, HTTP and CLI crates.

mod config;
mod constants;
mod env_config;
mod error;
mod gauge;
mod history;
mod step;
mod validation;

pub use config::{LogFormat, LoggingConfig, ServerConfig};
pub use constants::*;
pub use env_config::{env_flag, env_parse_with_default};
pub use error::ParseBucketError;
pub use gauge::{Gauge, GaugeInput, GaugeReading, GaugeValue};
pub use history::{Bucket, BucketAverage};
pub use step::{default_step_for_unit, effective_step};
pub use validation::{FieldError, GaugeForm, validate_gauge_form, validate_gauge_input};
