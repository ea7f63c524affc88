//! Typed error enum for the service layer.
//!
//! Callers match on validation, not-found and storage failures directly
//! instead of inspecting error strings.

use health_gauge_core::FieldError;
use health_gauge_storage::StorageError;
use thiserror::Error;

/// Service-layer error covering every failure a gauge operation can report.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-correctable input problems, all collected in one pass.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Storage operation failed (DB, not found, constraint, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ServiceError::Validation(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("unit", "Unit is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: name: Name is required; unit: Unit is required"
        );
        assert_eq!(err.field_errors().map(<[FieldError]>::len), Some(2));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ServiceError::from(StorageError::NotFound { entity: "gauge", id: 1 });
        assert!(err.is_not_found());
        assert!(err.field_errors().is_none());
    }
}
