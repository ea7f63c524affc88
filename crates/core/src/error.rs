use thiserror::Error;

/// Returned when a history bucket name is not `month` or `week`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown history bucket '{0}' (expected 'month' or 'week')")]
pub struct ParseBucketError(pub String);
