//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, constraint violation,
//! database failure) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// CHECK, NOT NULL, UNIQUE or foreign-key constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be decoded into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub(crate) const fn gauge_not_found(id: i64) -> Self {
        Self::NotFound { entity: "gauge", id }
    }

    /// Whether this error means the referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Custom `From<sqlx::Error>`, not blanket `#[from]`.
///
/// - constraint violations → `Constraint`
/// - column decode failures → `DataCorruption`
/// - everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err)
                if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) =>
            {
                Self::Constraint(db_err.message().to_owned())
            },
            sqlx::Error::ColumnDecode { index, source } => Self::DataCorruption {
                context: format!("decoding column {index}"),
                source,
            },
            other => Self::Database(other),
        }
    }
}
