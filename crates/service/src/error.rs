//! Typed error enum for the service layer.
//!
//! Unifies storage, validation and file failures into a single error type so
//! callers match on failure modes instead of inspecting messages.

use coachdb_core::CoreError;
use coachdb_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (blank fields, short query, bad date).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A webhook event named a school that is not in the database.
    #[error("unknown school: {0}")]
    UnknownSchool(String),

    /// Reading an import file failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed in the service layer.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Serialization(e) => Self::Serialization(e),
            CoreError::Io(e) => Self::Io(e),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
