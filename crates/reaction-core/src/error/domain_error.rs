//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Topic already exists: {0}")]
    TopicAlreadyExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Write timed out and could not be confirmed")]
    WriteUnconfirmed,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Create an invalid-field error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid-query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TopicNotFound(_) => "UNKNOWN_TOPIC",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::TopicAlreadyExists(_) => "TOPIC_ALREADY_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::WriteUnconfirmed => "WRITE_UNCONFIRMED",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TopicNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField { .. } | Self::InvalidQuery(_) | Self::InvalidUserId(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TopicAlreadyExists(_))
    }

    /// Check if the storage medium did not answer in time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout | Self::WriteUnconfirmed)
    }
}
