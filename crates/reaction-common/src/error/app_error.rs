//! Application error types
//!
//! Wraps domain failures and adds the auth and configuration errors of the
//! outer layers, each with an HTTP status and a stable code.

use reaction_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::Unavailable(_) => 503,
            Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => Self::domain_status_code(e),
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// HTTP status for a domain error
    #[must_use]
    pub fn domain_status_code(err: &DomainError) -> u16 {
        match err {
            e if e.is_timeout() => 503,
            e if e.is_not_found() => 404,
            e if e.is_validation() => 400,
            e if e.is_conflict() => 409,
            _ => 500,
        }
    }
}
