//! # Domain Errors
//!
//! Centralized error handling for the forum core.
//! Every use case returns [`DomainError`]; the HTTP boundary maps each
//! variant to a status code.

use thiserror::Error;

/// Payload rejected before any repository is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing, null, or empty.
    #[error("{entity} is missing required property `{field}`")]
    MissingProperty { entity: &'static str, field: &'static str },

    /// A field is present but not of the expected type.
    #[error("{entity} property `{field}` has an invalid type")]
    InvalidType { entity: &'static str, field: &'static str },

    #[error("thread title is limited to {max} characters, got {actual}")]
    TitleTooLong { max: usize, actual: usize },
}

/// The primary error type for all forum operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced thread, comment, reply or like does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Caller does not own the targeted entity
    #[error("forbidden: {0}")]
    Authorization(String),

    /// Caller identity is missing or could not be verified
    #[error("unauthenticated: {0}")]
    Authentication(String),

    /// Uniqueness constraint violated (e.g. duplicate like)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g. DB down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn authorization(reason: impl Into<String>) -> Self {
        Self::Authorization(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }
}

/// A specialized Result type for forum logic.
pub type Result<T> = std::result::Result<T, DomainError>;
