//! Error types for request-form initialization
//!
//! Downstream identity-data failures are surfaced as [`IdDataError`] and
//! passed through the initializer untouched. Configuration problems are
//! [`ConfigError`]. Locale resolution has no error type: it always falls back.

use thiserror::Error;

/// Failures of the identity-data collaborator (snapshot fetch, merge, signature)
#[derive(Error, Debug)]
pub enum IdDataError {
    #[error("Identity data unavailable: {0}")]
    Unavailable(String),

    #[error("Field merge failed: {reason}")]
    MergeFailed { reason: String },

    #[error("Signature failed: {0}")]
    SignatureFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Invalid process configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Base URL cannot hold a path: {0}")]
    BaseUrlCannotBeABase(String),

    #[error("Default locale must not be empty")]
    EmptyDefaultLocale,
}

/// Result type for identity-data operations
pub type IdDataResult<T> = Result<T, IdDataError>;
