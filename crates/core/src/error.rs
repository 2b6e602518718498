//! Core Error Types
//!
//! Errors raised by the schedule model, the analysis validation boundary and
//! the collaborator traits. These are dependency-free (only thiserror + std +
//! serde_json) so every workspace crate can share them.
//!
//! Blank input has no variant here: the pipeline skips an empty request
//! instead of reporting it.

use thiserror::Error;

/// Core error type for the Shift Desk workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A collaborator (schedule source, analyzer) could not be reached or
    /// answered with a failure status. Transient.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The analysis collaborator returned a payload that violates the
    /// response contract. Not retried within a session.
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    /// The persistence collaborator refused or failed to commit edits.
    #[error("Apply error: {0}")]
    Apply(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an apply error
    pub fn apply(msg: impl Into<String>) -> Self {
        Self::Apply(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Only collaborator transport failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Fetch(_))
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
