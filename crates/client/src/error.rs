//! API Error Types
//!
//! Transport-level failures of the scheduling service and their mapping onto
//! [`CoreError`].

use shift_desk_core::CoreError;
use thiserror::Error;

/// Errors raised while talking to the scheduling service over HTTP.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid service URL: {message}")]
    InvalidUrl { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error ({status:?}): {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("{message}")]
    Other { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether a caller could reasonably try again later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Network { .. } | ApiError::Timeout { .. } | ApiError::ServerError { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl {
            message: err.to_string(),
        }
    }
}

/// Every transport failure is a fetch failure from the core's point of view.
impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        CoreError::fetch(err.to_string())
    }
}

/// Map a non-success HTTP status and body onto an [`ApiError`].
pub fn parse_http_error(status: u16, body: &str) -> ApiError {
    match status {
        404 => ApiError::NotFound {
            message: body.to_string(),
        },
        400 | 422 => ApiError::InvalidRequest {
            message: body.to_string(),
        },
        408 | 504 => ApiError::Timeout {
            message: body.to_string(),
        },
        500..=599 => ApiError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => ApiError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
