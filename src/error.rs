//! Error Handling
//!
//! Core error type for the library, plus coarse categories and type
//! conversions from common error types.
//!
//! # Example
//!
//! ```rust
//! use tutorwire::error::{ErrorCategory, TutorError};
//!
//! let error = TutorError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert_eq!(error.status_code(), Some(404));
//! ```

use thiserror::Error;

/// Errors produced by the client.
///
/// Transport failures, HTTP status failures, and in-stream server errors
/// are kept as distinct variants so callers can react to each without
/// string matching.
#[derive(Error, Debug)]
pub enum TutorError {
    /// HTTP transport error (request send or body read failed)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    TimeoutError(String),

    /// Non-success HTTP status, with the server's diagnostic text
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status code
        code: u16,
        /// Diagnostic text from the response body, or a generic status line
        message: String,
    },

    /// Error payload emitted by the server inside the stream, verbatim
    #[error("Stream error: {0}")]
    StreamError(String),

    /// Response body could not be decoded into the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Invalid request or configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse error categories for logging and caller-side dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level failures (connect, timeout, read)
    Network,
    /// 5xx responses
    Server,
    /// 4xx responses
    Client,
    /// Server-emitted in-stream errors
    Protocol,
    /// Body or payload decoding failures
    Parsing,
    /// Bad input on our side
    Validation,
    /// Everything else
    Internal,
}

impl TutorError {
    /// Creates an API error from a status code and diagnostic message.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// HTTP status code, when the error carries one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Coarse category for logging and dispatch.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::ConnectionError(_) | Self::TimeoutError(_) => {
                ErrorCategory::Network
            }
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } => ErrorCategory::Client,
            Self::StreamError(_) => ErrorCategory::Protocol,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::InvalidParameter(_) => ErrorCategory::Validation,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// True for failures of the transport itself, as opposed to responses
    /// the server produced on purpose.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Network
    }
}

impl From<reqwest::Error> for TutorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
