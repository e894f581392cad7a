//! Inference error types.

use quill_core::{Classify, ErrorKind};

/// Errors from a completion call.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Missing credential, or the endpoint rejected it (401/403).
    #[error("auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not JSON, had no `choices[0]`, or had null content.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// What was wrong with the response.
        message: String,
    },
}

impl InferenceError {
    /// Short category label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "auth",
            Self::Api { .. } => "api",
            Self::Http(_) => "network",
            Self::MalformedResponse { .. } => "parse",
        }
    }

    /// Map a non-success HTTP status and its message to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Auth { message },
            _ => Self::Api { status, message },
        }
    }
}

impl Classify for InferenceError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Inference
    }
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
