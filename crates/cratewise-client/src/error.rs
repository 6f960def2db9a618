//! Error types for backend HTTP client operations.

use thiserror::Error;

/// Errors that can occur while talking to the recommendation backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    /// The server returned an unexpected status code.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
        /// Response body (truncated).
        body: String,
    },
}
