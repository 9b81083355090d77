//! Transport error types.

use thiserror::Error;

/// Errors raised by the API transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server rejected the request (status >= 400). Carries the numeric
    /// status and the server-supplied message, verbatim.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message field from the error body, or empty if absent.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to GitHub timed out")]
    Timeout,

    /// Connection-level failure below the HTTP layer.
    #[error("network error talking to GitHub: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered 2xx but the body did not have the expected shape.
    #[error("unexpected response from GitHub: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error)
        }
    }
}
