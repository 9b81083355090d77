//! Authenticated request/response primitive for the GitHub API.
//!
//! The synchronization core only ever talks to GitHub through the
//! [`Transport`] trait: a method, an API-relative path, and an optional JSON
//! body in; parsed JSON out, or a typed error. [`GitHubClient`] is the
//! production implementation; tests substitute recording fakes.

mod credential;
mod error;
mod github;

pub use credential::Credential;
pub use error::TransportError;
pub use github::GitHubClient;

use async_trait::async_trait;
use serde_json::Value;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only request, never carries a body.
    Get,
    /// Create request.
    Post,
    /// Update request.
    Patch,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// Issues one authenticated API request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `method` to the API-relative `path` (no leading slash, e.g.
    /// `repos/acme/widgets/issues`), serializing `body` as JSON when present
    /// and omitting the request body entirely when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Api`] for any response status >= 400, and
    /// [`TransportError::Timeout`] / [`TransportError::Network`] for failures
    /// below the HTTP layer.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_wire_format() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
