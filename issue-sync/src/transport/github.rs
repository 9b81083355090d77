//! reqwest-backed GitHub API transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Credential, Method, Transport, TransportError};

const USER_AGENT: &str = concat!("issue-sync/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Authenticated HTTP client for the GitHub REST API.
///
/// Attaches the identifying `User-Agent`, the versioned JSON `Accept` media
/// type, and a bearer credential (resolved per request) to every call.
/// The request path is deliberately quiet: everything it logs is at `debug`
/// level, so a synchronization run produces no output of its own below the
/// engine layer.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
    credential: Credential,
}

impl GitHubClient {
    /// Builds a client against `api_base` (usually `https://api.github.com`)
    /// with the given per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        credential: Credential,
        api_base: Url,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // Relative joins drop the last path segment of a base without a
        // trailing slash, which matters for GitHub Enterprise bases like
        // `https://ghe.example.com/api/v3`.
        let mut api_base = api_base;
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        Ok(Self {
            http,
            api_base,
            credential,
        })
    }
}

#[async_trait]
impl Transport for GitHubClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = self
            .api_base
            .join(path)
            .map_err(|e| TransportError::Malformed(format!("invalid request path '{path}': {e}")))?;

        let mut request = self
            .http
            .request(method.into(), url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .bearer_auth(self.credential.resolve());

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = method.as_str(), path, "Sending GitHub API request");
        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
                .unwrap_or_default();
            debug!(status = status.as_u16(), %message, "GitHub API request failed");
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        debug!(status = status.as_u16(), "GitHub API request succeeded");
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| TransportError::Malformed(format!("invalid JSON body: {e}")))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}
