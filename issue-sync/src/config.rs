//! Synchronization configuration.

use std::time::Duration;

use url::Url;

use crate::transport::Credential;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_WEB_BASE: &str = "https://github.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// When the authenticated user should be set as sole assignee.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssignPolicy {
    /// Never assign.
    #[default]
    Never,
    /// Always assign.
    Always,
    /// Assign iff the item's workflow state is one of these keywords.
    States(Vec<String>),
}

impl AssignPolicy {
    /// Whether an item with the given workflow state should be assigned.
    #[must_use]
    pub fn applies(&self, workflow_state: Option<&str>) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::States(states) => {
                workflow_state.is_some_and(|state| states.iter().any(|s| s == state))
            }
        }
    }
}

/// Configuration for a [`SyncRunner`].
///
/// [`SyncRunner`]: crate::sync::SyncRunner
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Credential attached to every API request.
    pub credential: Credential,

    /// Whether to rewrite the item heading into a link to the issue after a
    /// successful upsert. Defaults to true.
    pub linkify: bool,

    /// Assignment policy. Defaults to [`AssignPolicy::Never`].
    pub assign: AssignPolicy,

    /// Base URL of the REST API. Defaults to `https://api.github.com`.
    pub api_base: Url,

    /// Base URL used when building issue links for the heading rewrite.
    /// Defaults to `https://github.com`.
    pub web_base: Url,

    /// Per-request timeout. Defaults to 30 seconds.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Creates a configuration with defaults for everything but the
    /// credential.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            linkify: true,
            assign: AssignPolicy::Never,
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base URL is valid"),
            web_base: Url::parse(DEFAULT_WEB_BASE).expect("default web base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Toggles the heading rewrite.
    #[must_use]
    pub fn with_linkify(mut self, linkify: bool) -> Self {
        self.linkify = linkify;
        self
    }

    /// Sets the assignment policy.
    #[must_use]
    pub fn with_assign(mut self, assign: AssignPolicy) -> Self {
        self.assign = assign;
        self
    }

    /// Points the client at a different API base (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Sets the base used for issue links in rewritten headings.
    #[must_use]
    pub fn with_web_base(mut self, web_base: Url) -> Self {
        self.web_base = web_base;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
