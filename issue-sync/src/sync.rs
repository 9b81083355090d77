//! Upsert engine and run orchestration.
//!
//! [`SyncRunner`] owns the transport, the identity cache, and the
//! configuration, and drives one full run: extract, upsert, reconcile. The
//! upsert itself decides between create and update from the presence of the
//! issue number and merges the server's response back into the record.

mod error;
mod payload;

pub use error::SyncError;

use serde_json::Value;
use tracing::{info, info_span, Instrument};

use crate::config::SyncConfig;
use crate::extract::extract;
use crate::identity::IdentityResolver;
use crate::issue::Issue;
use crate::item::ItemAccessor;
use crate::reconcile::reconcile;
use crate::transport::{GitHubClient, Method, Transport};
use payload::IssuePayload;

/// Synchronizes local items with GitHub issues.
pub struct SyncRunner {
    config: SyncConfig,
    transport: Box<dyn Transport>,
    identity: IdentityResolver,
}

impl SyncRunner {
    /// Builds a runner with the production GitHub transport.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let transport = GitHubClient::new(
            config.credential.clone(),
            config.api_base.clone(),
            config.timeout,
        )?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Builds a runner over an arbitrary transport. This is the seam tests
    /// use to substitute a recording fake.
    #[must_use]
    pub fn with_transport(config: SyncConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            identity: IdentityResolver::new(),
        }
    }

    /// Runs one full synchronization of `item`: extract, upsert, reconcile.
    ///
    /// On success the item carries the `owner/repo#number` reference (and,
    /// with linkify enabled, a heading rewritten into an issue link), and
    /// the returned [`Issue`] has its number populated.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run. Extraction and upsert failures leave the
    /// item untouched; reconciliation failures propagate rather than being
    /// swallowed, so a created issue with a failed write-back is visible to
    /// the caller.
    pub async fn sync(&self, item: &mut dyn ItemAccessor) -> Result<Issue, SyncError> {
        let span = info_span!("sync_item");
        async {
            let issue = extract(item, &self.config)?;
            let issue = self.upsert(issue).await?;
            reconcile(&issue, item, &self.config)?;
            info!(reference = ?issue.reference(), "Item synchronized");
            Ok(issue)
        }
        .instrument(span)
        .await
    }

    /// Creates or updates the remote issue for `issue`.
    ///
    /// An unset owner defaults to the authenticated user; with `assign` set,
    /// the same resolved login becomes the sole assignee (the identity
    /// lookup is cached, so both needs cost at most one round-trip per
    /// runner). A set number selects update (PATCH), an unset one selects
    /// create (POST); on create, the server-assigned number is merged into
    /// the returned record.
    ///
    /// # Errors
    ///
    /// Propagates transport failures without touching local state, and
    /// returns [`SyncError::MissingNumber`] if a create response lacks a
    /// numeric `number` field.
    pub async fn upsert(&self, mut issue: Issue) -> Result<Issue, SyncError> {
        let owner = match issue.owner.clone() {
            Some(owner) => owner,
            None => {
                let login = self.identity.login(self.transport.as_ref()).await?;
                issue.owner = Some(login.clone());
                login
            }
        };
        if issue.assign {
            let login = self.identity.login(self.transport.as_ref()).await?;
            issue.assignees = Some(vec![login]);
        }

        let response = match issue.number {
            Some(number) => {
                let path = format!("repos/{owner}/{}/issues/{number}", issue.repo);
                let body = serde_json::to_value(IssuePayload::update(&issue))?;
                info!(%path, "Updating issue");
                self.transport.send(Method::Patch, &path, Some(&body)).await?
            }
            None => {
                let path = format!("repos/{owner}/{}/issues", issue.repo);
                let body = serde_json::to_value(IssuePayload::create(&issue))?;
                info!(%path, "Creating issue");
                self.transport.send(Method::Post, &path, Some(&body)).await?
            }
        };

        if issue.number.is_none() {
            let number = response
                .get("number")
                .and_then(Value::as_u64)
                .ok_or(SyncError::MissingNumber)?;
            issue.number = Some(number);
            info!(number, "Issue created");
        }

        Ok(issue)
    }

    /// The configuration this runner was built with.
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}
