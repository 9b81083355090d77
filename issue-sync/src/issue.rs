//! The canonical issue record.

use std::collections::BTreeSet;

use serde::Serialize;

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// The issue is open.
    Open,
    /// The issue is closed.
    Closed,
}

impl IssueState {
    /// Returns the wire representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A single issue derived from a local item.
///
/// Rebuilt from current local state on every synchronization run; nothing in
/// this struct is persisted directly. Only the reference string written back
/// by reconciliation survives across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Account or organization holding the repository. `None` until resolved
    /// (defaults to the authenticated user during upsert).
    pub owner: Option<String>,

    /// Repository name, derived from the category label. Never empty.
    pub repo: String,

    /// Server-assigned issue number. `None` means the issue has not been
    /// created yet; the upsert engine sets it exactly once.
    pub number: Option<u64>,

    /// Issue title, from the heading text with links resolved to their
    /// display form.
    pub title: String,

    /// Open/closed state, from the item's completion flag.
    pub state: IssueState,

    /// Exported body text.
    pub body: String,

    /// Labels, from the item's tags. Deduplicated, order-free.
    pub labels: BTreeSet<String>,

    /// Whether the authenticated user should be set as sole assignee.
    pub assign: bool,

    /// Assignee logins. Populated by the upsert engine iff `assign` is true,
    /// always as a one-element list.
    pub assignees: Option<Vec<String>>,

    /// Milestone number. Reserved; extraction never sets it, but the payload
    /// layer serializes it when present.
    pub milestone: Option<u64>,
}

impl Issue {
    /// The durable `owner/repo#number` reference correlating this record to
    /// its remote issue, or `None` while owner or number are unresolved.
    #[must_use]
    pub fn reference(&self) -> Option<String> {
        match (&self.owner, self.number) {
            (Some(owner), Some(number)) => Some(format!("{owner}/{}#{number}", self.repo)),
            _ => None,
        }
    }
}
