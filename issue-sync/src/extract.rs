//! Derives a canonical [`Issue`] from a local item.
//!
//! Extraction is a pure read: it never mutates the item and never touches
//! the network. The resulting record carries everything the upsert engine
//! needs to decide between create and update.

mod error;

pub use error::ExtractError;

use tracing::debug;

use crate::config::SyncConfig;
use crate::issue::{Issue, IssueState};
use crate::item::{ItemAccessor, CATEGORY_PROPERTY, REFERENCE_PROPERTY};

/// Builds an [`Issue`] from the item's current state.
///
/// A stored `owner/repo#number` reference takes precedence over the category
/// label: it is the durable correlation key, so once an item is linked,
/// re-extraction targets the same remote issue regardless of category edits.
/// Without a reference, the category label supplies the repository (and
/// optionally the owner), and the issue is treated as not yet created.
///
/// # Errors
///
/// Returns [`ExtractError::NoHeading`] if the item has no heading text,
/// [`ExtractError::MissingRepository`] if no repository can be derived, and
/// the respective malformed-input variants for unparseable reference or
/// category values.
pub fn extract(item: &dyn ItemAccessor, config: &SyncConfig) -> Result<Issue, ExtractError> {
    let heading = item.heading_text();
    let heading = heading.trim();
    if heading.is_empty() {
        return Err(ExtractError::NoHeading);
    }

    let reference = item
        .property(REFERENCE_PROPERTY)
        .filter(|value| !value.trim().is_empty());

    let (owner, repo, number) = match reference {
        Some(reference) => {
            let (owner, repo, number) = parse_reference(reference.trim())?;
            (Some(owner), repo, Some(number))
        }
        None => {
            let label = item
                .property(CATEGORY_PROPERTY)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ExtractError::MissingRepository)?;
            let (owner, repo) = parse_category(label.trim())?;
            (owner, repo, None)
        }
    };

    let state = if item.is_done() {
        IssueState::Closed
    } else {
        IssueState::Open
    };
    let assign = config.assign.applies(item.workflow_state().as_deref());
    let body = item.export_body(item.preferred_dialect());
    let labels = item.tags().into_iter().collect();
    let title = resolve_links(heading);

    debug!(repo = %repo, number = ?number, "Extracted issue from item");
    Ok(Issue {
        owner,
        repo,
        number,
        title,
        state,
        body,
        labels,
        assign,
        assignees: None,
        milestone: None,
    })
}

/// Splits a category label into `(owner, repo)`.
///
/// One segment names the repository and leaves the owner to be resolved;
/// two segments are `owner/repo`. Deeper labels are rejected rather than
/// guessed at.
fn parse_category(label: &str) -> Result<(Option<String>, String), ExtractError> {
    let segments: Vec<&str> = label.split('/').collect();
    match segments.as_slice() {
        [repo] if !repo.is_empty() => Ok((None, (*repo).to_string())),
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((Some((*owner).to_string()), (*repo).to_string()))
        }
        _ => Err(ExtractError::MalformedCategory(label.to_string())),
    }
}

/// Parses a stored `owner/repo#number` reference.
fn parse_reference(reference: &str) -> Result<(String, String, u64), ExtractError> {
    let malformed = || ExtractError::MalformedReference(reference.to_string());

    let (prefix, number) = reference.split_once('#').ok_or_else(malformed)?;
    let number: u64 = number.parse().map_err(|_| malformed())?;
    let (owner, repo) = prefix.split_once('/').ok_or_else(malformed)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(malformed());
    }
    Ok((owner.to_string(), repo.to_string(), number))
}

/// Replaces every `[[target][description]]` bracket link in `text` with its
/// display form (the description, or the bare target for `[[target]]`).
///
/// Headings rewritten by a previous linkify pass come back through here, so
/// re-extracted titles match what the user sees, not the markup.
pub(crate) fn resolve_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("[[") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("]]") {
            Some(end) => {
                let inner = &after[..end];
                match inner.find("][") {
                    Some(sep) => out.push_str(&inner[sep + 2..]),
                    None => out.push_str(inner),
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated link, keep the raw text.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
