//! Extraction error types.

use thiserror::Error;

/// Errors turning a local item into an [`Issue`].
///
/// All of these abort the run before any network call is attempted.
///
/// [`Issue`]: crate::issue::Issue
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The item has no heading text, i.e. there is no valid item in context.
    #[error("no item heading found; place the cursor on an item to sync")]
    NoHeading,

    /// Neither an issue reference nor a category label names a repository.
    #[error("item has no category to derive a repository from")]
    MissingRepository,

    /// The category label does not look like `repo` or `owner/repo`.
    #[error("malformed category '{0}': expected 'repo' or 'owner/repo'")]
    MalformedCategory(String),

    /// The stored issue reference does not look like `owner/repo#number`.
    #[error("malformed issue reference '{0}': expected 'owner/repo#number'")]
    MalformedReference(String),
}
