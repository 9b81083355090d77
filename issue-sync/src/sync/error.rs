//! Synchronization error types.

use thiserror::Error;

use crate::extract::ExtractError;
use crate::item::ItemError;
use crate::transport::TransportError;

/// Errors that can abort a synchronization run.
///
/// Every variant is terminal for the current run; there is no partial
/// success. In particular, a transport failure during upsert leaves local
/// state untouched, and a local write failure during reconciliation is
/// surfaced rather than swallowed.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local item could not be turned into an issue record.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The remote call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Writing reconciled state back to the local item failed.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The issue payload could not be encoded as JSON.
    #[error("failed to encode issue payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The create response did not include a usable issue number.
    #[error("GitHub response did not include an issue number")]
    MissingNumber,
}
