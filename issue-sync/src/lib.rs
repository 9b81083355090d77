#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod extract;
pub mod identity;
pub mod issue;
pub mod item;
pub mod reconcile;
pub mod sync;
pub mod transport;

pub use config::{AssignPolicy, SyncConfig};
pub use extract::{extract, ExtractError};
pub use identity::IdentityResolver;
pub use issue::{Issue, IssueState};
pub use item::{
    Dialect, ItemAccessor, ItemError, MemoryItem, CATEGORY_PROPERTY, REFERENCE_PROPERTY,
};
pub use reconcile::reconcile;
pub use sync::{SyncError, SyncRunner};
pub use transport::{Credential, GitHubClient, Method, Transport, TransportError};
