//! The seam between the synchronization core and the local document.
//!
//! The core never touches a concrete document format. Everything it needs
//! from the local item — properties, tags, heading, completion state, and an
//! exported body — comes through [`ItemAccessor`], and everything it writes
//! back goes through the same trait. [`MemoryItem`] is the bundled in-memory
//! implementation used by the CLI and by tests.

mod memory;

pub use memory::MemoryItem;

use thiserror::Error;

/// Property key holding the durable `owner/repo#number` issue reference.
pub const REFERENCE_PROPERTY: &str = "github";

/// Property key holding the hierarchical category label (`repo` or
/// `owner/repo`) that selects the target repository.
pub const CATEGORY_PROPERTY: &str = "category";

/// A local item update failed.
///
/// Document backends that persist properties or headings (files, buffers,
/// databases) surface their write failures through this type so that
/// reconciliation errors propagate instead of being swallowed.
#[derive(Debug, Error)]
#[error("failed to update local item: {0}")]
pub struct ItemError(pub String);

/// Markup dialect an item's body can be exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// GitHub Flavored Markdown, the extended dialect.
    Gfm,
    /// Plain Markdown, the baseline dialect.
    Markdown,
}

/// Read/write access to a single local outline item.
///
/// Getters are infallible snapshots of current state; setters are fallible
/// because a real document backend may reject or fail the write.
pub trait ItemAccessor {
    /// Returns the value of a property, if set.
    fn property(&self, key: &str) -> Option<String>;

    /// Writes a property value.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError`] if the backend cannot persist the property.
    fn set_property(&mut self, key: &str, value: &str) -> Result<(), ItemError>;

    /// Returns the item's tags. Duplicates and ordering are insignificant.
    fn tags(&self) -> Vec<String>;

    /// Returns the raw heading text, which may contain bracket links from a
    /// previous linkify pass.
    fn heading_text(&self) -> String;

    /// Replaces the visible heading text.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError`] if the backend cannot rewrite the heading.
    fn set_heading_text(&mut self, text: &str) -> Result<(), ItemError>;

    /// Whether the item's completion flag marks it as done.
    fn is_done(&self) -> bool;

    /// The item's workflow state keyword (e.g. `TODO`, `WAITING`), if any.
    fn workflow_state(&self) -> Option<String>;

    /// The richest dialect this item's exporter can produce.
    ///
    /// Extraction requests this dialect from [`export_body`].
    ///
    /// [`export_body`]: ItemAccessor::export_body
    fn preferred_dialect(&self) -> Dialect {
        Dialect::Markdown
    }

    /// Exports the subtree under the item as long-form body text in the
    /// requested dialect, excluding the heading itself.
    fn export_body(&self, dialect: Dialect) -> String;
}
