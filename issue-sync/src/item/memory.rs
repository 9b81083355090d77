//! In-memory item implementation.

use std::collections::BTreeMap;

use super::{Dialect, ItemAccessor, ItemError};

/// An in-memory outline item.
///
/// Backs the CLI (which assembles an item from flags) and most tests. The
/// body is stored as Markdown and returned as-is for either dialect.
#[derive(Debug, Clone, Default)]
pub struct MemoryItem {
    heading: String,
    body: String,
    tags: Vec<String>,
    properties: BTreeMap<String, String>,
    done: bool,
    workflow_state: Option<String>,
}

impl MemoryItem {
    /// Creates an item with the given heading text.
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Marks the item as done.
    #[must_use]
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Sets the workflow state keyword.
    #[must_use]
    pub fn with_workflow_state(mut self, state: impl Into<String>) -> Self {
        self.workflow_state = Some(state.into());
        self
    }
}

impl ItemAccessor for MemoryItem {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<(), ItemError> {
        self.properties.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn heading_text(&self) -> String {
        self.heading.clone()
    }

    fn set_heading_text(&mut self, text: &str) -> Result<(), ItemError> {
        self.heading = text.to_string();
        Ok(())
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn workflow_state(&self) -> Option<String> {
        self.workflow_state.clone()
    }

    fn preferred_dialect(&self) -> Dialect {
        // The stored body is plain Markdown, which is valid GFM.
        Dialect::Gfm
    }

    fn export_body(&self, _dialect: Dialect) -> String {
        self.body.clone()
    }
}
