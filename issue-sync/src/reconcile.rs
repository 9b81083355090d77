//! Writes post-upsert state back to the local item.

use tracing::debug;

use crate::config::SyncConfig;
use crate::extract::resolve_links;
use crate::issue::Issue;
use crate::item::{ItemAccessor, REFERENCE_PROPERTY};
use crate::sync::SyncError;

/// Reconciles the local item with an upserted `issue`.
///
/// The canonical `owner/repo#number` reference is written to the item's
/// reference property whenever it differs (including when absent), so the
/// next run recognizes the item as already linked. With linkify enabled, the
/// heading is additionally rewritten into a `[[url][title]]` link — but only
/// if its current display form still matches the extracted title. That guard
/// keeps a heading the user hand-edited mid-run from being clobbered; it is
/// checked once, here, and text drift between this check and the write is
/// not re-verified.
///
/// # Errors
///
/// Returns [`SyncError::MissingNumber`] if the issue has no owner or number
/// (reconciliation only makes sense after a successful upsert), and
/// propagates any [`ItemError`] from the property or heading writes.
///
/// [`ItemError`]: crate::item::ItemError
pub fn reconcile(
    issue: &Issue,
    item: &mut dyn ItemAccessor,
    config: &SyncConfig,
) -> Result<(), SyncError> {
    let reference = issue.reference().ok_or(SyncError::MissingNumber)?;

    if item.property(REFERENCE_PROPERTY).as_deref() != Some(reference.as_str()) {
        debug!(%reference, "Writing issue reference property");
        item.set_property(REFERENCE_PROPERTY, &reference)?;
    }

    if config.linkify {
        let heading = item.heading_text();
        if resolve_links(heading.trim()) == issue.title {
            let linked = format!("[[{}][{}]]", issue_url(issue, config), issue.title);
            if heading != linked {
                debug!("Rewriting heading into issue link");
                item.set_heading_text(&linked)?;
            }
        } else {
            debug!("Heading no longer matches extracted title; leaving it untouched");
        }
    }

    Ok(())
}

/// Browser URL of the issue, e.g. `https://github.com/acme/widgets/issues/7`.
fn issue_url(issue: &Issue, config: &SyncConfig) -> String {
    let owner = issue.owner.as_deref().unwrap_or_default();
    let number = issue.number.unwrap_or_default();
    format!(
        "{}/{owner}/{}/issues/{number}",
        config.web_base.as_str().trim_end_matches('/'),
        issue.repo
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueState;
    use crate::item::{ItemError, MemoryItem};
    use crate::transport::Credential;
    use std::collections::BTreeSet;

    fn issue() -> Issue {
        Issue {
            owner: Some("acme".to_string()),
            repo: "widgets".to_string(),
            number: Some(7),
            title: "Fix the widget".to_string(),
            state: IssueState::Open,
            body: String::new(),
            labels: BTreeSet::new(),
            assign: false,
            assignees: None,
            milestone: None,
        }
    }

    fn config() -> SyncConfig {
        SyncConfig::new(Credential::token("t"))
    }

    #[test]
    fn writes_reference_and_linkifies_heading() {
        let mut item = MemoryItem::new("Fix the widget");
        reconcile(&issue(), &mut item, &config()).unwrap();

        assert_eq!(item.property("github").as_deref(), Some("acme/widgets#7"));
        assert_eq!(
            item.heading_text(),
            "[[https://github.com/acme/widgets/issues/7][Fix the widget]]"
        );
    }

    #[test]
    fn linkify_disabled_leaves_heading_untouched() {
        let mut item = MemoryItem::new("Fix the widget");
        reconcile(&issue(), &mut item, &config().with_linkify(false)).unwrap();

        assert_eq!(item.property("github").as_deref(), Some("acme/widgets#7"));
        assert_eq!(item.heading_text(), "Fix the widget");
    }

    #[test]
    fn edited_heading_is_not_clobbered() {
        let mut item = MemoryItem::new("Something the user typed meanwhile");
        reconcile(&issue(), &mut item, &config()).unwrap();

        // Reference still written, heading preserved.
        assert_eq!(item.property("github").as_deref(), Some("acme/widgets#7"));
        assert_eq!(item.heading_text(), "Something the user typed meanwhile");
    }

    #[test]
    fn already_linked_heading_stays_stable() {
        let linked = "[[https://github.com/acme/widgets/issues/7][Fix the widget]]";
        let mut item = MemoryItem::new(linked).with_property("github", "acme/widgets#7");
        reconcile(&issue(), &mut item, &config()).unwrap();

        assert_eq!(item.heading_text(), linked);
    }

    #[test]
    fn unnumbered_issue_is_rejected() {
        let mut item = MemoryItem::new("Fix the widget");
        let mut unnumbered = issue();
        unnumbered.number = None;

        let err = reconcile(&unnumbered, &mut item, &config()).unwrap_err();
        assert!(matches!(err, SyncError::MissingNumber));
        assert_eq!(item.property("github"), None);
    }

    #[test]
    fn item_write_failures_propagate() {
        struct ReadOnlyItem(MemoryItem);

        impl ItemAccessor for ReadOnlyItem {
            fn property(&self, key: &str) -> Option<String> {
                self.0.property(key)
            }
            fn set_property(&mut self, _: &str, _: &str) -> Result<(), ItemError> {
                Err(ItemError("buffer is read-only".to_string()))
            }
            fn tags(&self) -> Vec<String> {
                self.0.tags()
            }
            fn heading_text(&self) -> String {
                self.0.heading_text()
            }
            fn set_heading_text(&mut self, _: &str) -> Result<(), ItemError> {
                Err(ItemError("buffer is read-only".to_string()))
            }
            fn is_done(&self) -> bool {
                self.0.is_done()
            }
            fn workflow_state(&self) -> Option<String> {
                self.0.workflow_state()
            }
            fn export_body(&self, dialect: crate::item::Dialect) -> String {
                self.0.export_body(dialect)
            }
        }

        let mut item = ReadOnlyItem(MemoryItem::new("Fix the widget"));
        let err = reconcile(&issue(), &mut item, &config()).unwrap_err();
        assert!(matches!(err, SyncError::Item(_)));
    }

    #[test]
    fn custom_web_base_is_used_for_links() {
        let config = config().with_web_base(url::Url::parse("https://ghe.example.com").unwrap());
        let mut item = MemoryItem::new("Fix the widget");
        reconcile(&issue(), &mut item, &config).unwrap();

        assert_eq!(
            item.heading_text(),
            "[[https://ghe.example.com/acme/widgets/issues/7][Fix the widget]]"
        );
    }
}
