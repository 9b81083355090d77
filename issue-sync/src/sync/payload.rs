//! Wire payloads for issue create and update calls.

use serde::Serialize;

use crate::issue::Issue;

/// Field set sent to the issues endpoints.
///
/// One shape serves both operations; optional fields are omitted from the
/// JSON when absent. Create payloads never include `state` — new issues are
/// open by the service's own default — while update payloads always carry
/// the record's current state.
#[derive(Debug, Serialize)]
pub(crate) struct IssuePayload<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<u64>,
    labels: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignees: Option<&'a [String]>,
}

impl<'a> IssuePayload<'a> {
    /// Payload for `POST repos/{owner}/{repo}/issues`.
    pub(crate) fn create(issue: &'a Issue) -> Self {
        Self::base(issue)
    }

    /// Payload for `PATCH repos/{owner}/{repo}/issues/{number}`.
    pub(crate) fn update(issue: &'a Issue) -> Self {
        Self {
            state: Some(issue.state.as_str()),
            ..Self::base(issue)
        }
    }

    fn base(issue: &'a Issue) -> Self {
        Self {
            title: &issue.title,
            body: &issue.body,
            state: None,
            milestone: issue.milestone,
            labels: issue.labels.iter().map(String::as_str).collect(),
            assignees: issue.assignees.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueState;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn issue() -> Issue {
        Issue {
            owner: Some("acme".to_string()),
            repo: "widgets".to_string(),
            number: Some(7),
            title: "Fix it".to_string(),
            state: IssueState::Closed,
            body: "Details".to_string(),
            labels: BTreeSet::from(["bug".to_string(), "urgent".to_string()]),
            assign: false,
            assignees: None,
            milestone: None,
        }
    }

    #[test]
    fn create_payload_has_no_state_field() {
        let value = serde_json::to_value(IssuePayload::create(&issue())).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Fix it",
                "body": "Details",
                "labels": ["bug", "urgent"],
            })
        );
    }

    #[test]
    fn update_payload_carries_current_state() {
        let value = serde_json::to_value(IssuePayload::update(&issue())).unwrap();
        assert_eq!(value["state"], json!("closed"));
        assert_eq!(value["title"], json!("Fix it"));
    }

    #[test]
    fn assignees_serialized_only_when_present() {
        let mut assigned = issue();
        assigned.assignees = Some(vec!["octocat".to_string()]);
        let value = serde_json::to_value(IssuePayload::create(&assigned)).unwrap();
        assert_eq!(value["assignees"], json!(["octocat"]));

        let value = serde_json::to_value(IssuePayload::create(&issue())).unwrap();
        assert!(value.get("assignees").is_none());
    }

    #[test]
    fn milestone_is_filterable_not_hardcoded_absent() {
        let mut with_milestone = issue();
        with_milestone.milestone = Some(3);
        let value = serde_json::to_value(IssuePayload::update(&with_milestone)).unwrap();
        assert_eq!(value["milestone"], json!(3));

        let value = serde_json::to_value(IssuePayload::update(&issue())).unwrap();
        assert!(value.get("milestone").is_none());
    }
}
