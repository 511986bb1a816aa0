//! GitHub REST payloads, decoded before conversion into snapshot records.

use super::{IssueKind, IssueReference, Milestone, MilestoneState};
use serde::{Deserialize, Serialize};

/// Milestone as returned by `GET /repos/{owner}/{repo}/milestones`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteMilestone {
    pub number: u64,
    pub title: String,
    pub state: MilestoneState,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub closed_issues: u64,
    #[serde(default)]
    pub due_on: Option<String>,
}

impl From<RemoteMilestone> for Milestone {
    fn from(remote: RemoteMilestone) -> Self {
        Self {
            number: remote.number,
            title: remote.title,
            state: remote.state,
            description: remote.description.unwrap_or_default(),
            open_issues: remote.open_issues,
            closed_issues: remote.closed_issues,
            due_on: remote.due_on.unwrap_or_default(),
        }
    }
}

/// Milestone reference embedded in an issue payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteMilestoneRef {
    pub number: u64,
}

/// Issue or pull request as returned by `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub milestone: Option<RemoteMilestoneRef>,
    /// Present only on pull requests.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RemoteIssue {
    /// Converts into a reference, or `None` when no milestone is attached.
    pub fn into_reference(self) -> Option<IssueReference> {
        let kind = if self.pull_request.is_some() {
            IssueKind::PullRequest
        } else {
            IssueKind::Issue
        };
        let milestone = self.milestone?;
        Some(IssueReference {
            number: self.number,
            milestone_number: milestone.number,
            title: self.title,
            kind,
        })
    }
}

/// Body of `POST /repos/{owner}/{repo}/milestones`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateMilestone<'a> {
    pub title: &'a str,
    pub state: MilestoneState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> From<&'a Milestone> for CreateMilestone<'a> {
    fn from(milestone: &'a Milestone) -> Self {
        Self {
            title: &milestone.title,
            state: milestone.state,
            due_on: non_empty(&milestone.due_on),
            description: non_empty(&milestone.description),
        }
    }
}

/// Body of `PATCH /repos/{owner}/{repo}/issues/{number}`.
///
/// `None` serializes as `null`, which clears the milestone.
#[derive(Debug, Serialize)]
pub(crate) struct SetMilestone {
    pub milestone: Option<u64>,
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_milestone_with_null_fields() {
        let remote: RemoteMilestone = serde_json::from_value(json!({
            "number": 7,
            "title": "Sprint 7",
            "state": "closed",
            "description": null,
            "open_issues": 0,
            "closed_issues": 4,
            "due_on": null,
            "url": "https://api.github.com/repos/o/r/milestones/7"
        }))
        .unwrap();

        let milestone = Milestone::from(remote);
        assert_eq!(milestone.number, 7);
        assert_eq!(milestone.state, MilestoneState::Closed);
        assert_eq!(milestone.description, "");
        assert_eq!(milestone.due_on, "");
        assert_eq!(milestone.closed_issues, 4);
    }

    #[test]
    fn detects_pull_requests_by_metadata() {
        let pr: RemoteIssue = serde_json::from_value(json!({
            "number": 9,
            "title": "Add feature",
            "milestone": { "number": 2 },
            "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/9" }
        }))
        .unwrap();
        let issue: RemoteIssue = serde_json::from_value(json!({
            "number": 10,
            "title": "Bug",
            "milestone": { "number": 2 }
        }))
        .unwrap();

        assert_eq!(pr.into_reference().unwrap().kind, IssueKind::PullRequest);
        assert_eq!(issue.into_reference().unwrap().kind, IssueKind::Issue);
    }

    #[test]
    fn issue_without_milestone_has_no_reference() {
        let issue: RemoteIssue = serde_json::from_value(json!({
            "number": 11,
            "title": "Loose",
            "milestone": null
        }))
        .unwrap();

        assert!(issue.into_reference().is_none());
    }

    #[test]
    fn create_body_omits_empty_optional_fields() {
        let milestone = Milestone {
            number: 1,
            title: "Sprint 1".to_string(),
            state: MilestoneState::Open,
            description: String::new(),
            open_issues: 2,
            closed_issues: 0,
            due_on: "2024-05-01T07:00:00Z".to_string(),
        };

        let body = serde_json::to_value(CreateMilestone::from(&milestone)).unwrap();
        assert_eq!(
            body,
            json!({ "title": "Sprint 1", "state": "open", "due_on": "2024-05-01T07:00:00Z" })
        );
    }

    #[test]
    fn unresolved_milestone_serializes_as_null() {
        let body = serde_json::to_value(SetMilestone { milestone: None }).unwrap();
        assert_eq!(body, json!({ "milestone": null }));
    }
}
