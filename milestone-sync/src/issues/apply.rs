//! Re-applies snapshot milestones to issues on the target repository.

use super::resolver::MilestoneResolver;
use crate::client::{ErrorPolicy, GitHubClient, RequestError};
use crate::milestones::list_milestones;
use crate::model::remote::SetMilestone;
use crate::model::{IssueReference, Milestone};
use crate::summary::ApplyReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, info_span, warn, Instrument};

/// What to do with an issue whose milestone cannot be resolved on the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedMilestone {
    /// Leave the issue untouched and report it as unresolved.
    #[default]
    Skip,
    /// Send the update anyway with a `null` milestone, clearing it.
    Clear,
}

impl fmt::Display for UnresolvedMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Clear => f.write_str("clear"),
        }
    }
}

impl FromStr for UnresolvedMilestone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "clear" => Ok(Self::Clear),
            other => Err(format!(
                "unknown unresolved policy '{other}', expected skip or clear"
            )),
        }
    }
}

/// Sets each issue's milestone on the target repository.
///
/// Without `search_by_number`, the target's milestones are listed once and
/// each source number is translated by title. Updates that fail are logged
/// and counted; the batch continues.
///
/// # Errors
///
/// Returns [`RequestError`] only under [`ErrorPolicy::Fatal`].
pub async fn apply_milestones(
    client: &GitHubClient,
    issues: &[IssueReference],
    milestones: &[Milestone],
    search_by_number: bool,
    unresolved: UnresolvedMilestone,
    policy: ErrorPolicy,
) -> Result<ApplyReport, RequestError> {
    let span = info_span!(
        "apply_milestones",
        repo = %client.full_name(),
        search_by_number,
        unresolved = %unresolved
    );

    async {
        let resolver = if search_by_number {
            MilestoneResolver::ByNumber
        } else {
            let target = list_milestones(client, policy).await?;
            if !target.complete {
                warn!(
                    count = target.len(),
                    "Target milestones only partly listed, some issues/PRs may go unresolved"
                );
            }
            MilestoneResolver::ByTitle {
                source: milestones,
                target: target.items,
            }
        };

        let mut report = ApplyReport::default();
        for issue in issues {
            let milestone = resolver.resolve(issue.milestone_number);
            if milestone.is_none() && unresolved == UnresolvedMilestone::Skip {
                warn!(
                    issue = issue.number,
                    milestone = issue.milestone_number,
                    "Milestone not found on target, skipping issue/PR"
                );
                report.unresolved += 1;
                continue;
            }

            info!(
                issue = issue.number,
                milestone = ?milestone,
                "Apply milestone to issue/PR"
            );
            let body = SetMilestone { milestone };
            let updated: Option<serde_json::Value> = client
                .patch(&format!("issues/{}", issue.number), &body, policy)
                .await?;
            if updated.is_some() {
                info!(
                    issue = issue.number,
                    milestone = ?milestone,
                    "Applied milestone to issue/PR"
                );
                report.applied += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            applied = report.applied,
            unresolved = report.unresolved,
            failed = report.failed,
            "Milestone application complete"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}
