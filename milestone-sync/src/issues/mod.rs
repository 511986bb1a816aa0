//! Issue listing and milestone re-application.

mod apply;
mod resolver;

pub use apply::{apply_milestones, UnresolvedMilestone};
pub use resolver::{resolve_milestone_number, MilestoneResolver};

use crate::client::{ErrorPolicy, GitHubClient, Listing, RequestError};
use crate::model::remote::RemoteIssue;
use crate::model::{IssueReference, IssueStateFilter};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

/// Results requested per page.
const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct IssueQuery {
    /// `*` asks the server for items with any milestone.
    milestone: &'static str,
    state: IssueStateFilter,
    per_page: u8,
}

/// Lists issues and pull requests that carry a milestone.
///
/// Milestone filtering is done by the server. Items returned without a
/// milestone are skipped with a warning. The listing is marked incomplete
/// when a page failed under [`ErrorPolicy::Log`].
///
/// # Errors
///
/// Returns [`RequestError`] only under [`ErrorPolicy::Fatal`].
pub async fn list_issues(
    client: &GitHubClient,
    state: IssueStateFilter,
    policy: ErrorPolicy,
) -> Result<Listing<IssueReference>, RequestError> {
    let span = info_span!("list_issues", repo = %client.full_name());

    async {
        info!("Executing list issues/pull requests with milestone query");
        let query = IssueQuery {
            milestone: "*",
            state,
            per_page: PER_PAGE,
        };
        let remote = client
            .list_all::<RemoteIssue, _>("issues", &query, policy)
            .await?;

        let mut issues = Listing {
            items: Vec::with_capacity(remote.len()),
            complete: remote.complete,
        };
        for item in remote.items {
            let number = item.number;
            match item.into_reference() {
                Some(issue) => issues.items.push(issue),
                None => warn!(number, "Issue has no milestone, skipping"),
            }
        }

        info!(
            count = issues.len(),
            complete = issues.complete,
            "Listed issues/pull requests"
        );
        Ok(issues)
    }
    .instrument(span)
    .await
}
