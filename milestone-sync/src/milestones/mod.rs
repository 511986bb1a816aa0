//! Milestone listing, lookup and creation.
//!
//! Listing walks every page of `GET milestones?state=all`. Creation replays
//! snapshot records onto the target repository, optionally probing for an
//! existing milestone with the same number first so repeated runs never
//! duplicate milestones.

use crate::client::{ErrorPolicy, GitHubClient, Listing, RequestError};
use crate::model::remote::{CreateMilestone, RemoteMilestone};
use crate::model::Milestone;
use crate::summary::MilestoneReport;
use serde::Serialize;
use tracing::{info, info_span, Instrument};

/// Results requested per page.
const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct MilestoneQuery {
    state: &'static str,
    per_page: u8,
}

/// Lists every milestone of the repository, open and closed, in server order.
///
/// The listing is marked incomplete when a page failed under
/// [`ErrorPolicy::Log`].
///
/// # Errors
///
/// Returns [`RequestError`] only under [`ErrorPolicy::Fatal`].
pub async fn list_milestones(
    client: &GitHubClient,
    policy: ErrorPolicy,
) -> Result<Listing<Milestone>, RequestError> {
    let span = info_span!("list_milestones", repo = %client.full_name());

    async {
        info!("Executing list milestones query");
        let query = MilestoneQuery {
            state: "all",
            per_page: PER_PAGE,
        };
        let milestones = client
            .list_all::<RemoteMilestone, _>("milestones", &query, policy)
            .await?
            .map(Milestone::from);

        info!(
            count = milestones.len(),
            complete = milestones.complete,
            "Listed milestones"
        );
        Ok(milestones)
    }
    .instrument(span)
    .await
}

/// Looks up a milestone by number.
///
/// Returns the number when the milestone exists and `None` when the
/// repository answers 404.
///
/// # Errors
///
/// Returns [`RequestError`] only under [`ErrorPolicy::Fatal`].
pub async fn get_milestone(
    client: &GitHubClient,
    number: u64,
    policy: ErrorPolicy,
) -> Result<Option<u64>, RequestError> {
    info!(number, "Executing get milestone query");
    let milestone: Option<RemoteMilestone> = client
        .get_if_exists(&format!("milestones/{number}"), policy)
        .await?;
    Ok(milestone.map(|m| m.number))
}

/// Creates the snapshot's milestones on the target repository.
///
/// With `search_by_number`, a milestone whose number already exists on the
/// target is skipped. A failed creation (for example a duplicate title) is
/// logged and counted as failed; the batch continues.
///
/// # Errors
///
/// Returns [`RequestError`] only under [`ErrorPolicy::Fatal`].
pub async fn create_milestones(
    client: &GitHubClient,
    milestones: &[Milestone],
    search_by_number: bool,
    policy: ErrorPolicy,
) -> Result<MilestoneReport, RequestError> {
    let span = info_span!(
        "create_milestones",
        repo = %client.full_name(),
        search_by_number
    );

    async {
        let mut report = MilestoneReport::default();

        for milestone in milestones {
            if search_by_number {
                info!(number = milestone.number, "Search milestone by number");
                if get_milestone(client, milestone.number, policy)
                    .await?
                    .is_some()
                {
                    info!(title = %milestone.title, "Skip creating milestone");
                    report.skipped += 1;
                    continue;
                }
            }

            info!(title = %milestone.title, "Create milestone");
            let body = CreateMilestone::from(milestone);
            let created: Option<serde_json::Value> =
                client.post("milestones", &body, policy).await?;
            if created.is_some() {
                info!(number = milestone.number, "Created milestone");
                report.created += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            created = report.created,
            skipped = report.skipped,
            failed = report.failed,
            "Milestone creation complete"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}
