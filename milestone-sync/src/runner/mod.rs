//! Orchestrates the `list` and `update` operations.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::client::GitHubClient;
use crate::issues::{apply_milestones, list_issues};
use crate::milestones::{create_milestones, list_milestones};
use crate::model::{IssueReference, Milestone};
use crate::snapshot::{read_snapshot, write_snapshot};
use crate::summary::RunSummary;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// The two phases of a synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Snapshot milestones and milestoned issues to files.
    List,
    /// Replay snapshots onto the repository.
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Update => f.write_str("update"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "update" => Ok(Self::Update),
            other => Err(format!(
                "unknown operation '{other}', expected list or update"
            )),
        }
    }
}

/// Runs one operation against a single repository.
pub struct Runner {
    config: RunnerConfig,
    client: GitHubClient,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the settings are invalid or the GitHub
    /// client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.settings().validate()?;
        let client = GitHubClient::new(
            &config.settings().api_endpoint,
            config.token(),
            config.owner(),
            config.repo(),
        )?;
        Ok(Self { config, client })
    }

    /// Executes the given operation.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] for snapshot failures, and for request
    /// failures under the fatal policy.
    pub async fn run(&self, operation: Operation) -> Result<RunSummary, RunnerError> {
        info!(
            repo = %self.client.full_name(),
            operation = %operation,
            error_policy = %self.config.error_policy(),
            "Starting run"
        );
        match operation {
            Operation::List => self.list().await,
            Operation::Update => self.update().await,
        }
    }

    /// Snapshots milestones and milestoned issues.
    ///
    /// A listing that stopped early is counted in
    /// [`RunSummary::listings_incomplete`] and its snapshot file is not
    /// written, so an earlier complete snapshot survives.
    async fn list(&self) -> Result<RunSummary, RunnerError> {
        let settings = self.config.settings();
        let policy = self.config.error_policy();
        let mut summary = RunSummary::new(Operation::List);

        info!("List milestones");
        let milestones = list_milestones(&self.client, policy).await?;
        if milestones.complete {
            summary.milestones_listed =
                write_snapshot(&settings.milestones_file, &milestones.items)?;
            info!(
                count = summary.milestones_listed,
                path = %settings.milestones_file.display(),
                "Filed milestones"
            );
        } else {
            summary.listings_incomplete += 1;
            warn!(
                count = milestones.len(),
                path = %settings.milestones_file.display(),
                "Milestone listing incomplete, snapshot not written"
            );
        }

        info!("List issues/pull requests with milestones");
        let issues = list_issues(&self.client, settings.issue_state, policy).await?;
        if issues.complete {
            summary.issues_listed = write_snapshot(&settings.issues_file, &issues.items)?;
            info!(
                count = summary.issues_listed,
                path = %settings.issues_file.display(),
                "Filed issues/pull requests"
            );
        } else {
            summary.listings_incomplete += 1;
            warn!(
                count = issues.len(),
                path = %settings.issues_file.display(),
                "Issue/pull request listing incomplete, snapshot not written"
            );
        }

        Ok(summary)
    }

    /// Creates missing milestones, then re-applies issue milestones.
    async fn update(&self) -> Result<RunSummary, RunnerError> {
        let settings = self.config.settings();
        let policy = self.config.error_policy();
        let mut summary = RunSummary::new(Operation::Update);

        info!("Create milestones");
        let milestones: Vec<Milestone> = read_snapshot(&settings.milestones_file)?;
        if milestones.is_empty() {
            warn!(path = %settings.milestones_file.display(), "Milestone snapshot is empty");
        }
        summary.milestones = create_milestones(
            &self.client,
            &milestones,
            settings.search_by_number,
            policy,
        )
        .await?;
        info!(count = summary.milestones.created, "Created milestones");

        info!("Update issues and pull requests with milestones");
        let issues: Vec<IssueReference> = read_snapshot(&settings.issues_file)?;
        summary.issues = apply_milestones(
            &self.client,
            &issues,
            &milestones,
            settings.search_by_number,
            settings.unresolved,
            policy,
        )
        .await?;
        info!(
            count = summary.issues.applied,
            "Updated issues and pull requests"
        );

        Ok(summary)
    }
}
