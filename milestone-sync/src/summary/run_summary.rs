//! Run summary types.

use super::report::{ApplyReport, MilestoneReport};
use crate::runner::Operation;

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Operation that was executed.
    pub operation: Operation,

    /// Milestones written to the snapshot (`list`).
    pub milestones_listed: usize,

    /// Issues and pull requests written to the snapshot (`list`).
    pub issues_listed: usize,

    /// Listings that stopped before their last page (`list`). Their
    /// snapshot files are left untouched.
    pub listings_incomplete: usize,

    /// Milestone replay outcome (`update`).
    pub milestones: MilestoneReport,

    /// Issue milestone outcome (`update`).
    pub issues: ApplyReport,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            milestones_listed: 0,
            issues_listed: 0,
            listings_incomplete: 0,
            milestones: MilestoneReport::default(),
            issues: ApplyReport::default(),
        }
    }

    /// Returns true if any request failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.listings_incomplete > 0 || self.milestones.failed > 0 || self.issues.failed > 0
    }

    /// Returns true if every record was handled without a failed request or
    /// an unresolved milestone.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures() && self.issues.unresolved == 0
    }
}
