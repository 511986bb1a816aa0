//! Milestone records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    /// Milestone is open.
    Open,
    /// Milestone is closed.
    Closed,
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// A milestone as captured from a repository.
///
/// Optional server fields (`description`, `due_on`) are stored as empty
/// strings when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Repository-scoped milestone number.
    pub number: u64,

    /// Milestone title; used for matching across repositories.
    pub title: String,

    /// Open or closed.
    pub state: MilestoneState,

    /// Free-form description, empty when unset.
    pub description: String,

    /// Number of open issues assigned at extraction time.
    pub open_issues: u64,

    /// Number of closed issues assigned at extraction time.
    pub closed_issues: u64,

    /// ISO-8601 due date, empty when unset.
    pub due_on: String,
}

/// Returns the first milestone in `milestones` whose title equals `title`.
pub(crate) fn find_by_title<'a>(milestones: &'a [Milestone], title: &str) -> Option<&'a Milestone> {
    milestones.iter().find(|milestone| milestone.title == title)
}

/// Returns the first milestone in `milestones` with the given number.
pub(crate) fn find_by_number(milestones: &[Milestone], number: u64) -> Option<&Milestone> {
    milestones.iter().find(|milestone| milestone.number == number)
}
