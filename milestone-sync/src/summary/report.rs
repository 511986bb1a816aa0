//! Per-batch outcome counts.

/// Outcome of replaying milestones onto a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MilestoneReport {
    /// Milestones created.
    pub created: usize,

    /// Milestones skipped because a milestone with the same number exists.
    pub skipped: usize,

    /// Milestones whose creation request failed.
    pub failed: usize,
}

/// Outcome of re-applying milestones to issues and pull requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Issues whose milestone was set.
    pub applied: usize,

    /// Issues skipped because their milestone has no counterpart.
    pub unresolved: usize,

    /// Issues whose update request failed.
    pub failed: usize,
}
