#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod client;
pub mod issues;
pub mod milestones;
pub mod model;
pub mod runner;
pub mod settings;
pub mod snapshot;
pub mod summary;

pub use client::{ErrorPolicy, GitHubClient, Listing, Page, PageCursor, RequestError};
pub use issues::{
    apply_milestones, list_issues, resolve_milestone_number, MilestoneResolver,
    UnresolvedMilestone,
};
pub use milestones::{create_milestones, get_milestone, list_milestones};
pub use model::{IssueKind, IssueReference, IssueStateFilter, Milestone, MilestoneState};
pub use runner::{Operation, Runner, RunnerConfig, RunnerError};
pub use settings::{Settings, SettingsError};
pub use snapshot::{read_snapshot, write_snapshot, SnapshotError, SnapshotRecord};
pub use summary::{ApplyReport, MilestoneReport, RunSummary};
