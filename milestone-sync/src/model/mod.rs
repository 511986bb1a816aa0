//! Records captured in snapshots and the wire types they are decoded from.

mod issue;
mod milestone;
pub(crate) mod remote;

pub use issue::{IssueKind, IssueReference, IssueStateFilter};
pub use milestone::{Milestone, MilestoneState};
pub(crate) use milestone::{find_by_number, find_by_title};
