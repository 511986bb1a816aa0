//! Maps source milestone numbers onto the target repository.

use crate::model::{find_by_number, find_by_title, Milestone};
use tracing::info;

/// Looks up `number` in the `source` snapshot and returns the number of the
/// first `target` milestone carrying the same title.
///
/// Returns `None` when the source number is unknown or no target milestone
/// has that title.
#[must_use]
pub fn resolve_milestone_number(
    number: u64,
    source: &[Milestone],
    target: &[Milestone],
) -> Option<u64> {
    let title = &find_by_number(source, number)?.title;
    find_by_title(target, title).map(|milestone| milestone.number)
}

/// Strategy for translating source milestone numbers.
#[derive(Debug, Clone)]
pub enum MilestoneResolver<'a> {
    /// Numbers are stable across repositories; use them as-is.
    ByNumber,
    /// Match by title against the target's live milestones.
    ByTitle {
        /// Milestones from the source snapshot.
        source: &'a [Milestone],
        /// Milestones currently on the target repository.
        target: Vec<Milestone>,
    },
}

impl MilestoneResolver<'_> {
    /// Resolves a source milestone number for the target repository.
    #[must_use]
    pub fn resolve(&self, number: u64) -> Option<u64> {
        match self {
            Self::ByNumber => Some(number),
            Self::ByTitle { source, target } => {
                let resolved = resolve_milestone_number(number, source, target);
                info!(
                    source_number = number,
                    target_number = ?resolved,
                    "Adjust milestone number"
                );
                resolved
            }
        }
    }
}
