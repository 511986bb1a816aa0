//! Issue and pull request references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distinguishes plain issues from pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// A plain issue.
    #[serde(rename = "Issue")]
    Issue,
    /// A pull request.
    #[serde(rename = "PR")]
    PullRequest,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => f.write_str("Issue"),
            Self::PullRequest => f.write_str("PR"),
        }
    }
}

/// An issue or pull request that carried a milestone at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// Issue (or pull request) number.
    pub number: u64,

    /// Number of the milestone in the source repository.
    pub milestone_number: u64,

    /// Issue title.
    pub title: String,

    /// Issue or pull request.
    pub kind: IssueKind,
}

/// Which issues the issue lister asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStateFilter {
    /// Open issues only (the API default).
    #[default]
    Open,
    /// Closed issues only.
    Closed,
    /// Both open and closed issues.
    All,
}

impl FromStr for IssueStateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown issue state '{other}', expected open, closed or all"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_issue_state_case_insensitively() {
        assert_eq!("ALL".parse::<IssueStateFilter>(), Ok(IssueStateFilter::All));
        assert_eq!("open".parse::<IssueStateFilter>(), Ok(IssueStateFilter::Open));
        assert!("merged".parse::<IssueStateFilter>().is_err());
    }
}
