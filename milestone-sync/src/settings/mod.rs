//! Run settings.
//!
//! Defaults can be overridden by an optional TOML file, which the CLI then
//! overrides with flags and environment variables:
//!
//! ```toml
//! api-endpoint = "https://github.example.com/api/v3"
//! milestones-file = "snapshots/milestones.jsonl"
//! issues-file = "snapshots/issues.jsonl"
//! search-by-number = true
//! unresolved = "clear"
//! issue-state = "all"
//! ```

mod error;

pub use error::SettingsError;

use crate::issues::UnresolvedMilestone;
use crate::model::IssueStateFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com";

/// Default milestone snapshot path.
pub const DEFAULT_MILESTONES_FILE: &str = "milestones.jsonl";

/// Default issue snapshot path.
pub const DEFAULT_ISSUES_FILE: &str = "issues.jsonl";

/// Settings shared by both operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the GitHub REST API.
    pub api_endpoint: String,

    /// Milestone snapshot path.
    pub milestones_file: PathBuf,

    /// Issue snapshot path.
    pub issues_file: PathBuf,

    /// Trust milestone numbers to match between source and target.
    pub search_by_number: bool,

    /// Handling of issues whose milestone has no counterpart on the target.
    pub unresolved: UnresolvedMilestone,

    /// Which issues to list.
    pub issue_state: IssueStateFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            milestones_file: PathBuf::from(DEFAULT_MILESTONES_FILE),
            issues_file: PathBuf::from(DEFAULT_ISSUES_FILE),
            search_by_number: false,
            unresolved: UnresolvedMilestone::default(),
            issue_state: IssueStateFilter::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. Keys that are absent keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or parsed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        debug!(path = %path.display(), "Loading settings");
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| SettingsError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ValidationError`] for a non-http(s) API
    /// endpoint or an empty snapshot path.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let endpoint =
            Url::parse(&self.api_endpoint).map_err(|e| SettingsError::ValidationError {
                key: "api-endpoint",
                message: format!("'{}' is not a valid URL: {e}", self.api_endpoint),
            })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SettingsError::ValidationError {
                key: "api-endpoint",
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if self.milestones_file.as_os_str().is_empty() {
            return Err(SettingsError::ValidationError {
                key: "milestones-file",
                message: "path cannot be empty".to_string(),
            });
        }
        if self.issues_file.as_os_str().is_empty() {
            return Err(SettingsError::ValidationError {
                key: "issues-file",
                message: "path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
