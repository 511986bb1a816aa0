//! Runner configuration.

use crate::client::ErrorPolicy;
use crate::settings::Settings;

/// Configuration for a list or update run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository owner (user or organization).
    owner: String,
    /// Repository name.
    repo: String,
    /// GitHub token sent as a bearer token on every call.
    token: String,
    /// Endpoint, snapshot paths and reconciliation mode.
    settings: Settings,
    /// What a failed request does to the run.
    error_policy: ErrorPolicy,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(owner: String, repo: String, token: String, settings: Settings) -> Self {
        Self {
            owner,
            repo,
            token,
            settings,
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Sets how failed requests are handled.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the failed-request policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }
}
