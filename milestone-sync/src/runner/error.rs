//! Runner error types.

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings could not be loaded or are invalid.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Snapshot could not be read or written.
    #[error(transparent)]
    Snapshot(#[from] crate::snapshot::SnapshotError),

    /// A request failed under the fatal policy.
    #[error(transparent)]
    Request(#[from] crate::client::RequestError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
