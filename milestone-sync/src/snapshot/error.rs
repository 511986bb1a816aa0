//! Snapshot file error types.

use thiserror::Error;

/// Errors that can occur while reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to read or write the file.
    #[error("Failed to access snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed as a record.
    #[error("Malformed record in snapshot '{path}' at line {line}: {source}")]
    Parse {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("Failed to encode record for snapshot '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
