//! Snapshot files.
//!
//! A snapshot holds one record per line. Each line is a JSON array with the
//! record's fields in a fixed order:
//!
//! ```text
//! [1,"Sprint 1","open","",3,0,"2024-05-01T07:00:00Z"]
//! [42,1,"Fix login","Issue"]
//! ```
//!
//! Records are written in listing order and read back in the same order.

mod error;

pub use error::SnapshotError;

use crate::model::{IssueKind, IssueReference, Milestone, MilestoneState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// A record that can be stored as one snapshot line.
pub trait SnapshotRecord: Sized {
    /// Positional row the record is stored as.
    type Row: Serialize + DeserializeOwned;

    /// Converts the record into its row.
    fn to_row(&self) -> Self::Row;

    /// Rebuilds the record from its row.
    fn from_row(row: Self::Row) -> Self;
}

impl SnapshotRecord for Milestone {
    /// number, title, state, description, open issues, closed issues, due on
    type Row = (u64, String, MilestoneState, String, u64, u64, String);

    fn to_row(&self) -> Self::Row {
        (
            self.number,
            self.title.clone(),
            self.state,
            self.description.clone(),
            self.open_issues,
            self.closed_issues,
            self.due_on.clone(),
        )
    }

    fn from_row(row: Self::Row) -> Self {
        let (number, title, state, description, open_issues, closed_issues, due_on) = row;
        Self {
            number,
            title,
            state,
            description,
            open_issues,
            closed_issues,
            due_on,
        }
    }
}

impl SnapshotRecord for IssueReference {
    /// issue number, milestone number, title, kind
    type Row = (u64, u64, String, IssueKind);

    fn to_row(&self) -> Self::Row {
        (
            self.number,
            self.milestone_number,
            self.title.clone(),
            self.kind,
        )
    }

    fn from_row(row: Self::Row) -> Self {
        let (number, milestone_number, title, kind) = row;
        Self {
            number,
            milestone_number,
            title,
            kind,
        }
    }
}

/// Writes `records` to `path`, replacing any existing file.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be written.
pub fn write_snapshot<R: SnapshotRecord>(
    path: &Path,
    records: &[R],
) -> Result<usize, SnapshotError> {
    let io_error = |source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, &record.to_row()).map_err(|source| {
            SnapshotError::Encode {
                path: path.display().to_string(),
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(io_error)?;
    }
    writer.flush().map_err(io_error)?;

    debug!(path = %path.display(), count = records.len(), "Wrote snapshot");
    Ok(records.len())
}

/// Reads every record from `path`, in file order. Blank lines are ignored.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be read or a line is not a
/// valid record.
pub fn read_snapshot<R: SnapshotRecord>(path: &Path) -> Result<Vec<R>, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str::<R::Row>(line).map_err(|source| SnapshotError::Parse {
            path: path.display().to_string(),
            line: index + 1,
            source,
        })?;
        records.push(R::from_row(row));
    }

    debug!(path = %path.display(), count = records.len(), "Read snapshot");
    Ok(records)
}
