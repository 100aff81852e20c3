//! Error types for host-side snapshot operations.

use std::path::PathBuf;

use spst_format::{ErrorKind, SpstError};
use thiserror::Error;

use crate::database::{MemberHandle, StructureHandle};

/// Errors raised while capturing from or restoring into a structure database.
#[derive(Debug, Error)]
pub enum HostError {
    /// Snapshot file could not be read or written.
    #[error(transparent)]
    Snapshot(#[from] SpstError),

    /// Structure handle does not name a structure.
    #[error("unknown structure handle {0:?}")]
    UnknownStructure(StructureHandle),

    /// Member handle does not name a member.
    #[error("unknown member handle {0:?}")]
    UnknownMember(MemberHandle),

    /// Database refused an update.
    #[error("database rejected update: {message}")]
    Rejected { message: String },

    /// Database description file could not be parsed.
    #[error("invalid database file {path}: {source}")]
    DatabaseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error outside snapshot handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

impl HostError {
    /// Create a Rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Snapshot error class, when the failure came from the file layer.
    #[must_use]
    pub fn snapshot_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Snapshot(err) => Some(err.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_errors_keep_their_message() {
        let err: HostError = SpstError::BadMagic.into();
        assert_eq!(format!("{err}"), "not a snapshot file: missing SPST magic");
        assert_eq!(err.snapshot_kind(), Some(ErrorKind::Format));
    }

    #[test]
    fn test_rejected_display() {
        let err = HostError::rejected("duplicate structure name: Point");
        assert_eq!(
            format!("{err}"),
            "database rejected update: duplicate structure name: Point"
        );
        assert_eq!(err.snapshot_kind(), None);
    }
}
