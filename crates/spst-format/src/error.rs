//! Error types for snapshot file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a [`SpstError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path could not be opened, read, written or replaced.
    Io,
    /// The content does not follow the snapshot encoding.
    Format,
}

/// Errors that can occur when reading or writing snapshot files.
#[derive(Debug, Error)]
pub enum SpstError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path has no file name component to write to.
    #[error("invalid output path: {path}")]
    InvalidPath { path: PathBuf },

    /// Invalid snapshot content.
    #[error("invalid snapshot file: {message}")]
    InvalidFormat { message: String },

    /// File does not start with the snapshot magic.
    #[error("not a snapshot file: missing SPST magic")]
    BadMagic,

    /// File was written by a newer format version.
    #[error("unsupported snapshot version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    /// Input ended inside a field.
    #[error("truncated {field} at offset {offset}")]
    Truncated { field: &'static str, offset: usize },

    /// Text field is not valid UTF-8.
    #[error("{field} at offset {offset} is not valid UTF-8")]
    InvalidText { field: &'static str, offset: usize },

    /// A count promises more records than the remaining input can hold.
    #[error("{field} {count} at offset {offset} exceeds remaining input")]
    CountOutOfRange {
        field: &'static str,
        count: u64,
        offset: usize,
    },

    /// Value is too large to encode.
    #[error("{field} is too large to encode ({len})")]
    TooLarge { field: &'static str, len: usize },

    /// Bytes left after the last declared record.
    #[error("unexpected trailing bytes at offset {offset}")]
    TrailingBytes { offset: usize },

    /// Body checksum does not match the header.
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SpstError>;

impl SpstError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a Truncated error.
    pub fn truncated(field: &'static str, offset: usize) -> Self {
        Self::Truncated { field, offset }
    }

    /// Classify the error as an I/O or a format failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::InvalidPath { .. } | Self::Io(_) => ErrorKind::Io,
            Self::InvalidFormat { .. }
            | Self::BadMagic
            | Self::UnsupportedVersion { .. }
            | Self::Truncated { .. }
            | Self::InvalidText { .. }
            | Self::CountOutOfRange { .. }
            | Self::TooLarge { .. }
            | Self::TrailingBytes { .. }
            | Self::ChecksumMismatch { .. } => ErrorKind::Format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpstError::invalid_format("test message");
        assert_eq!(format!("{err}"), "invalid snapshot file: test message");

        let err = SpstError::truncated("member count", 42);
        assert_eq!(format!("{err}"), "truncated member count at offset 42");

        let err = SpstError::ChecksumMismatch {
            stored: 0xdead_beef,
            computed: 0x1,
        };
        assert_eq!(
            format!("{err}"),
            "checksum mismatch: stored 0xdeadbeef, computed 0x00000001"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: SpstError = io_err.into();
        assert!(matches!(err, SpstError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(SpstError::BadMagic.kind(), ErrorKind::Format);
        assert_eq!(SpstError::truncated("name", 0).kind(), ErrorKind::Format);
        let missing = SpstError::FileNotFound {
            path: PathBuf::from("missing.spst"),
        };
        assert_eq!(missing.kind(), ErrorKind::Io);
    }
}
