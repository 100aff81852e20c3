//! Write reports and non-fatal warnings.

use std::fmt;

/// Non-fatal condition raised while writing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// No structures were supplied; the file holds a header only.
    EmptyInput,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no structures to export, wrote an empty snapshot"),
        }
    }
}

/// Counts reported after a snapshot was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Structures written.
    pub structures: usize,
    /// Members written across all structures.
    pub members: usize,
    /// Encoded size in bytes.
    pub bytes: u64,
    /// Non-fatal conditions.
    pub warnings: Vec<Warning>,
}

impl WriteSummary {
    /// Whether any warning was raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
