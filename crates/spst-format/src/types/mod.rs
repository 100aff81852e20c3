//! Core types for snapshot handling.
//!
//! This module provides the structure and member descriptors that make up a
//! snapshot, plus the reader/writer options and write reports.

mod options;
mod report;
mod structure;

pub use options::{SpstReaderOptions, SpstWriterOptions};
pub use report::{Warning, WriteSummary};
pub use structure::{MemberDescriptor, StructureDescriptor, UNDEFINED_TYPE};
