//! Structure snapshot (`.spst`) file format reader and writer.
//!
//! A snapshot is the ordered list of structure definitions (name, comment,
//! size) and their member fields (name, type name, comment, size) captured
//! from a disassembler database at one point in time.
//!
//! # Features
//!
//! - Length-prefixed UTF-8 text fields: empty strings, separators and
//!   control characters survive unchanged
//! - Versioned header with a CRC-32 over the record body
//! - Atomic file writes (temporary file, fsync, rename)
//! - All-or-nothing reads: a corrupt file never yields a partial list
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use spst_format::{MemberDescriptor, StructureDescriptor, read_spst, write_spst};
//!
//! let point = StructureDescriptor::new("Point", 8)
//!     .with_member(MemberDescriptor::new("x", "int32", 4))
//!     .with_member(MemberDescriptor::new("y", "int32", 4));
//!
//! write_spst(Path::new("structs.spst"), &[point.clone()]).unwrap();
//!
//! let restored = read_spst(Path::new("structs.spst")).unwrap();
//! assert_eq!(restored, vec![point]);
//! ```
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! header  := "SPST" | version u16 | flags u16 | structure_count u32 | body_crc32 u32
//! struct  := text name | text comment | u64 size | u32 member_count | member*
//! member  := text name | text type_name | text comment | u64 size
//! text    := u32 byte_length | UTF-8 bytes
//! ```

mod error;
pub mod header;
mod reader;
mod types;
mod writer;

// Re-export error types
pub use error::{ErrorKind, Result, SpstError};

// Re-export core types
pub use types::{
    MemberDescriptor, SpstReaderOptions, SpstWriterOptions, StructureDescriptor, UNDEFINED_TYPE,
    Warning, WriteSummary,
};

// Re-export reader functionality
pub use reader::{SpstReader, decode_snapshot, read_spst, read_spst_with_options};

// Re-export writer functionality
pub use writer::{
    SpstWriter, encode_snapshot, write_file_atomic, write_spst, write_spst_with_options,
};
