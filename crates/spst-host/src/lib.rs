//! Host-side structure snapshot operations.
//!
//! Wraps the host's structure storage and UI as explicit capability traits
//! ([`StructureDatabase`], [`HostUi`]) and builds the snapshot commands on
//! top of them:
//!
//! - [`capture_structures`] / [`export_structures`]: database to `.spst`
//! - [`import_structures`]: `.spst` back into the database, all or nothing
//! - [`Plugin`]: menu registration and the "Load file" / "Produce file"
//!   commands
//!
//! [`MemoryDatabase`] implements [`StructureDatabase`] without a host and
//! can be persisted as JSON.

pub mod database;
pub mod error;
pub mod memory;
pub mod plugin;
pub mod snapshot;

pub use database::{MemberHandle, MemberInfo, StructureDatabase, StructureHandle, StructureInfo};
pub use error::{HostError, Result};
pub use memory::{MemoryDatabase, StoredMember, StoredStructure};
pub use plugin::{CommandId, HostUi, Outcome, PathMode, Plugin};
pub use snapshot::{
    ExportReport, ImportReport, capture_structures, export_structures, import_structures,
};
