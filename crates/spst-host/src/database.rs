//! Structure database capability.
//!
//! The host owns its structure storage; snapshot operations only see it
//! through [`StructureDatabase`], passed in explicitly by the caller.

use spst_format::StructureDescriptor;

use crate::error::Result;

/// Opaque reference to a structure in a [`StructureDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructureHandle(u64);

impl StructureHandle {
    /// Wrap a database-specific identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Database-specific identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque reference to a member of one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberHandle {
    owner: StructureHandle,
    raw: u64,
}

impl MemberHandle {
    /// Wrap a database-specific member identifier.
    #[must_use]
    pub const fn new(owner: StructureHandle, raw: u64) -> Self {
        Self { owner, raw }
    }

    /// Structure the member belongs to.
    #[must_use]
    pub const fn owner(self) -> StructureHandle {
        self.owner
    }

    /// Database-specific identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.raw
    }
}

/// Structure-level facts reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureInfo {
    pub name: String,
    pub comment: String,
    pub size_bytes: u64,
}

/// Member-level facts reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    /// `None` when the host could not resolve the member's type.
    pub type_name: Option<String>,
    pub comment: String,
    pub size_bytes: u64,
}

/// Read and replace access to the host's structure definitions.
pub trait StructureDatabase {
    /// All structures, in database order.
    fn list_structures(&self) -> Vec<StructureHandle>;

    /// Name, comment and size of one structure.
    fn describe_structure(&self, handle: StructureHandle) -> Result<StructureInfo>;

    /// Members of one structure, by increasing byte offset.
    fn list_members(&self, handle: StructureHandle) -> Result<Vec<MemberHandle>>;

    /// Name, type, comment and size of one member.
    fn describe_member(&self, handle: MemberHandle) -> Result<MemberInfo>;

    /// Replace every structure with `structures`.
    ///
    /// Implementations must either apply the whole list or leave the
    /// database unchanged.
    fn replace_structures(&mut self, structures: Vec<StructureDescriptor>) -> Result<()>;
}
