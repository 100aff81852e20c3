//! In-memory structure database.
//!
//! Stands in for the host database in tests and in the command-line tool,
//! where it is persisted as JSON.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spst_format::{StructureDescriptor, UNDEFINED_TYPE, write_file_atomic};

use crate::database::{
    MemberHandle, MemberInfo, StructureDatabase, StructureHandle, StructureInfo,
};
use crate::error::{HostError, Result};

/// Structure as stored by [`MemoryDatabase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredStructure {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub members: Vec<StoredMember>,
}

/// Member as stored by [`MemoryDatabase`], placed at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMember {
    pub offset: u64,
    pub name: String,
    /// `None` for members whose type is unknown.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub size_bytes: u64,
}

impl StoredStructure {
    /// Build from a descriptor, laying members out back to back from offset 0.
    #[must_use]
    pub fn from_descriptor(descriptor: StructureDescriptor) -> Self {
        let mut offset = 0u64;
        let members = descriptor
            .members
            .into_iter()
            .map(|member| {
                let stored = StoredMember {
                    offset,
                    type_name: (member.type_name != UNDEFINED_TYPE).then_some(member.type_name),
                    name: member.name,
                    comment: member.comment,
                    size_bytes: member.size_bytes,
                };
                offset = offset.saturating_add(member.size_bytes);
                stored
            })
            .collect();

        Self {
            name: descriptor.name,
            comment: descriptor.comment,
            size_bytes: descriptor.size_bytes,
            members,
        }
    }

    /// Member indices ordered by offset; ties keep insertion order.
    fn members_by_offset(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.members.len()).collect();
        order.sort_by_key(|&idx| self.members[idx].offset);
        order
    }
}

/// Structure database held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDatabase {
    #[serde(default)]
    structures: Vec<StoredStructure>,
}

impl MemoryDatabase {
    /// Create an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database holding `structures`.
    pub fn from_structures(structures: Vec<StoredStructure>) -> Result<Self> {
        validate(&structures)?;
        Ok(Self { structures })
    }

    /// Create a database from snapshot descriptors.
    pub fn from_descriptors(descriptors: Vec<StructureDescriptor>) -> Result<Self> {
        let mut db = Self::new();
        db.replace_structures(descriptors)?;
        Ok(db)
    }

    /// Stored structures, in database order.
    #[must_use]
    pub fn structures(&self) -> &[StoredStructure] {
        &self.structures
    }

    /// Number of structures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Whether the database holds no structures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Parse a JSON database description.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a JSON database description from a file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let db = Self::from_json_str(&text).map_err(|source| HostError::DatabaseFile {
            path: path.to_path_buf(),
            source,
        })?;
        validate(&db.structures)?;
        Ok(db)
    }

    /// Render the database as pretty-printed JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Save the database as JSON, replacing `path` atomically.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self
            .to_json_string()
            .map_err(|source| HostError::DatabaseFile {
                path: path.to_path_buf(),
                source,
            })?;
        write_file_atomic(path, json.as_bytes(), true)?;
        Ok(())
    }

    fn structure(&self, handle: StructureHandle) -> Result<&StoredStructure> {
        usize::try_from(handle.raw())
            .ok()
            .and_then(|idx| self.structures.get(idx))
            .ok_or(HostError::UnknownStructure(handle))
    }
}

impl StructureDatabase for MemoryDatabase {
    fn list_structures(&self) -> Vec<StructureHandle> {
        (0..self.structures.len() as u64)
            .map(StructureHandle::new)
            .collect()
    }

    fn describe_structure(&self, handle: StructureHandle) -> Result<StructureInfo> {
        let structure = self.structure(handle)?;
        Ok(StructureInfo {
            name: structure.name.clone(),
            comment: structure.comment.clone(),
            size_bytes: structure.size_bytes,
        })
    }

    fn list_members(&self, handle: StructureHandle) -> Result<Vec<MemberHandle>> {
        let structure = self.structure(handle)?;
        Ok(structure
            .members_by_offset()
            .into_iter()
            .map(|idx| MemberHandle::new(handle, idx as u64))
            .collect())
    }

    fn describe_member(&self, handle: MemberHandle) -> Result<MemberInfo> {
        let member = self
            .structure(handle.owner())
            .ok()
            .and_then(|structure| {
                usize::try_from(handle.raw())
                    .ok()
                    .and_then(|idx| structure.members.get(idx))
            })
            .ok_or(HostError::UnknownMember(handle))?;
        Ok(MemberInfo {
            name: member.name.clone(),
            type_name: member.type_name.clone(),
            comment: member.comment.clone(),
            size_bytes: member.size_bytes,
        })
    }

    fn replace_structures(&mut self, structures: Vec<StructureDescriptor>) -> Result<()> {
        let stored: Vec<StoredStructure> = structures
            .into_iter()
            .map(StoredStructure::from_descriptor)
            .collect();
        validate(&stored)?;
        self.structures = stored;
        Ok(())
    }
}

/// Reject lists the host would refuse: empty or repeated structure names,
/// repeated member names within one structure.
fn validate(structures: &[StoredStructure]) -> Result<()> {
    let mut names = BTreeSet::new();
    for structure in structures {
        if structure.name.is_empty() {
            return Err(HostError::rejected("structure name must not be empty"));
        }
        if !names.insert(structure.name.as_str()) {
            return Err(HostError::rejected(format!(
                "duplicate structure name: {}",
                structure.name
            )));
        }
        let mut member_names = BTreeSet::new();
        for member in &structure.members {
            if !member_names.insert(member.name.as_str()) {
                return Err(HostError::rejected(format!(
                    "duplicate member name {} in {}",
                    member.name, structure.name
                )));
            }
        }
    }
    Ok(())
}
