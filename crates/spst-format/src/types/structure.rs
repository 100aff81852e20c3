//! Structure and member descriptors.

use serde::{Deserialize, Serialize};

/// Type name recorded for a member whose type could not be resolved.
pub const UNDEFINED_TYPE: &str = "undefined";

/// A named aggregate type with a byte size and ordered member fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureDescriptor {
    /// Structure name.
    pub name: String,
    /// Repeatable comment (may be empty).
    #[serde(default)]
    pub comment: String,
    /// Declared size in bytes.
    pub size_bytes: u64,
    /// Members in declaration (offset) order.
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl StructureDescriptor {
    /// Create a structure with no comment and no members.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            size_bytes,
            members: Vec::new(),
        }
    }

    /// Set the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Append a member after the existing ones.
    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Append several members in order.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberDescriptor>) -> Self {
        self.members.extend(members);
        self
    }

    /// Number of members.
    #[must_use]
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// Sum of member sizes.
    ///
    /// Usually equal to `size_bytes`, but nothing enforces it.
    #[must_use]
    pub fn member_size_total(&self) -> u64 {
        self.members
            .iter()
            .fold(0u64, |total, member| total.saturating_add(member.size_bytes))
    }
}

/// One field within a structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Member name.
    pub name: String,
    /// Resolved type name, or [`UNDEFINED_TYPE`].
    pub type_name: String,
    /// Repeatable comment (may be empty).
    #[serde(default)]
    pub comment: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl MemberDescriptor {
    /// Create a member with a resolved type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            comment: String::new(),
            size_bytes,
        }
    }

    /// Create a member whose type could not be resolved.
    pub fn undefined(name: impl Into<String>, size_bytes: u64) -> Self {
        Self::new(name, UNDEFINED_TYPE, size_bytes)
    }

    /// Set the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Whether the type name is the unresolved sentinel.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.type_name == UNDEFINED_TYPE
    }
}
