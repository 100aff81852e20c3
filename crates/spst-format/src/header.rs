//! Snapshot header record handling.
//!
//! Every snapshot starts with a fixed 16-byte header.
//!
//! # Structure
//!
//! | Offset | Length | Field           | Description                      |
//! |--------|--------|-----------------|----------------------------------|
//! | 0-3    | 4      | magic           | `SPST`                           |
//! | 4-5    | 2      | version         | Format version (u16 LE)          |
//! | 6-7    | 2      | flags           | Reserved, must be 0              |
//! | 8-11   | 4      | structure_count | Structure records in body (u32)  |
//! | 12-15  | 4      | body_crc32      | CRC-32 of every byte after 16    |

use crate::error::{Result, SpstError};

/// Header length in bytes.
pub const HEADER_LEN: usize = 16;

/// Magic bytes at the start of every snapshot.
pub const MAGIC: [u8; 4] = *b"SPST";

/// Newest format version this crate reads and the one it writes.
pub const FORMAT_VERSION: u16 = 1;

/// File dialog filter for snapshot files.
pub const FILE_FILTER: &str = "*.spst";

/// Parsed snapshot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    /// Format version.
    pub version: u16,
    /// Reserved flags.
    pub flags: u16,
    /// Number of structure records in the body.
    pub structure_count: u32,
    /// CRC-32 of the body.
    pub body_crc32: u32,
}

impl SnapshotHeader {
    /// Build a current-version header for an encoded body.
    #[must_use]
    pub fn for_body(structure_count: u32, body: &[u8]) -> Self {
        Self {
            version: FORMAT_VERSION,
            flags: 0,
            structure_count,
            body_crc32: body_checksum(body),
        }
    }

    /// Encode the header.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut record = [0u8; HEADER_LEN];
        record[0..4].copy_from_slice(&MAGIC);
        record[4..6].copy_from_slice(&self.version.to_le_bytes());
        record[6..8].copy_from_slice(&self.flags.to_le_bytes());
        record[8..12].copy_from_slice(&self.structure_count.to_le_bytes());
        record[12..16].copy_from_slice(&self.body_crc32.to_le_bytes());
        record
    }
}

/// Parse and validate the header at the start of `data`.
///
/// Checks the magic first so that a foreign file is reported as such rather
/// than as truncated.
pub fn parse_header(data: &[u8]) -> Result<SnapshotHeader> {
    let magic_len = data.len().min(MAGIC.len());
    if data[..magic_len] != MAGIC[..magic_len] {
        return Err(SpstError::BadMagic);
    }
    let record = data
        .get(..HEADER_LEN)
        .ok_or(SpstError::truncated("header", 0))?;

    let version = read_u16(record, 4);
    if version == 0 {
        return Err(SpstError::invalid_format("version 0 is not a valid version"));
    }
    if version > FORMAT_VERSION {
        return Err(SpstError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let flags = read_u16(record, 6);
    if flags != 0 {
        return Err(SpstError::invalid_format(format!(
            "unknown header flags {flags:#06x}"
        )));
    }

    Ok(SnapshotHeader {
        version,
        flags,
        structure_count: read_u32(record, 8),
        body_crc32: read_u32(record, 12),
    })
}

/// CRC-32 (IEEE) of a snapshot body.
#[must_use]
pub fn body_checksum(body: &[u8]) -> u32 {
    crc32fast::hash(body)
}

fn read_u16(record: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([record[offset], record[offset + 1]])
}

fn read_u32(record: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        record[offset],
        record[offset + 1],
        record[offset + 2],
        record[offset + 3],
    ])
}
