//! Snapshot file reader.
//!
//! Provides functionality to read structure snapshot files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SpstError};
use crate::header::{HEADER_LEN, body_checksum, parse_header};
use crate::types::{MemberDescriptor, SpstReaderOptions, StructureDescriptor};

/// Smallest encoded structure record: two empty texts, size, member count.
const MIN_STRUCTURE_LEN: usize = 4 + 4 + 8 + 4;

/// Smallest encoded member record: three empty texts and a size.
const MIN_MEMBER_LEN: usize = 4 + 4 + 4 + 8;

/// Snapshot file reader.
///
/// Reads the whole input before decoding, so a failure never yields a
/// partially populated list.
pub struct SpstReader<R: Read> {
    reader: BufReader<R>,
    options: SpstReaderOptions,
}

impl<R: Read> SpstReader<R> {
    /// Create a new snapshot reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            options: SpstReaderOptions::default(),
        }
    }

    /// Create a new snapshot reader with options.
    pub fn with_options(reader: R, options: SpstReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read and decode every structure in the snapshot.
    pub fn read_snapshot(mut self) -> Result<Vec<StructureDescriptor>> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        decode_snapshot(&data, &self.options)
    }
}

impl SpstReader<File> {
    /// Open a snapshot file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open_file(path)?))
    }

    /// Open a snapshot file with options.
    pub fn open_with_options(path: &Path, options: SpstReaderOptions) -> Result<Self> {
        Ok(Self::with_options(open_file(path)?, options))
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SpstError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SpstError::Io(e)
        }
    })
}

/// Read a snapshot file from a path.
pub fn read_spst(path: &Path) -> Result<Vec<StructureDescriptor>> {
    SpstReader::open(path)?.read_snapshot()
}

/// Read a snapshot file with options.
pub fn read_spst_with_options(
    path: &Path,
    options: SpstReaderOptions,
) -> Result<Vec<StructureDescriptor>> {
    SpstReader::open_with_options(path, options)?.read_snapshot()
}

/// Decode a complete snapshot from bytes.
pub fn decode_snapshot(
    data: &[u8],
    options: &SpstReaderOptions,
) -> Result<Vec<StructureDescriptor>> {
    let header = parse_header(data)?;
    let mut cursor = ByteCursor::new(data, HEADER_LEN);

    let count =
        cursor.checked_count(header.structure_count, MIN_STRUCTURE_LEN, "structure count")?;
    let mut structures = Vec::with_capacity(count);
    for _ in 0..count {
        structures.push(read_structure(&mut cursor)?);
    }

    if cursor.remaining() > 0 {
        return Err(SpstError::TrailingBytes { offset: cursor.pos });
    }

    if options.verify_checksum {
        let computed = body_checksum(&data[HEADER_LEN..]);
        if computed != header.body_crc32 {
            return Err(SpstError::ChecksumMismatch {
                stored: header.body_crc32,
                computed,
            });
        }
    }

    debug!(
        version = header.version,
        structures = structures.len(),
        bytes = data.len(),
        "decoded snapshot"
    );

    Ok(structures)
}

/// Decode one structure record and its members.
fn read_structure(cursor: &mut ByteCursor<'_>) -> Result<StructureDescriptor> {
    let name = cursor.read_text("structure name")?;
    let comment = cursor.read_text("structure comment")?;
    let size_bytes = cursor.read_u64("structure size")?;
    let member_count = cursor.read_u32("member count")?;
    let member_count = cursor.checked_count(member_count, MIN_MEMBER_LEN, "member count")?;

    let mut members = Vec::with_capacity(member_count);
    for _ in 0..member_count {
        members.push(read_member(cursor)?);
    }

    Ok(StructureDescriptor {
        name,
        comment,
        size_bytes,
        members,
    })
}

/// Decode one member record.
fn read_member(cursor: &mut ByteCursor<'_>) -> Result<MemberDescriptor> {
    Ok(MemberDescriptor {
        name: cursor.read_text("member name")?,
        type_name: cursor.read_text("member type")?,
        comment: cursor.read_text("member comment")?,
        size_bytes: cursor.read_u64("member size")?,
    })
}

/// Bounds-checked little-endian reads over a byte slice.
///
/// Offsets in errors are absolute positions in the file.
struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| SpstError::truncated(field, self.pos))?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| SpstError::truncated(field, self.pos))?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        let bytes = self.take(8, field)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_text(&mut self, field: &'static str) -> Result<String> {
        let start = self.pos;
        let len = self.read_u32(field)? as usize;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SpstError::InvalidText {
            field,
            offset: start,
        })
    }

    /// Reject counts the remaining input cannot possibly hold, before
    /// anything is allocated for them.
    fn checked_count(
        &self,
        count: u32,
        min_record_len: usize,
        field: &'static str,
    ) -> Result<usize> {
        let out_of_range = || SpstError::CountOutOfRange {
            field,
            count: u64::from(count),
            offset: self.pos,
        };
        let needed = (count as usize)
            .checked_mul(min_record_len)
            .ok_or_else(out_of_range)?;
        if needed > self.remaining() {
            return Err(out_of_range());
        }
        Ok(count as usize)
    }
}
