//! Snapshot file writer.
//!
//! Provides functionality to write structure snapshot files.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SpstError};
use crate::header::{HEADER_LEN, SnapshotHeader};
use crate::types::{
    MemberDescriptor, SpstWriterOptions, StructureDescriptor, Warning, WriteSummary,
};

/// Snapshot writer.
///
/// Encodes the whole snapshot in memory, then writes header and body in one
/// pass. Use [`write_spst`] to write files; it never exposes a partial file.
pub struct SpstWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> SpstWriter<W> {
    /// Create a new snapshot writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write every structure to the underlying writer.
    pub fn write_snapshot(mut self, structures: &[StructureDescriptor]) -> Result<WriteSummary> {
        let bytes = encode_snapshot(structures)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(summarize(structures, bytes.len()))
    }
}

/// Write structures to a snapshot file.
///
/// The destination is replaced atomically: either the complete new snapshot
/// is visible at `path` or the previous content is left untouched.
pub fn write_spst(path: &Path, structures: &[StructureDescriptor]) -> Result<WriteSummary> {
    write_spst_with_options(path, structures, &SpstWriterOptions::default())
}

/// Write structures to a snapshot file with options.
pub fn write_spst_with_options(
    path: &Path,
    structures: &[StructureDescriptor],
    options: &SpstWriterOptions,
) -> Result<WriteSummary> {
    let bytes = encode_snapshot(structures)?;
    write_file_atomic(path, &bytes, options.sync)?;

    let summary = summarize(structures, bytes.len());
    debug!(
        path = %path.display(),
        structures = summary.structures,
        members = summary.members,
        bytes = summary.bytes,
        "snapshot written"
    );
    Ok(summary)
}

/// Encode a complete snapshot (header and body) into bytes.
///
/// The output depends only on the input, so equal inputs give byte-identical
/// files.
pub fn encode_snapshot(structures: &[StructureDescriptor]) -> Result<Vec<u8>> {
    let structure_count = encode_count(structures.len(), "structure count")?;

    let mut body = Vec::new();
    for structure in structures {
        encode_structure(&mut body, structure)?;
    }

    let header = SnapshotHeader::for_body(structure_count, &body);
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

fn encode_structure(out: &mut Vec<u8>, structure: &StructureDescriptor) -> Result<()> {
    encode_text(out, &structure.name, "structure name")?;
    encode_text(out, &structure.comment, "structure comment")?;
    out.extend_from_slice(&structure.size_bytes.to_le_bytes());
    let member_count = encode_count(structure.members.len(), "member count")?;
    out.extend_from_slice(&member_count.to_le_bytes());
    for member in &structure.members {
        encode_member(out, member)?;
    }
    Ok(())
}

fn encode_member(out: &mut Vec<u8>, member: &MemberDescriptor) -> Result<()> {
    encode_text(out, &member.name, "member name")?;
    encode_text(out, &member.type_name, "member type")?;
    encode_text(out, &member.comment, "member comment")?;
    out.extend_from_slice(&member.size_bytes.to_le_bytes());
    Ok(())
}

/// Encode a length-prefixed UTF-8 text field.
fn encode_text(out: &mut Vec<u8>, value: &str, field: &'static str) -> Result<()> {
    let len = encode_count(value.len(), field)?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

fn encode_count(len: usize, field: &'static str) -> Result<u32> {
    u32::try_from(len).map_err(|_| SpstError::TooLarge { field, len })
}

fn summarize(structures: &[StructureDescriptor], bytes: usize) -> WriteSummary {
    let mut warnings = Vec::new();
    if structures.is_empty() {
        warn!("{}", Warning::EmptyInput);
        warnings.push(Warning::EmptyInput);
    }
    WriteSummary {
        structures: structures.len(),
        members: structures.iter().map(StructureDescriptor::num_members).sum(),
        bytes: bytes as u64,
        warnings,
    }
}

/// Sibling temporary path used while writing `path`: `.<name>.tmp`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| SpstError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Replace `path` with `bytes` atomically.
///
/// Bytes go to a sibling temporary file that is renamed over `path`. With
/// `sync`, the file is fsynced before the rename and the parent directory
/// after it. The temporary file is removed when any step fails, and `path`
/// keeps its previous content.
pub fn write_file_atomic(path: &Path, bytes: &[u8], sync: bool) -> Result<()> {
    let temp_path = temp_path_for(path)?;
    let result = write_and_rename(&temp_path, path, bytes, sync);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8], sync: bool) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(temp_path)?;
    file.write_all(bytes)?;
    file.flush()?;
    if sync {
        file.sync_all()?;
    }
    drop(file);
    fs::rename(temp_path, path)?;
    if sync {
        sync_parent_dir(path)?;
    }
    Ok(())
}

/// Make the rename durable.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent)?.sync_all()?;
    Ok(())
}

/// Directories cannot be opened for fsync here; the rename is left to the OS.
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}
