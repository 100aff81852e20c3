//! Capture and restore between a structure database and snapshot files.

use std::path::{Path, PathBuf};

use spst_format::{
    MemberDescriptor, SpstReaderOptions, SpstWriterOptions, StructureDescriptor, UNDEFINED_TYPE,
    WriteSummary, read_spst_with_options, write_spst_with_options,
};
use tracing::{debug, info, info_span, trace};

use crate::database::StructureDatabase;
use crate::error::Result;

/// Outcome of writing a database to a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub summary: WriteSummary,
}

/// Outcome of loading a snapshot file into a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub path: PathBuf,
    pub structures: usize,
    pub members: usize,
}

/// Read every structure and its members from `db`.
///
/// Structures keep database order and members keep offset order. Members
/// whose type cannot be resolved get the `"undefined"` type name.
pub fn capture_structures(db: &dyn StructureDatabase) -> Result<Vec<StructureDescriptor>> {
    let handles = db.list_structures();
    let mut structures = Vec::with_capacity(handles.len());

    for (index, handle) in handles.into_iter().enumerate() {
        let info = db.describe_structure(handle)?;
        debug!(
            index,
            name = %info.name,
            comment = %info.comment,
            size_bytes = info.size_bytes,
            "captured structure"
        );

        let member_handles = db.list_members(handle)?;
        let mut members = Vec::with_capacity(member_handles.len());
        for member_handle in member_handles {
            let member = db.describe_member(member_handle)?;
            let type_name = member
                .type_name
                .unwrap_or_else(|| UNDEFINED_TYPE.to_string());
            trace!(
                structure = %info.name,
                name = %member.name,
                type_name = %type_name,
                comment = %member.comment,
                size_bytes = member.size_bytes,
                "captured member"
            );
            members.push(MemberDescriptor {
                name: member.name,
                type_name,
                comment: member.comment,
                size_bytes: member.size_bytes,
            });
        }

        let descriptor = StructureDescriptor {
            name: info.name,
            comment: info.comment,
            size_bytes: info.size_bytes,
            members,
        };
        if descriptor.member_size_total() != descriptor.size_bytes {
            debug!(
                name = %descriptor.name,
                size_bytes = descriptor.size_bytes,
                member_total = descriptor.member_size_total(),
                "member sizes do not add up to structure size"
            );
        }
        structures.push(descriptor);
    }

    Ok(structures)
}

/// Capture `db` and write it to `path`.
///
/// An empty database still produces a valid snapshot; the report carries an
/// empty-input warning.
pub fn export_structures(
    db: &dyn StructureDatabase,
    path: &Path,
    options: &SpstWriterOptions,
) -> Result<ExportReport> {
    let span = info_span!("export", path = %path.display());
    let _guard = span.enter();

    let structures = capture_structures(db)?;
    let summary = write_spst_with_options(path, &structures, options)?;
    info!(
        structures = summary.structures,
        members = summary.members,
        bytes = summary.bytes,
        "exported structures"
    );

    Ok(ExportReport {
        path: path.to_path_buf(),
        summary,
    })
}

/// Read the snapshot at `path` and replace every structure in `db` with it.
///
/// The file is decoded completely before the database is touched; a read or
/// decode failure leaves `db` as it was.
pub fn import_structures(
    db: &mut dyn StructureDatabase,
    path: &Path,
    options: &SpstReaderOptions,
) -> Result<ImportReport> {
    let span = info_span!("import", path = %path.display());
    let _guard = span.enter();

    let structures = read_spst_with_options(path, options.clone())?;
    let report = ImportReport {
        path: path.to_path_buf(),
        structures: structures.len(),
        members: structures.iter().map(StructureDescriptor::num_members).sum(),
    };

    db.replace_structures(structures)?;
    info!(
        structures = report.structures,
        members = report.members,
        "imported structures"
    );

    Ok(report)
}
