//! Filesystem tests for snapshot reading and writing.

use std::fs;

use spst_format::{
    ErrorKind, MemberDescriptor, SpstError, SpstWriterOptions, StructureDescriptor, Warning,
    read_spst, write_file_atomic, write_spst, write_spst_with_options,
};
use tempfile::TempDir;

fn sample() -> Vec<StructureDescriptor> {
    vec![
        StructureDescriptor::new("Point", 8)
            .with_member(MemberDescriptor::new("x", "int32", 4))
            .with_member(MemberDescriptor::new("y", "int32", 4)),
        StructureDescriptor::new("Header", 6)
            .with_comment("file header")
            .with_member(MemberDescriptor::new("magic", "char[4]", 4).with_comment("ASCII"))
            .with_member(MemberDescriptor::undefined("field_4", 2)),
    ]
}

#[test]
fn writes_and_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("structs.spst");

    let summary = write_spst(&path, &sample()).expect("write snapshot");
    assert_eq!(summary.structures, 2);
    assert_eq!(summary.members, 4);
    assert_eq!(summary.bytes, fs::metadata(&path).unwrap().len());

    let restored = read_spst(&path).expect("read back");
    assert_eq!(restored, sample());
}

#[test]
fn two_captures_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.spst");
    let second = dir.path().join("second.spst");

    write_spst(&first, &sample()).unwrap();
    write_spst(&second, &sample()).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn empty_input_writes_valid_file_and_warns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.spst");

    let summary = write_spst(&path, &[]).unwrap();
    assert_eq!(summary.warnings, vec![Warning::EmptyInput]);
    assert!(path.exists());

    assert!(read_spst(&path).unwrap().is_empty());
}

#[test]
fn overwrite_replaces_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("structs.spst");

    write_spst(&path, &sample()).unwrap();
    let smaller = vec![StructureDescriptor::new("Only", 1)];
    write_spst_with_options(&path, &smaller, &SpstWriterOptions::new().with_sync(false)).unwrap();

    assert_eq!(read_spst(&path).unwrap(), smaller);
    assert!(!dir.path().join(".structs.spst.tmp").exists());
}

#[test]
fn failed_overwrite_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("structs.spst");
    let kept = vec![StructureDescriptor::new("Keep", 4)];
    write_spst(&path, &kept).unwrap();

    // A directory squatting on the temporary name makes the write fail.
    let blocker = dir.path().join(".structs.spst.tmp");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("occupied"), b"x").unwrap();

    let err = write_spst(&path, &sample()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(read_spst(&path).unwrap(), kept);
}

#[test]
fn atomic_file_write_replaces_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, b"old").unwrap();

    write_file_atomic(&path, b"new content", true).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new content");
    assert!(!dir.path().join(".db.json.tmp").exists());
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.spst");

    let err = read_spst(&path).unwrap_err();
    assert!(matches!(err, SpstError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn unwritable_destination_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("structs.spst");

    let err = write_spst(&path, &sample()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!path.exists());
}

#[test]
fn truncated_member_count_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("truncated.spst");
    write_spst(&path, &sample()[..1]).unwrap();

    // Header (16) + name (4 + 5) + comment (4) + size (8) + half the member count.
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..16 + 9 + 4 + 8 + 2]).unwrap();

    let err = read_spst(&path).unwrap_err();
    assert!(matches!(
        err,
        SpstError::Truncated {
            field: "member count",
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn foreign_file_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.spst");
    fs::write(&path, "Point x y\n").unwrap();

    let err = read_spst(&path).unwrap_err();
    assert!(matches!(err, SpstError::BadMagic));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn corrupted_body_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.spst");
    write_spst(&path, &sample()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    // Last byte belongs to the final member size.
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    fs::write(&path, &bytes).unwrap();

    let err = read_spst(&path).unwrap_err();
    assert!(matches!(err, SpstError::ChecksumMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Format);
}
