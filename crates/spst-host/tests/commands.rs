//! Integration tests for the plugin commands against a scripted host.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use spst_format::{
    ErrorKind, MemberDescriptor, SpstError, SpstReaderOptions, SpstWriterOptions,
    StructureDescriptor, Warning, read_spst,
};
use spst_host::{
    CommandId, HostError, HostUi, MemoryDatabase, Outcome, PathMode, Plugin, StoredMember,
    StoredStructure, capture_structures,
};
use tempfile::TempDir;

/// Host UI that answers dialogs from a queue and records everything else.
#[derive(Default)]
struct ScriptedUi {
    answers: VecDeque<Option<PathBuf>>,
    prompts: Vec<(PathMode, String)>,
    registered: Vec<(String, String, CommandId)>,
    messages: Vec<String>,
}

impl ScriptedUi {
    fn answering(path: Option<PathBuf>) -> Self {
        Self {
            answers: VecDeque::from([path]),
            ..Self::default()
        }
    }
}

impl HostUi for ScriptedUi {
    fn prompt_for_path(&mut self, mode: PathMode, filter: &str, _prompt: &str) -> Option<PathBuf> {
        self.prompts.push((mode, filter.to_string()));
        self.answers.pop_front().flatten()
    }

    fn register_command(&mut self, menu_path: &str, label: &str, command: CommandId) {
        self.registered
            .push((menu_path.to_string(), label.to_string(), command));
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

fn point_db() -> MemoryDatabase {
    MemoryDatabase::from_descriptors(vec![
        StructureDescriptor::new("Point", 8)
            .with_member(MemberDescriptor::new("x", "int32", 4))
            .with_member(MemberDescriptor::new("y", "int32", 4)),
        StructureDescriptor::new("Node", 16)
            .with_comment("linked list node")
            .with_member(MemberDescriptor::new("next", "Node*", 8).with_comment("may be null"))
            .with_member(MemberDescriptor::undefined("payload", 8)),
    ])
    .unwrap()
}

#[test]
fn init_registers_both_menu_commands() {
    let mut ui = ScriptedUi::default();
    Plugin::new().init(&mut ui);

    assert_eq!(
        ui.registered,
        vec![
            (
                "File/Load file/".to_string(),
                "SymbolParser struct info".to_string(),
                CommandId::LoadFile
            ),
            (
                "File/Produce file/".to_string(),
                "SymbolParser struct info".to_string(),
                CommandId::ProduceFile
            ),
        ]
    );
}

#[test]
fn produce_then_load_restores_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("structs.spst");
    let plugin = Plugin::new();

    let mut source = point_db();
    let mut ui = ScriptedUi::answering(Some(path.clone()));
    let outcome = plugin
        .invoke(CommandId::ProduceFile, &mut source, &mut ui)
        .unwrap();
    assert!(matches!(outcome, Outcome::Exported(ref report) if report.summary.structures == 2));
    assert_eq!(ui.prompts, vec![(PathMode::Save, "*.spst".to_string())]);
    assert!(ui.messages[0].contains("exported 2 structures (4 members)"));

    let mut target = MemoryDatabase::new();
    let mut ui = ScriptedUi::answering(Some(path));
    let outcome = plugin
        .invoke(CommandId::LoadFile, &mut target, &mut ui)
        .unwrap();
    assert!(matches!(outcome, Outcome::Imported(ref report) if report.members == 4));
    assert_eq!(ui.prompts, vec![(PathMode::Open, "*.spst".to_string())]);

    assert_eq!(
        capture_structures(&target).unwrap(),
        capture_structures(&source).unwrap()
    );
}

#[test]
fn default_run_produces_a_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("default.spst");

    let mut db = point_db();
    let mut ui = ScriptedUi::answering(Some(path.clone()));
    let outcome = Plugin::new().run(&mut db, &mut ui).unwrap();

    assert!(matches!(outcome, Outcome::Exported(_)));
    assert_eq!(read_spst(&path).unwrap().len(), 2);
}

#[test]
fn cancelled_dialog_does_nothing() {
    let mut db = point_db();
    let before = db.clone();
    let mut ui = ScriptedUi::answering(None);

    let outcome = Plugin::new()
        .invoke(CommandId::LoadFile, &mut db, &mut ui)
        .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(db, before);
    assert!(ui.messages.is_empty());
}

#[test]
fn load_from_missing_path_leaves_database_untouched() {
    let dir = TempDir::new().unwrap();
    let mut db = point_db();
    let before = db.clone();
    let mut ui = ScriptedUi::answering(Some(dir.path().join("missing.spst")));

    let err = Plugin::new()
        .invoke(CommandId::LoadFile, &mut db, &mut ui)
        .unwrap_err();

    assert_eq!(err.snapshot_kind(), Some(ErrorKind::Io));
    assert_eq!(db, before);
    assert!(ui.messages[0].contains("load failed"));
}

#[test]
fn load_from_corrupt_file_leaves_database_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.spst");
    fs::write(&path, b"SPST\x01\x00\x00\x00\x05\x00\x00\x00\x00\x00\x00\x00").unwrap();

    let mut db = point_db();
    let before = db.clone();
    let mut ui = ScriptedUi::answering(Some(path));

    let err = Plugin::new()
        .invoke(CommandId::LoadFile, &mut db, &mut ui)
        .unwrap_err();

    assert_eq!(err.snapshot_kind(), Some(ErrorKind::Format));
    assert_eq!(db, before);
}

#[test]
fn rejected_snapshot_leaves_database_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.spst");
    spst_format::write_spst(
        &path,
        &[
            StructureDescriptor::new("Twin", 1),
            StructureDescriptor::new("Twin", 2),
        ],
    )
    .unwrap();

    let mut db = point_db();
    let before = db.clone();
    let mut ui = ScriptedUi::answering(Some(path));

    let err = Plugin::new()
        .invoke(CommandId::LoadFile, &mut db, &mut ui)
        .unwrap_err();

    assert!(matches!(err, HostError::Rejected { .. }));
    assert_eq!(db, before);
}

#[test]
fn exporting_empty_database_warns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.spst");
    let mut db = MemoryDatabase::new();
    let mut ui = ScriptedUi::answering(Some(path.clone()));

    let outcome = Plugin::new()
        .invoke(CommandId::ProduceFile, &mut db, &mut ui)
        .unwrap();

    let Outcome::Exported(report) = outcome else {
        panic!("expected export, got {outcome:?}");
    };
    assert_eq!(report.summary.warnings, vec![Warning::EmptyInput]);
    assert!(ui.messages[0].contains("warning"));
    assert!(read_spst(&path).unwrap().is_empty());
}

#[test]
fn capture_walks_members_by_offset_and_marks_unknown_types() {
    let db = MemoryDatabase::from_structures(vec![StoredStructure {
        name: "Header".to_string(),
        comment: "file header".to_string(),
        size_bytes: 8,
        members: vec![
            StoredMember {
                offset: 4,
                name: "length".to_string(),
                type_name: None,
                comment: String::new(),
                size_bytes: 4,
            },
            StoredMember {
                offset: 0,
                name: "magic".to_string(),
                type_name: Some("char[4]".to_string()),
                comment: "ASCII".to_string(),
                size_bytes: 4,
            },
        ],
    }])
    .unwrap();

    let captured = capture_structures(&db).unwrap();

    assert_eq!(
        captured,
        vec![
            StructureDescriptor::new("Header", 8)
                .with_comment("file header")
                .with_member(MemberDescriptor::new("magic", "char[4]", 4).with_comment("ASCII"))
                .with_member(MemberDescriptor::undefined("length", 4)),
        ]
    );
}

#[test]
fn plugin_options_reach_the_file_layer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stale-crc.spst");

    let mut source = point_db();
    let writer = Plugin::new().with_writer_options(SpstWriterOptions::new().with_sync(false));
    writer
        .run(&mut source, &mut ScriptedUi::answering(Some(path.clone())))
        .unwrap();

    // Damage the stored checksum only; the records stay decodable.
    let mut bytes = fs::read(&path).unwrap();
    bytes[12] ^= 0xff;
    fs::write(&path, bytes).unwrap();

    let mut strict_db = MemoryDatabase::new();
    let err = Plugin::new()
        .invoke(
            CommandId::LoadFile,
            &mut strict_db,
            &mut ScriptedUi::answering(Some(path.clone())),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        HostError::Snapshot(SpstError::ChecksumMismatch { .. })
    ));
    assert!(strict_db.is_empty());

    let lenient = Plugin::new().with_reader_options(SpstReaderOptions::new().without_checksum());
    let mut target = MemoryDatabase::new();
    lenient
        .invoke(
            CommandId::LoadFile,
            &mut target,
            &mut ScriptedUi::answering(Some(path)),
        )
        .unwrap();
    assert_eq!(
        capture_structures(&target).unwrap(),
        capture_structures(&source).unwrap()
    );
}
