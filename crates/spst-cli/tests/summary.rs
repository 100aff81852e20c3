//! Snapshot tests for the structure table.

use spst_cli::summary::structure_table;
use spst_format::{MemberDescriptor, StructureDescriptor};

fn sample() -> Vec<StructureDescriptor> {
    vec![
        StructureDescriptor::new("Point", 8)
            .with_member(MemberDescriptor::new("x", "int32", 4))
            .with_member(MemberDescriptor::new("y", "int32", 4)),
        StructureDescriptor::new("Blob", 4)
            .with_comment("opaque")
            .with_member(MemberDescriptor::undefined("raw", 4)),
    ]
}

#[test]
fn table_with_members_and_total() {
    let mut table = structure_table(&sample(), true);
    table.force_no_tty();
    insta::assert_snapshot!(table.to_string(), @r"
╭───────┬───────────┬──────┬─────────┬─────────╮
│ Name  ┆ Type      ┆ Size ┆ Members ┆ Comment │
╞═══════╪═══════════╪══════╪═════════╪═════════╡
│ Point ┆ struct    ┆    8 ┆       2 ┆         │
│   x   ┆ int32     ┆    4 ┆       - ┆         │
│   y   ┆ int32     ┆    4 ┆       - ┆         │
│ Blob  ┆ struct    ┆    4 ┆       1 ┆ opaque  │
│   raw ┆ undefined ┆    4 ┆       - ┆         │
│ TOTAL ┆ -         ┆   12 ┆       3 ┆ -       │
╰───────┴───────────┴──────┴─────────┴─────────╯
");
}

#[test]
fn table_without_members() {
    let mut table = structure_table(&sample(), false);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("│ Point ┆ struct"));
    assert!(!rendered.contains("raw"));
    assert!(rendered.contains("│ TOTAL ┆"));
}
