//! Terminal summaries and the structure table.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use spst_format::{StructureDescriptor, Warning};
use spst_host::{ExportReport, ImportReport};

pub fn print_export(report: &ExportReport) {
    println!(
        "Exported {} structures ({} members, {} bytes) to {}",
        report.summary.structures,
        report.summary.members,
        report.summary.bytes,
        report.path.display()
    );
    print_warnings(&report.summary.warnings);
}

pub fn print_import(report: &ImportReport, database: &Path) {
    println!(
        "Loaded {} structures ({} members) from {} into {}",
        report.structures,
        report.members,
        report.path.display(),
        database.display()
    );
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

/// Table of structures, with member rows nested under their owner.
pub fn structure_table(structures: &[StructureDescriptor], show_members: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Size"),
        header_cell("Members"),
        header_cell("Comment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_members = 0usize;
    let mut total_bytes = 0u64;
    for structure in structures {
        total_members += structure.num_members();
        total_bytes = total_bytes.saturating_add(structure.size_bytes);
        table.add_row(vec![
            Cell::new(&structure.name).add_attribute(Attribute::Bold),
            dim_cell("struct"),
            Cell::new(structure.size_bytes),
            Cell::new(structure.num_members()),
            Cell::new(&structure.comment),
        ]);
        if show_members {
            for member in &structure.members {
                let type_cell = if member.is_undefined() {
                    Cell::new(&member.type_name).fg(Color::Yellow)
                } else {
                    Cell::new(&member.type_name)
                };
                table.add_row(vec![
                    Cell::new(format!("  {}", member.name)),
                    type_cell,
                    Cell::new(member.size_bytes),
                    dim_cell("-"),
                    Cell::new(&member.comment),
                ]);
            }
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_bytes).add_attribute(Attribute::Bold),
        Cell::new(total_members).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
