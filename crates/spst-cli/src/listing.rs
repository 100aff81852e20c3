//! Plain-text rendering of snapshot contents.

use std::fmt::Write;

use spst_format::{MemberDescriptor, StructureDescriptor};

/// Render `structures` as one line per structure, optionally followed by an
/// indented line per member.
#[must_use]
pub fn render_listing(structures: &[StructureDescriptor], show_members: bool) -> String {
    if structures.is_empty() {
        return "(no structures)\n".to_string();
    }

    let mut out = String::new();
    for structure in structures {
        let members = structure.num_members();
        let noun = if members == 1 { "member" } else { "members" };
        let _ = write!(
            out,
            "{} [{} bytes] {members} {noun}",
            structure.name, structure.size_bytes
        );
        push_comment(&mut out, &structure.comment);
        if show_members {
            for member in &structure.members {
                out.push_str(&member_line(member));
            }
        }
    }
    out
}

fn member_line(member: &MemberDescriptor) -> String {
    let mut line = format!(
        "  {}: {} [{} bytes]",
        member.name, member.type_name, member.size_bytes
    );
    push_comment(&mut line, &member.comment);
    line
}

fn push_comment(out: &mut String, comment: &str) {
    if !comment.is_empty() {
        let _ = write!(out, " // {comment}");
    }
    out.push('\n');
}
