use crate::domain::model::{BugGroup, ReleaseFile, RevisionLink};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn banner() -> String {
    format!("{rule}\n\n    NSS scoping prepper\n\n{rule}\n\n", rule = rule())
}

pub fn render_header(release: &ReleaseFile) -> String {
    format!("{}\n{}\n\n", rule(), release.title())
}

/// Renders one bug group. `links` holds one entry per line, or none at all
/// when lookups were skipped.
pub fn render_group(group: &BugGroup, links: &[RevisionLink], bugzilla_url: &str) -> String {
    let bug_url = format!("{}{}", bugzilla_url, group.id);
    let mut out = String::new();

    if group.is_multi() {
        out.push_str("---\n");
        out.push_str(&format!("Bug {} - {}\n", group.id, bug_url));
        for (i, line) in group.lines.iter().enumerate() {
            out.push_str(&format!("\n{}\n", line));
            if let Some(link) = links.get(i) {
                out.push_str(&format!("\t{}\n", link));
            }
        }
        out.push_str("---\n");
    } else {
        if let Some(line) = group.lines.first() {
            out.push_str(&format!("{}\n", line));
        }
        out.push_str(&format!("\t{}\n", bug_url));
        for link in links {
            out.push_str(&format!("\t{}\n", link));
        }
    }

    out.push('\n');
    out
}
