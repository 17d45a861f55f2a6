//! Line-oriented scanning of the NSS reStructuredText release documents.

use crate::domain::model::BugGroup;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const TOCTREE_MARKER: &str = ".. toctree::";
const CHANGES_MARKER: &str = "`Changes in NSS";
const CONTAINER_MARKER: &str = ".. container::";

static BUG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bug\s+([0-9]+)").expect("bug id pattern is valid"));

/// Returns the first entry of the releases index toctree.
///
/// Toctree options (`:maxdepth:` and friends) and blank lines are skipped.
pub fn find_latest_release(index: &str) -> Option<String> {
    let mut in_toctree = false;

    for line in index.lines() {
        if line.contains(TOCTREE_MARKER) {
            in_toctree = true;
            continue;
        }
        if in_toctree {
            let entry = line.trim();
            if !entry.is_empty() && !entry.starts_with(':') {
                return Some(entry.to_string());
            }
        }
    }

    None
}

/// Collects the trimmed lines of the `.. container::` block that follows the
/// "Changes in NSS" heading. The block ends at the first unindented line.
pub fn extract_bug_lines(notes: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_changes = false;
    let mut in_container = false;

    for line in notes.lines() {
        if line.contains(CHANGES_MARKER) {
            in_changes = true;
            continue;
        }

        if in_changes && line.contains(CONTAINER_MARKER) {
            in_container = true;
            continue;
        }

        if in_container {
            if !line.is_empty() && !line.starts_with(' ') {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
    }

    lines
}

/// Groups lines by the bug id text they reference (`Bug 007` and `Bug 7`
/// stay apart), sorted by numeric value. Ids of equal value keep the order
/// in which they first appear.
pub fn group_bugs<S: AsRef<str>>(lines: &[S]) -> Vec<BugGroup> {
    let mut groups: Vec<BugGroup> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for line in lines {
        let clean = line
            .as_ref()
            .trim()
            .trim_start_matches(|c: char| c == '-' || c == ' ');

        let Some(caps) = BUG_ID.captures(clean) else {
            tracing::debug!("No bug reference in line: {}", clean);
            continue;
        };

        let id = &caps[1];
        let idx = *index_of.entry(id.to_string()).or_insert_with(|| {
            groups.push(BugGroup {
                id: id.to_string(),
                lines: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].lines.push(clean.to_string());
    }

    groups.sort_by(|a, b| numeric_key(&a.id).cmp(&numeric_key(&b.id)));
    groups
}

/// Orders ASCII digit strings by value without parsing, so ids of any
/// length compare correctly.
fn numeric_key(id: &str) -> (usize, &str) {
    let significant = id.trim_start_matches('0');
    (significant.len(), significant)
}
