use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Name of a release-notes document, e.g. `nss_3_116.rst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFile {
    name: String,
}

impl ReleaseFile {
    pub fn from_index_entry(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        self.name.strip_suffix(".rst").unwrap_or(&self.name)
    }
}

impl fmt::Display for ReleaseFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    pub release: ReleaseFile,
    pub lines: Vec<String>,
}

/// All release-note lines that mention one bug, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugGroup {
    /// Digits as written in the notes, e.g. `1983308`.
    pub id: String,
    pub lines: Vec<String>,
}

impl BugGroup {
    pub fn is_multi(&self) -> bool {
        self.lines.len() > 1
    }
}

#[derive(Debug, Clone)]
pub struct ScopeReport {
    pub release: ReleaseFile,
    pub groups: Vec<BugGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionLink {
    Found(String),
    NotFound,
    Error(String),
}

impl fmt::Display for RevisionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionLink::Found(uri) => f.write_str(uri),
            RevisionLink::NotFound => f.write_str("No Phabricator revision found."),
            RevisionLink::Error(message) => write!(f, "Phabricator API Error: {}", message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeSummary {
    pub release: String,
    pub bugs: usize,
    pub lines: usize,
    pub revisions_found: usize,
    pub lookup_errors: usize,
    pub generated_at: DateTime<Utc>,
}
