pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod release;
pub mod report;
pub mod revision;

pub use crate::domain::model::{
    BugGroup, ReleaseFile, ReleaseNotes, RevisionLink, ScopeReport, ScopeSummary,
};
pub use crate::domain::ports::{ConfigProvider, DocumentSource, Pipeline, ReportSink, RevisionSearch};
pub use crate::utils::error::Result;
