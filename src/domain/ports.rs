use crate::domain::model::{ReleaseFile, ReleaseNotes, ScopeReport, ScopeSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetches a remote text document.
pub trait DocumentSource: Send + Sync {
    fn fetch_text(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// A single phrase query against the code-review service.
pub trait RevisionSearch: Send + Sync {
    /// Returns the uri of the first matching revision, if any.
    fn find_revision(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

pub trait ReportSink: Send + Sync {
    fn emit(&self, text: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn release(&self) -> Option<&ReleaseFile>;
    fn releases_index_url(&self) -> &str;
    fn releases_base_url(&self) -> &str;
    fn bugzilla_url(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn resolve_release(&self) -> Result<ReleaseFile>;
    async fn extract(&self, release: ReleaseFile) -> Result<ReleaseNotes>;
    async fn transform(&self, notes: ReleaseNotes) -> Result<ScopeReport>;
    async fn load(&self, report: ScopeReport) -> Result<ScopeSummary>;
}
