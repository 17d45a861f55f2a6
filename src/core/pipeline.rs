use crate::core::parser::{extract_bug_lines, find_latest_release, group_bugs};
use crate::core::report::{render_group, render_header};
use crate::core::revision::resolve_revision;
use crate::core::{
    ConfigProvider, DocumentSource, Pipeline, ReleaseFile, ReleaseNotes, ReportSink,
    RevisionSearch, ScopeReport, ScopeSummary,
};
use crate::domain::model::RevisionLink;
use crate::utils::error::{Result, ScopeError};

pub struct ScopePipeline<D, R, O, C>
where
    D: DocumentSource,
    R: RevisionSearch,
    O: ReportSink,
    C: ConfigProvider,
{
    source: D,
    search: Option<R>,
    sink: O,
    config: C,
}

impl<D, R, O, C> ScopePipeline<D, R, O, C>
where
    D: DocumentSource,
    R: RevisionSearch,
    O: ReportSink,
    C: ConfigProvider,
{
    /// `search` is `None` in dry-run mode: the report is printed without
    /// review links.
    pub fn new(source: D, search: Option<R>, sink: O, config: C) -> Self {
        Self {
            source,
            search,
            sink,
            config,
        }
    }

    async fn lookup_lines(&self, lines: &[String]) -> Vec<RevisionLink> {
        let Some(search) = &self.search else {
            return Vec::new();
        };

        let mut links = Vec::with_capacity(lines.len());
        for line in lines {
            links.push(resolve_revision(search, line).await);
        }
        links
    }
}

#[async_trait::async_trait]
impl<D, R, O, C> Pipeline for ScopePipeline<D, R, O, C>
where
    D: DocumentSource,
    R: RevisionSearch,
    O: ReportSink,
    C: ConfigProvider,
{
    async fn resolve_release(&self) -> Result<ReleaseFile> {
        if let Some(release) = self.config.release() {
            tracing::debug!("Using configured release {}", release);
            return Ok(release.clone());
        }

        let index_url = self.config.releases_index_url();
        tracing::debug!("Downloading release index from: {}", index_url);
        let index = self.source.fetch_text(index_url).await?;

        find_latest_release(&index)
            .map(ReleaseFile::from_index_entry)
            .ok_or_else(|| ScopeError::ToctreeNotFound {
                url: index_url.to_string(),
            })
    }

    async fn extract(&self, release: ReleaseFile) -> Result<ReleaseNotes> {
        let url = format!("{}{}", self.config.releases_base_url(), release.name());
        tracing::debug!("Downloading release notes from: {}", url);

        // 下載失敗時視為空白內容，由 transform 階段回報
        let text = match self.source.fetch_text(&url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error downloading release notes: {}", e);
                String::new()
            }
        };

        let lines = extract_bug_lines(&text);
        tracing::debug!("Extracted {} lines from {}", lines.len(), release);

        Ok(ReleaseNotes { release, lines })
    }

    async fn transform(&self, notes: ReleaseNotes) -> Result<ScopeReport> {
        if notes.lines.is_empty() {
            return Err(ScopeError::NoBugsFound {
                release: notes.release.title().to_string(),
            });
        }

        let groups = group_bugs(&notes.lines);
        tracing::debug!(
            "Grouped {} lines into {} bugs",
            notes.lines.len(),
            groups.len()
        );

        Ok(ScopeReport {
            release: notes.release,
            groups,
        })
    }

    async fn load(&self, report: ScopeReport) -> Result<ScopeSummary> {
        self.sink.emit(&render_header(&report.release)).await?;

        let mut lines = 0;
        let mut revisions_found = 0;
        let mut lookup_errors = 0;

        // 每個 bug 查完就立即輸出
        for group in &report.groups {
            let links = self.lookup_lines(&group.lines).await;

            lines += group.lines.len();
            for link in &links {
                match link {
                    RevisionLink::Found(_) => revisions_found += 1,
                    RevisionLink::Error(_) => lookup_errors += 1,
                    RevisionLink::NotFound => {}
                }
            }

            let block = render_group(group, &links, self.config.bugzilla_url());
            self.sink.emit(&block).await?;
        }

        Ok(ScopeSummary {
            release: report.release.title().to_string(),
            bugs: report.groups.len(),
            lines,
            revisions_found,
            lookup_errors,
            generated_at: chrono::Utc::now(),
        })
    }
}
