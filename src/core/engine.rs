use crate::core::{Pipeline, ScopeSummary};
use crate::utils::error::Result;

pub struct ScopeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScopeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ScopeSummary> {
        println!("Finding latest release file...");
        let release = self.pipeline.resolve_release().await?;
        println!("Found: {}\n", release);

        println!("Parsing release notes...");
        let notes = self.pipeline.extract(release).await?;
        let report = self.pipeline.transform(notes).await?;
        println!("Done parsing.\n");

        let summary = self.pipeline.load(report).await?;
        tracing::info!(
            "Reported {} bugs ({} lines, {} revisions found, {} lookup errors)",
            summary.bugs,
            summary.lines,
            summary.revisions_found,
            summary.lookup_errors
        );

        Ok(summary)
    }
}
