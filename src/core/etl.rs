use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub destination: String,
    pub summary: String,
    pub added: usize,
    pub skipped: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// stdout is reserved for the dconf text, so progress goes through tracing.
    pub async fn run(&self) -> Result<MigrationReport> {
        tracing::debug!("Extracting profiles...");
        let extracted = self.pipeline.extract().await?;
        tracing::debug!(
            "Extracted {} legacy profiles{}",
            extracted.legacy_profiles.len(),
            if extracted.current_dump.is_some() {
                " and the current dconf dump"
            } else {
                ""
            }
        );

        tracing::debug!("Merging profiles...");
        let result = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "{} profiles in result ({} added, {} skipped)",
            result.profile_count,
            result.added,
            result.skipped
        );

        let summary = result.summary.clone();
        let (added, skipped) = (result.added, result.skipped);

        let destination = self.pipeline.load(result).await?;
        tracing::debug!("Output written to: {}", destination);

        Ok(MigrationReport {
            destination,
            summary,
            added,
            skipped,
        })
    }
}
