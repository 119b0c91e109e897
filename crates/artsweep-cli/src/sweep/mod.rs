//! Deletion of artifacts that fall outside the retention window.

mod policy;

use artsweep_github::{
    Artifact, ArtifactCollection, ArtifactId, ArtifactService, BearerToken, Error, Repository,
};
use jiff::Timestamp;
pub use policy::{Partition, RetentionPolicy};

use crate::TRACING_TARGET_SWEEP;

/// Whether expired artifacts are actually deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Issue a delete request for every expired artifact.
    Delete,
    /// Only report what would be deleted.
    DryRun,
}

/// A deletion the provider refused.
#[derive(Debug)]
pub struct FailedDeletion {
    pub artifact_id: ArtifactId,
    pub name: String,
    pub error: Error,
}

/// Outcome of a sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Expired artifacts the provider confirmed as deleted.
    pub deleted: usize,
    /// Artifacts inside the retention window.
    pub kept: usize,
    /// Expired artifacts left alone because of a dry run.
    pub would_delete: usize,
    /// Expired artifacts whose deletion failed.
    pub failed: Vec<FailedDeletion>,
}

impl SweepReport {
    /// Number of artifacts that were routed to deletion.
    pub fn expired(&self) -> usize {
        self.deleted + self.would_delete + self.failed.len()
    }

    /// Returns `true` if any deletion failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Deletes every artifact created before `cutoff`, one request at a time.
///
/// A failed deletion is logged and recorded, and the loop moves on to the
/// next artifact.
pub async fn sweep_artifacts(
    service: &ArtifactService,
    repository: &Repository,
    token: &BearerToken,
    artifacts: &ArtifactCollection,
    cutoff: Timestamp,
    mode: SweepMode,
) -> SweepReport {
    let Partition { expired, kept } = RetentionPolicy::partition(cutoff, artifacts);
    let mut report = SweepReport {
        kept: kept.len(),
        ..SweepReport::default()
    };

    tracing::debug!(
        target: TRACING_TARGET_SWEEP,
        repository = %repository,
        cutoff = %cutoff,
        expired = expired.len(),
        kept = report.kept,
        "Artifacts partitioned"
    );

    for artifact in expired {
        if artifact.created_at.is_none() {
            tracing::warn!(
                target: TRACING_TARGET_SWEEP,
                artifact_id = %artifact.id,
                "Artifact {} has no creation time, treating it as expired",
                artifact.name
            );
        }

        if mode == SweepMode::DryRun {
            tracing::info!(
                target: TRACING_TARGET_SWEEP,
                "Would delete artifact: {} (ID: {}, Created: {})",
                artifact.name,
                artifact.id,
                created_date(artifact)
            );
            report.would_delete += 1;
            continue;
        }

        tracing::info!(
            target: TRACING_TARGET_SWEEP,
            "Deleting artifact: {} (ID: {}, Created: {})",
            artifact.name,
            artifact.id,
            created_date(artifact)
        );

        match service
            .delete_artifact(repository, token, artifact.id)
            .await
        {
            Ok(()) => report.deleted += 1,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_SWEEP,
                    artifact_id = %artifact.id,
                    error = %error.chain(),
                    "Failed to delete artifact {}",
                    artifact.id
                );
                report.failed.push(FailedDeletion {
                    artifact_id: artifact.id,
                    name: artifact.name.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Formats the creation date of an artifact as `YYYY-MM-DD` in UTC.
///
/// Returns `unknown` when the provider did not report a creation time.
pub fn created_date(artifact: &Artifact) -> String {
    artifact
        .created_at
        .map(|created_at| created_at.strftime("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}
