//! Artifact service wrapper with pagination and observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    ArtifactCollection, ArtifactId, ArtifactProvider, BearerToken, PAGE_SIZE, Repository, Result,
    TRACING_TARGET, page_count,
};

/// Artifact service wrapper.
///
/// Aggregates paginated listings and adds structured logging to any
/// [`ArtifactProvider`]. The provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct ArtifactService {
    inner: Arc<dyn ArtifactProvider>,
}

impl fmt::Debug for ArtifactService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactService").finish_non_exhaustive()
    }
}

impl ArtifactService {
    /// Create a new artifact service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: ArtifactProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Fetches a single page of the listing.
    pub async fn fetch_page(
        &self,
        repository: &Repository,
        token: &BearerToken,
        page: u64,
    ) -> Result<ArtifactCollection> {
        tracing::debug!(
            target: TRACING_TARGET,
            repository = %repository,
            page,
            per_page = PAGE_SIZE,
            "Fetching artifact page"
        );

        self.inner
            .fetch_page(repository, token, page)
            .await
            .map_err(|error| error.on_page(page))
    }

    /// Lists every artifact of the repository.
    ///
    /// Page 1 is fetched first to learn the total count; the remaining pages
    /// are then fetched one after another. The first failing page aborts the
    /// listing and its error is returned with the page number attached.
    pub async fn list_artifacts(
        &self,
        repository: &Repository,
        token: &BearerToken,
    ) -> Result<ArtifactCollection> {
        let started_at = Instant::now();
        let first_page = self.fetch_page(repository, token, 1).await?;

        if first_page.total_count <= PAGE_SIZE {
            tracing::debug!(
                target: TRACING_TARGET,
                repository = %repository,
                total_count = first_page.total_count,
                retrieved = first_page.len(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "Artifact listing fit in a single page"
            );
            return Ok(first_page);
        }

        let total_pages = page_count(first_page.total_count);
        let mut collection = ArtifactCollection::with_total(first_page.total_count);
        collection.extend_from_page(first_page);

        for page in 2..=total_pages {
            tracing::info!(
                target: TRACING_TARGET,
                repository = %repository,
                "Fetching page {page} of {total_pages}..."
            );

            let next = self.fetch_page(repository, token, page).await?;
            collection.extend_from_page(next);
        }

        if !collection.is_complete() {
            tracing::warn!(
                target: TRACING_TARGET,
                repository = %repository,
                total_count = collection.total_count,
                retrieved = collection.len(),
                "Provider count changed while paginating"
            );
        }

        tracing::debug!(
            target: TRACING_TARGET,
            repository = %repository,
            total_count = collection.total_count,
            retrieved = collection.len(),
            pages = total_pages,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Artifact listing completed"
        );

        Ok(collection)
    }

    /// Deletes a single artifact.
    pub async fn delete_artifact(
        &self,
        repository: &Repository,
        token: &BearerToken,
        artifact_id: ArtifactId,
    ) -> Result<()> {
        let started_at = Instant::now();

        let result = self
            .inner
            .delete_artifact(repository, token, artifact_id)
            .await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    repository = %repository,
                    artifact_id = %artifact_id,
                    elapsed_ms = elapsed.as_millis(),
                    "Artifact deleted"
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    repository = %repository,
                    artifact_id = %artifact_id,
                    error_kind = %error.kind(),
                    status = ?error.status(),
                    elapsed_ms = elapsed.as_millis(),
                    "Artifact deletion failed"
                );
            }
        }

        result
    }
}
