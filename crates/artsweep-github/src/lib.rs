//! GitHub Actions artifact listing and deletion.
//!
//! The [`ArtifactProvider`] trait is the seam between the cleanup logic and
//! the provider's REST API. [`ArtifactService`] wraps any provider with
//! pagination and structured logging, and the `reqwest` feature supplies
//! [`reqwest::GithubClient`], the HTTP implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use artsweep_github::reqwest::{GithubClient, GithubConfig};
//! use artsweep_github::{BearerToken, Repository};
//!
//! let service = GithubClient::new(GithubConfig::default())?.into_service();
//!
//! let repository = Repository::new("octo-org", "octo-docs")?;
//! let token = BearerToken::new(std::env::var("BEARER_TOKEN")?)?;
//!
//! let artifacts = service.list_artifacts(&repository, &token).await?;
//! for artifact in &artifacts {
//!     service.delete_artifact(&repository, &token, artifact.id).await?;
//! }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod artifact;
mod error;
mod repository;
mod service;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use crate::artifact::{Artifact, ArtifactCollection, ArtifactId, PAGE_SIZE, page_count};
pub use crate::error::{BoxedError, Error, ErrorKind, MAX_ERROR_BODY_CHARS, Result};
pub use crate::repository::{BearerToken, Repository};
pub use crate::service::ArtifactService;

/// Tracing target for artifact service operations.
pub const TRACING_TARGET: &str = "artsweep_github::service";

/// Provider of artifact listing and deletion for a repository.
///
/// Repository coordinates and the credential are passed on every call so
/// implementations hold no per-repository state.
#[async_trait::async_trait]
pub trait ArtifactProvider: Send + Sync {
    /// Fetches a single 1-based page of at most [`PAGE_SIZE`] artifacts.
    async fn fetch_page(
        &self,
        repository: &Repository,
        token: &BearerToken,
        page: u64,
    ) -> Result<ArtifactCollection>;

    /// Deletes one artifact. Succeeds only on `204 No Content`.
    async fn delete_artifact(
        &self,
        repository: &Repository,
        token: &BearerToken,
        artifact_id: ArtifactId,
    ) -> Result<()>;
}
