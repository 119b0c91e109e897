//! Reqwest-based HTTP client for the GitHub Actions artifacts API.

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use super::{GithubConfig, TRACING_TARGET};
use crate::{
    ArtifactCollection, ArtifactId, ArtifactProvider, ArtifactService, BearerToken, Error,
    PAGE_SIZE, Repository, Result,
};

/// Media type requested from the GitHub REST API.
pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Inner client that holds the HTTP client and configuration.
struct GithubClientInner {
    http: Client,
    base_url: Url,
    config: GithubConfig,
}

/// Reqwest-based client for listing and deleting workflow artifacts.
///
/// Every request carries `Authorization: Bearer <token>` and
/// `Accept: application/vnd.github+json`.
///
/// # Examples
///
/// ```rust,ignore
/// use artsweep_github::reqwest::{GithubClient, GithubConfig};
/// use artsweep_github::{ArtifactProvider, BearerToken, Repository};
///
/// let client = GithubClient::new(GithubConfig::default())?;
/// let repository = Repository::new("octo-org", "octo-docs")?;
/// let token = BearerToken::new("ghp_...")?;
///
/// let page = client.fetch_page(&repository, &token, 1).await?;
/// ```
#[derive(Clone)]
pub struct GithubClient {
    inner: Arc<GithubClientInner>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Creates a new GitHub client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_secs = ?config.timeout().map(|t| t.as_secs()),
            "Creating GitHub client"
        );

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let inner = GithubClientInner {
            http,
            base_url,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &GithubConfig {
        &self.inner.config
    }

    /// Converts this client into an [`ArtifactService`].
    pub fn into_service(self) -> ArtifactService {
        ArtifactService::new(self)
    }

    /// Builds `{base}/repos/{owner}/{repo}/actions/artifacts[/{id}]`.
    fn artifacts_url(
        &self,
        repository: &Repository,
        artifact_id: Option<ArtifactId>,
    ) -> Result<Url> {
        let mut url = self.inner.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::request_construction("API URL cannot be a base"))?;
            segments
                .pop_if_empty()
                .extend([
                    "repos",
                    repository.owner.as_str(),
                    repository.name.as_str(),
                    "actions",
                    "artifacts",
                ]);
            if let Some(id) = artifact_id {
                segments.push(&id.to_string());
            }
        }

        Ok(url)
    }

    /// Attaches authentication and content negotiation headers.
    fn authorize(request: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        request
            .bearer_auth(token.expose())
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
    }
}

#[async_trait::async_trait]
impl ArtifactProvider for GithubClient {
    async fn fetch_page(
        &self,
        repository: &Repository,
        token: &BearerToken,
        page: u64,
    ) -> Result<ArtifactCollection> {
        let mut url = self.artifacts_url(repository, None)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &PAGE_SIZE.to_string());

        let request = Self::authorize(self.inner.http.get(url), token);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::warn!(
                target: TRACING_TARGET,
                repository = %repository,
                page,
                status = status.as_u16(),
                "Artifact listing request rejected"
            );

            return Err(Error::api(status.as_u16(), body));
        }

        let body = response.text().await?;
        let collection: ArtifactCollection = serde_json::from_str(&body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            repository = %repository,
            page,
            total_count = collection.total_count,
            retrieved = collection.len(),
            "Artifact page received"
        );

        Ok(collection)
    }

    async fn delete_artifact(
        &self,
        repository: &Repository,
        token: &BearerToken,
        artifact_id: ArtifactId,
    ) -> Result<()> {
        let url = self.artifacts_url(repository, Some(artifact_id))?;

        let request = Self::authorize(self.inner.http.delete(url), token);
        let response = request.send().await?;
        let status = response.status();

        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }

        Ok(())
    }
}
