//! GitHub client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for the GitHub HTTP client.
///
/// No request timeout is applied unless one is set explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct GithubConfig {
    /// Base URL of the GitHub REST API
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)
    )]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP request timeout in seconds (no timeout when unset)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", global = true)
    )]
    #[serde(default)]
    pub http_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT", global = true)
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            http_timeout: None,
            user_agent: None,
        }
    }
}

impl GithubConfig {
    /// Create a configuration pointing at the given API base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Parses and checks the API base URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse, is not
    /// `http`/`https`, or cannot carry a path.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.api_url.trim()).map_err(|err| {
            Error::invalid_config(format!("invalid API URL '{}': {err}", self.api_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "API URL '{}' must use http or https",
                self.api_url
            )));
        }

        if url.cannot_be_a_base() {
            return Err(Error::invalid_config(format!(
                "API URL '{}' cannot be used as a base URL",
                self.api_url
            )));
        }

        Ok(url)
    }

    /// Returns the request timeout, if one was configured.
    ///
    /// A zero timeout is treated as unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|agent| !agent.is_empty())
            .map_or_else(Self::default_user_agent, str::to_owned)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("artsweep/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.base_url().map(|_| ())
    }
}
