//! Repository and credential configuration.

use artsweep_github::{BearerToken, Error, Repository, Result};
use clap::Args;

/// The repository whose artifacts are managed, and the token used to do so.
///
/// # Environment Variables
///
/// - `ORGANISATION_NAME` - Organization or user owning the repository
/// - `REPOSITORY_NAME` - Repository name
/// - `BEARER_TOKEN` - Token with `actions:write` permission on the repository
///
/// The flags are global so they may follow the subcommand. Presence is
/// checked by [`TargetConfig::validate`] rather than by the parser.
#[derive(Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct TargetConfig {
    /// Organization or user that owns the repository.
    #[arg(long, env = "ORGANISATION_NAME", global = true)]
    pub org: Option<String>,

    /// Repository name.
    #[arg(long, env = "REPOSITORY_NAME", global = true)]
    pub repo: Option<String>,

    /// Bearer token used to authenticate against the GitHub API.
    #[arg(long, env = "BEARER_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

/// Returns the setting, or an empty string when it is absent.
fn value(setting: &Option<String>) -> &str {
    setting.as_deref().unwrap_or_default()
}

impl TargetConfig {
    /// Validates that every value is present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("ORGANISATION_NAME", value(&self.org)),
            ("REPOSITORY_NAME", value(&self.repo)),
            ("BEARER_TOKEN", value(&self.token)),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::invalid_config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Returns the repository coordinates.
    pub fn repository(&self) -> Result<Repository> {
        Repository::new(value(&self.org), value(&self.repo))
    }

    /// Returns the bearer token.
    pub fn token(&self) -> Result<BearerToken> {
        BearerToken::new(value(&self.token))
    }
}

impl std::fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConfig")
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish()
    }
}
