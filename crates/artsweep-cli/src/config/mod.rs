//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── target: TargetConfig   # Organization, repository, bearer token
//! ├── github: GithubConfig   # API URL, timeout, user agent
//! └── command: Command       # list | sweep --days N [--dry-run]
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables,
//! and environment variables can be placed in a `.env` file.
//!
//! # Example
//!
//! ```bash
//! artsweep --org octo-org --repo octo-docs --token ghp_... sweep --days 7
//!
//! # Or via environment variables
//! ORGANISATION_NAME=octo-org REPOSITORY_NAME=octo-docs BEARER_TOKEN=ghp_... \
//!     NUMBER_OF_DAYS=7 artsweep sweep
//! ```

mod target;

use std::process;

use artsweep_github::Result;
use artsweep_github::reqwest::GithubConfig;
use clap::{Args, Parser, Subcommand};
pub use target::TargetConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "artsweep")]
#[command(about = "Delete GitHub Actions artifacts older than a retention window")]
#[command(version)]
pub struct Cli {
    /// Repository and credential to operate on.
    #[clap(flatten)]
    pub target: TargetConfig,

    /// GitHub API client configuration.
    #[clap(flatten)]
    pub github: GithubConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every artifact stored for the repository.
    List,
    /// Delete artifacts created before the retention window.
    Sweep(SweepArgs),
}

/// Arguments of the `sweep` command.
#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    /// Retention window in days; artifacts created earlier are deleted.
    #[arg(long, env = "NUMBER_OF_DAYS")]
    pub days: u32,

    /// Report what would be deleted without deleting anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap's `env` fallbacks see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values before any request is made.
    pub fn validate(&self) -> Result<()> {
        self.target.validate()?;
        self.github.validate()?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            org = ?self.target.org,
            repo = ?self.target.repo,
            api_url = %self.github.api_url,
            http_timeout_secs = ?self.github.http_timeout,
            user_agent = %self.github.effective_user_agent(),
            "GitHub configuration"
        );

        if let Command::Sweep(args) = &self.command {
            tracing::debug!(
                target: TRACING_TARGET_CONFIG,
                retention_days = args.days,
                dry_run = args.dry_run,
                "Sweep configuration"
            );
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
