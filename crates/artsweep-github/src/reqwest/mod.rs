//! Reqwest-based HTTP client for the GitHub REST API.
//!
//! This module provides a reqwest-based implementation of the [`ArtifactProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use artsweep_github::reqwest::{GithubClient, GithubConfig};
//! use artsweep_github::ArtifactService;
//!
//! // Create a client against the public API
//! let client = GithubClient::new(GithubConfig::default())?;
//!
//! // Convert to a service for pagination and logging
//! let service: ArtifactService = client.into_service();
//! ```
//!
//! [`ArtifactProvider`]: crate::ArtifactProvider

mod client;
mod config;
mod error;

pub use client::{ACCEPT_GITHUB_JSON, GithubClient};
pub use config::{DEFAULT_API_URL, GithubConfig};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "artsweep_github::reqwest";
