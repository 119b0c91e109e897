//! Repository coordinates and credentials passed to every provider call.

use std::fmt;

use crate::{Error, Result};

/// Owner and name of a repository, e.g. `octo-org/octo-docs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    /// Organization or user that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl Repository {
    /// Creates repository coordinates, rejecting empty components.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into().trim().to_owned();
        let name = name.into().trim().to_owned();

        if owner.is_empty() {
            return Err(Error::invalid_config("organization name must not be empty"));
        }
        if name.is_empty() {
            return Err(Error::invalid_config("repository name must not be empty"));
        }

        Ok(Self { owner, name })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Opaque credential sent as `Authorization: Bearer <token>`.
///
/// The token never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token, rejecting empty values.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_owned();
        if token.is_empty() {
            return Err(Error::invalid_config("bearer token must not be empty"));
        }
        Ok(Self(token))
    }

    /// Returns the raw token for use in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}
