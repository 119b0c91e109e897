//! Artifact records and collections as reported by the provider.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Number of artifacts requested per page of the listing endpoint.
pub const PAGE_SIZE: u64 = 30;

/// Provider-assigned artifact identifier, unique per repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(pub u64);

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ArtifactId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A named, sized, timestamped build output.
///
/// Fields the provider reports beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact identifier.
    pub id: ArtifactId,
    /// Artifact name as uploaded by the workflow.
    pub name: String,
    /// Size of the stored archive.
    pub size_in_bytes: u64,
    /// When the artifact was uploaded, if the provider reports it.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// When the provider will expire the artifact on its own.
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// Whether the provider already considers the artifact expired.
    #[serde(default)]
    pub expired: bool,
}

impl Artifact {
    /// Returns `true` if the artifact was created strictly before `cutoff`.
    ///
    /// An artifact without a creation time is older than any cutoff.
    #[inline]
    pub fn created_before(&self, cutoff: Timestamp) -> bool {
        self.created_at.is_none_or(|created_at| created_at < cutoff)
    }
}

/// An ordered sequence of artifacts with the provider-reported total.
///
/// Used both for a single page and for the aggregate of all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCollection {
    /// Total number of artifacts the provider reports for the repository.
    pub total_count: u64,
    /// Artifacts retrieved so far, in provider order.
    pub artifacts: Vec<Artifact>,
}

impl ArtifactCollection {
    /// Creates an empty collection sized for `total_count` artifacts.
    pub fn with_total(total_count: u64) -> Self {
        // Capacity is a hint only, clamped to MAX_PREALLOCATED.
        let capacity = usize::try_from(total_count.min(MAX_PREALLOCATED)).unwrap_or_default();

        Self {
            total_count,
            artifacts: Vec::with_capacity(capacity),
        }
    }

    /// Number of artifacts actually retrieved.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns `true` if no artifacts were retrieved.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Returns `true` if every artifact the provider reported was retrieved.
    pub fn is_complete(&self) -> bool {
        self.artifacts.len() as u64 == self.total_count
    }

    /// Sum of the sizes of all retrieved artifacts.
    pub fn total_size_in_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.size_in_bytes).sum()
    }

    /// Appends the artifacts of another page.
    pub fn extend_from_page(&mut self, page: ArtifactCollection) {
        self.artifacts.extend(page.artifacts);
    }

    /// Iterates over the retrieved artifacts.
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }
}

impl IntoIterator for ArtifactCollection {
    type IntoIter = std::vec::IntoIter<Artifact>;
    type Item = Artifact;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArtifactCollection {
    type IntoIter = std::slice::Iter<'a, Artifact>;
    type Item = &'a Artifact;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

/// Upper bound on the capacity reserved up front for an aggregate listing.
const MAX_PREALLOCATED: u64 = 64 * 1024;

/// Number of pages needed to list `total_count` artifacts.
///
/// An empty listing still takes one request to discover that it is empty.
pub const fn page_count(total_count: u64) -> u64 {
    if total_count == 0 {
        1
    } else {
        total_count.div_ceil(PAGE_SIZE)
    }
}
