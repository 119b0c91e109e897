//! Retention policy: which artifacts are old enough to delete.

use artsweep_github::{Artifact, Error, Result};
use jiff::{SignedDuration, Timestamp};

/// Keeps artifacts created within the last `days` days.
///
/// The decision uses the artifact's creation time only; the provider's own
/// `expires_at` and `expired` fields are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    days: u32,
}

/// Artifacts split by a [`RetentionPolicy`].
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Created strictly before the cutoff; to be deleted.
    pub expired: Vec<&'a Artifact>,
    /// Created at or after the cutoff.
    pub kept: Vec<&'a Artifact>,
}

impl RetentionPolicy {
    /// Creates a policy with a retention window of `days` days.
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// Retention window in days.
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Returns the cutoff instant: `now` minus the retention window.
    ///
    /// Days are 24 hours long; calendar and time-zone effects are ignored.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window reaches before the
    /// earliest representable instant.
    pub fn cutoff(&self, now: Timestamp) -> Result<Timestamp> {
        let window = SignedDuration::from_hours(i64::from(self.days) * 24);

        now.checked_sub(window).map_err(|err| {
            Error::invalid_config(format!(
                "retention window of {} days is out of range: {err}",
                self.days
            ))
        })
    }

    /// Splits artifacts into those created before `cutoff` and the rest.
    ///
    /// An artifact created exactly at the cutoff is kept; one without a
    /// creation time is expired.
    pub fn partition<'a, I>(cutoff: Timestamp, artifacts: I) -> Partition<'a>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let mut partition = Partition::default();
        for artifact in artifacts {
            if artifact.created_before(cutoff) {
                partition.expired.push(artifact);
            } else {
                partition.kept.push(artifact);
            }
        }
        partition
    }
}
