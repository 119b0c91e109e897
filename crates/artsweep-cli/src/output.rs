//! Human-readable command output.
//!
//! Progress goes through `tracing` (stderr); the listing and the final
//! summary are written here, to stdout by default.

use std::io::{self, Write};

use artsweep_github::{ArtifactCollection, Repository};
use jiff::Timestamp;

use crate::sweep::{RetentionPolicy, SweepMode, SweepReport, created_date};

/// Writes command results to a writer.
pub struct Printer<W: Write = Box<dyn Write>> {
    out: W,
}

impl Printer<Box<dyn Write>> {
    /// Create a new printer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl<W: Write> Printer<W> {
    /// Create a new printer with a custom writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the printer and returns the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints the provider total and how many artifacts were retrieved.
    pub fn print_totals(&mut self, artifacts: &ArtifactCollection) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Total artifacts found: {}", artifacts.total_count)?;
        writeln!(self.out, "Retrieved {} artifacts from API", artifacts.len())
    }

    /// Prints one column-aligned row per artifact, followed by the totals.
    pub fn print_listing(
        &mut self,
        repository: &Repository,
        artifacts: &ArtifactCollection,
    ) -> io::Result<()> {
        let name_width = artifacts
            .iter()
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("NAME".len());

        writeln!(self.out, "Artifacts for {repository}")?;
        writeln!(
            self.out,
            "{:<12} {:<name_width$} {:>12} {:<10} {:<10} EXPIRED",
            "ID", "NAME", "SIZE", "CREATED", "EXPIRES"
        )?;

        for artifact in artifacts {
            let expires = artifact
                .expires_at
                .map(|t| t.strftime("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_owned());

            writeln!(
                self.out,
                "{:<12} {:<name_width$} {:>12} {:<10} {:<10} {}",
                artifact.id,
                artifact.name,
                artifact.size_in_bytes,
                created_date(artifact),
                expires,
                if artifact.expired { "yes" } else { "no" },
            )?;
        }

        self.print_totals(artifacts)?;
        writeln!(
            self.out,
            "Total size: {} bytes",
            artifacts.total_size_in_bytes()
        )
    }

    /// Prints the retention window and the cutoff date.
    pub fn print_cutoff(&mut self, policy: RetentionPolicy, cutoff: Timestamp) -> io::Result<()> {
        writeln!(
            self.out,
            "Deleting artifacts older than {} days (before {})",
            policy.days(),
            cutoff.strftime("%Y-%m-%d")
        )?;
        writeln!(self.out)
    }

    /// Prints the final summary of a sweep.
    pub fn print_summary(&mut self, report: &SweepReport, mode: SweepMode) -> io::Result<()> {
        writeln!(self.out)?;
        match mode {
            SweepMode::Delete => {
                writeln!(self.out, "Cleanup complete!")?;
                writeln!(self.out, "Artifacts deleted: {}", report.deleted)?;
            }
            SweepMode::DryRun => {
                writeln!(self.out, "Dry run complete, nothing was deleted.")?;
                writeln!(self.out, "Artifacts to delete: {}", report.would_delete)?;
            }
        }
        writeln!(self.out, "Artifacts kept: {}", report.kept)?;

        if report.has_failures() {
            writeln!(
                self.out,
                "Artifacts failed: {} of {}",
                report.failed.len(),
                report.expired()
            )?;
            for failure in &report.failed {
                writeln!(
                    self.out,
                    "  - {} (ID: {}): {}",
                    failure.name,
                    failure.artifact_id,
                    failure.error.chain()
                )?;
            }
        }

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use artsweep_github::{Artifact, ArtifactId, Error};

    use super::*;
    use crate::sweep::FailedDeletion;

    fn render(f: impl FnOnce(&mut Printer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut printer = Printer::new(Vec::new());
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    fn collection() -> ArtifactCollection {
        ArtifactCollection {
            total_count: 2,
            artifacts: vec![Artifact {
                id: ArtifactId(11),
                name: "coverage-report".to_owned(),
                size_in_bytes: 556,
                created_at: Some("2026-10-01T09:00:00Z".parse().unwrap()),
                expires_at: Some("2026-12-30T09:00:00Z".parse().unwrap()),
                expired: false,
            }],
        }
    }

    #[test]
    fn listing_contains_rows_and_totals() {
        let repository = Repository::new("octo-org", "octo-docs").unwrap();
        let output = render(|p| p.print_listing(&repository, &collection()));

        assert!(output.contains("Artifacts for octo-org/octo-docs"));
        assert!(output.contains("coverage-report"));
        assert!(output.contains("2026-10-01"));
        assert!(output.contains("2026-12-30"));
        assert!(output.contains("Total artifacts found: 2"));
        assert!(output.contains("Retrieved 1 artifacts from API"));
    }

    #[test]
    fn cutoff_line_uses_date() {
        let cutoff: Timestamp = "2026-10-11T12:00:00Z".parse().unwrap();
        let output = render(|p| p.print_cutoff(RetentionPolicy::new(7), cutoff));

        assert!(output.contains("older than 7 days (before 2026-10-11)"));
    }

    #[test]
    fn summary_lists_failures() {
        let report = SweepReport {
            deleted: 3,
            kept: 5,
            would_delete: 0,
            failed: vec![FailedDeletion {
                artifact_id: ArtifactId(42),
                name: "old-build".to_owned(),
                error: Error::api(404, "Not Found"),
            }],
        };
        let output = render(|p| p.print_summary(&report, SweepMode::Delete));

        assert!(output.contains("Cleanup complete!"));
        assert!(output.contains("Artifacts deleted: 3"));
        assert!(output.contains("Artifacts kept: 5"));
        assert!(output.contains("Artifacts failed: 1 of 4"));
        assert!(output.contains("old-build (ID: 42)"));
        assert!(output.contains("404"));
    }

    #[test]
    fn dry_run_summary() {
        let report = SweepReport {
            would_delete: 2,
            kept: 1,
            ..SweepReport::default()
        };
        let output = render(|p| p.print_summary(&report, SweepMode::DryRun));

        assert!(output.contains("nothing was deleted"));
        assert!(output.contains("Artifacts to delete: 2"));
        assert!(!output.contains("failed"));
    }
}
