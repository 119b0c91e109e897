//! The `list` and `sweep` commands.

use std::io::Write;

use anyhow::Context;
use artsweep_github::{ArtifactCollection, ArtifactService, BearerToken, Repository};
use jiff::Timestamp;

use crate::TRACING_TARGET_SWEEP;
use crate::config::SweepArgs;
use crate::output::Printer;
use crate::sweep::{RetentionPolicy, SweepMode, SweepReport, sweep_artifacts};

/// Fetches every artifact, aborting on the first failed page.
async fn fetch_all(
    service: &ArtifactService,
    repository: &Repository,
    token: &BearerToken,
) -> anyhow::Result<ArtifactCollection> {
    tracing::info!(
        target: TRACING_TARGET_SWEEP,
        "Fetching artifacts for {repository}..."
    );

    service
        .list_artifacts(repository, token)
        .await
        .context("failed to fetch artifacts")
}

/// Prints every artifact of the repository.
pub async fn list<W: Write>(
    service: &ArtifactService,
    repository: &Repository,
    token: &BearerToken,
    printer: &mut Printer<W>,
) -> anyhow::Result<()> {
    let artifacts = fetch_all(service, repository, token).await?;
    printer.print_listing(repository, &artifacts)?;
    Ok(())
}

/// Deletes the artifacts created before `now` minus the retention window.
///
/// The cutoff is resolved before the first request, and a failed page
/// aborts the command before anything is deleted. Failed deletions are
/// reported but do not make the command fail.
pub async fn sweep<W: Write>(
    service: &ArtifactService,
    repository: &Repository,
    token: &BearerToken,
    args: &SweepArgs,
    now: Timestamp,
    printer: &mut Printer<W>,
) -> anyhow::Result<SweepReport> {
    let policy = RetentionPolicy::new(args.days);
    let mode = if args.dry_run {
        SweepMode::DryRun
    } else {
        SweepMode::Delete
    };

    let cutoff = policy.cutoff(now).context("invalid retention window")?;

    let artifacts = fetch_all(service, repository, token).await?;
    printer.print_totals(&artifacts)?;
    printer.print_cutoff(policy, cutoff)?;

    let report = sweep_artifacts(service, repository, token, &artifacts, cutoff, mode).await;

    tracing::info!(
        target: TRACING_TARGET_SWEEP,
        deleted = report.deleted,
        kept = report.kept,
        would_delete = report.would_delete,
        failed = report.failed.len(),
        "Sweep finished"
    );

    if report.has_failures() {
        tracing::warn!(
            target: TRACING_TARGET_SWEEP,
            failed = report.failed.len(),
            "Some artifacts could not be deleted"
        );
    }

    printer.print_summary(&report, mode)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use artsweep_github::{
        Artifact, ArtifactId, ArtifactProvider, Error, ErrorKind, PAGE_SIZE, Result,
    };
    use jiff::SignedDuration;

    use super::*;

    /// Provider serving a fixed artifact list, optionally failing one page.
    #[derive(Clone, Default)]
    struct PagedProvider {
        artifacts: Arc<Vec<Artifact>>,
        failing_page: Option<(u64, u16)>,
        pages_requested: Arc<Mutex<Vec<u64>>>,
        delete_calls: Arc<Mutex<Vec<ArtifactId>>>,
    }

    #[async_trait::async_trait]
    impl ArtifactProvider for PagedProvider {
        async fn fetch_page(
            &self,
            _repository: &Repository,
            _token: &BearerToken,
            page: u64,
        ) -> Result<ArtifactCollection> {
            self.pages_requested.lock().unwrap().push(page);

            if let Some((failing, status)) = self.failing_page
                && failing == page
            {
                return Err(Error::api(status, "Resource not accessible by integration"));
            }

            let start = usize::try_from((page - 1) * PAGE_SIZE).unwrap();
            let end = (start + PAGE_SIZE as usize).min(self.artifacts.len());
            Ok(ArtifactCollection {
                total_count: self.artifacts.len() as u64,
                artifacts: self.artifacts[start.min(end)..end].to_vec(),
            })
        }

        async fn delete_artifact(
            &self,
            _repository: &Repository,
            _token: &BearerToken,
            artifact_id: ArtifactId,
        ) -> Result<()> {
            self.delete_calls.lock().unwrap().push(artifact_id);
            Ok(())
        }
    }

    fn now() -> Timestamp {
        "2026-10-18T12:00:00Z".parse().unwrap()
    }

    /// `count` artifacts; even ids are 10 days old, odd ids 1 day old.
    fn provider(count: u64) -> PagedProvider {
        let artifacts = (0..count)
            .map(|id| {
                let age_days = if id % 2 == 0 { 10 } else { 1 };
                Artifact {
                    id: ArtifactId(id),
                    name: format!("build-{id}"),
                    size_in_bytes: 512,
                    created_at: Some(now() - SignedDuration::from_hours(age_days * 24)),
                    expires_at: None,
                    expired: false,
                }
            })
            .collect();

        PagedProvider {
            artifacts: Arc::new(artifacts),
            ..Default::default()
        }
    }

    fn coordinates() -> (Repository, BearerToken) {
        (
            Repository::new("octo-org", "octo-docs").unwrap(),
            BearerToken::new("test-token").unwrap(),
        )
    }

    fn args(days: u32, dry_run: bool) -> SweepArgs {
        SweepArgs { days, dry_run }
    }

    #[tokio::test]
    async fn forbidden_second_page_deletes_nothing() {
        let (repository, token) = coordinates();
        let provider = PagedProvider {
            failing_page: Some((2, 403)),
            ..provider(45)
        };
        let service = ArtifactService::new(provider.clone());
        let mut printer = Printer::new(Vec::new());

        let error = sweep(&service, &repository, &token, &args(7, false), now(), &mut printer)
            .await
            .unwrap_err();

        let cause = error.downcast_ref::<Error>().unwrap();
        assert_eq!(cause.kind(), ErrorKind::Api);
        assert_eq!(cause.status(), Some(403));
        assert_eq!(cause.page(), Some(2));
        assert!(format!("{error:#}").contains("403"));
        assert!(format!("{error:#}").contains("page 2"));

        assert_eq!(*provider.pages_requested.lock().unwrap(), vec![1, 2]);
        assert!(provider.delete_calls.lock().unwrap().is_empty());
        assert!(printer.into_inner().is_empty());
    }

    #[tokio::test]
    async fn sweeps_every_page_and_deletes_old_artifacts() {
        let (repository, token) = coordinates();
        let provider = provider(45);
        let service = ArtifactService::new(provider.clone());
        let mut printer = Printer::new(Vec::new());

        let report = sweep(&service, &repository, &token, &args(7, false), now(), &mut printer)
            .await
            .unwrap();

        assert_eq!(report.deleted, 23);
        assert_eq!(report.kept, 22);
        assert_eq!(*provider.pages_requested.lock().unwrap(), vec![1, 2]);

        let deleted = provider.delete_calls.lock().unwrap().clone();
        assert_eq!(deleted.len(), 23);
        assert!(deleted.iter().all(|id| id.0 % 2 == 0));

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.contains("Total artifacts found: 45"));
        assert!(output.contains("before 2026-10-11"));
        assert!(output.contains("Artifacts deleted: 23"));
    }

    #[tokio::test]
    async fn dry_run_lists_without_deleting() {
        let (repository, token) = coordinates();
        let provider = provider(4);
        let service = ArtifactService::new(provider.clone());
        let mut printer = Printer::new(Vec::new());

        let report = sweep(&service, &repository, &token, &args(7, true), now(), &mut printer)
            .await
            .unwrap();

        assert_eq!(report.would_delete, 2);
        assert_eq!(report.deleted, 0);
        assert!(provider.delete_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_window_fails_before_listing() {
        let (repository, token) = coordinates();
        let provider = provider(4);
        let service = ArtifactService::new(provider.clone());
        let mut printer = Printer::new(Vec::new());

        let error = sweep(
            &service,
            &repository,
            &token,
            &args(u32::MAX, false),
            now(),
            &mut printer,
        )
        .await
        .unwrap_err();

        let cause = error.downcast_ref::<Error>().unwrap();
        assert_eq!(cause.kind(), ErrorKind::Configuration);
        assert!(provider.pages_requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_prints_every_artifact() {
        let (repository, token) = coordinates();
        let service = ArtifactService::new(provider(31));
        let mut printer = Printer::new(Vec::new());

        list(&service, &repository, &token, &mut printer)
            .await
            .unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.contains("build-0"));
        assert!(output.contains("build-30"));
        assert!(output.contains("Retrieved 31 artifacts from API"));
    }
}
