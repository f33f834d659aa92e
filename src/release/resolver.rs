//! Resolve latest-version sets for repository targets

use tracing::{error, info};

use crate::config::FetchPolicy;
use crate::input::InputError;
use crate::release::aggregate::{LatestVersionSet, aggregate};
use crate::release::error::ResolveError;
use crate::release::paginate::collect_versions;
use crate::release::source::ReleaseSource;
use crate::release::types::RepositoryTarget;

/// Result of processing one row of the repository list
#[derive(Debug)]
pub enum RepoOutcome {
    Resolved {
        target: RepositoryTarget,
        versions: LatestVersionSet,
    },
    Failed {
        target: RepositoryTarget,
        error: ResolveError,
    },
    /// The row could not be turned into a target
    Invalid(InputError),
}

impl RepoOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RepoOutcome::Resolved { .. })
    }
}

/// Receives one outcome per repository row, in input order
pub trait ResultSink {
    fn report(&mut self, outcome: RepoOutcome);
}

impl ResultSink for Vec<RepoOutcome> {
    fn report(&mut self, outcome: RepoOutcome) {
        self.push(outcome);
    }
}

/// Fetch all relevant pages for `target` and fold them into a latest-version set
pub async fn resolve_target(
    source: &dyn ReleaseSource,
    target: &RepositoryTarget,
    policy: &FetchPolicy,
) -> Result<LatestVersionSet, ResolveError> {
    let collected = collect_versions(source, target, policy).await?;
    let versions = aggregate(collected.versions, &target.min_version);

    info!(
        "Resolved {} release line(s) for {} from {} page(s)",
        versions.len(),
        target,
        collected.pages
    );

    Ok(versions)
}

/// Resolve every row in order, one repository at a time.
///
/// A failing row is reported to the sink and never stops the run.
/// Returns the number of rows that did not resolve.
pub async fn resolve_all<S>(
    source: &dyn ReleaseSource,
    rows: Vec<Result<RepositoryTarget, InputError>>,
    policy: &FetchPolicy,
    sink: &mut S,
) -> usize
where
    S: ResultSink + ?Sized,
{
    let mut failures = 0;

    for row in rows {
        let outcome = match row {
            Ok(target) => match resolve_target(source, &target, policy).await {
                Ok(versions) => RepoOutcome::Resolved { target, versions },
                Err(error) => {
                    error!("Failed to resolve {}: {}", target, error);
                    RepoOutcome::Failed { target, error }
                }
            },
            Err(e) => {
                error!("Skipping repository row: {}", e);
                RepoOutcome::Invalid(e)
            }
        };

        if !outcome.is_success() {
            failures += 1;
        }
        sink.report(outcome);
    }

    failures
}
