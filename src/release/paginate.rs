//! Page-by-page collection of release versions with early exit
//!
//! Pages are consumed strictly in order. Release sources list newest releases
//! first, so once the trailing tag of a page is below the floor no later page
//! can contain an eligible version and fetching stops.

use semver::Version;
use tracing::{debug, warn};

use crate::config::FetchPolicy;
use crate::release::error::{ResolveError, SourceError};
use crate::release::filter::{is_below_floor, parse_tag};
use crate::release::source::ReleaseSource;
use crate::release::types::{ReleasePage, RepositoryTarget};

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The trailing tag of the last page fetched was below the floor
    EarlyExit,
    /// The source reported no further page
    Exhausted,
}

/// Versions gathered for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    /// Filtered versions in source order
    pub versions: Vec<Version>,
    /// Number of pages successfully fetched
    pub pages: u32,
    pub stop: StopReason,
}

enum State {
    Fetching { page: u32, attempt: u32 },
    Evaluating { page: u32, result: ReleasePage },
    Stopped(StopReason),
}

/// Fetch pages for `target` until the source is exhausted or early exit fires.
///
/// A failing page is retried immediately, up to `policy.max_attempts` times in
/// total, before the repository is abandoned with [`ResolveError::PageFailed`].
pub async fn collect_versions(
    source: &dyn ReleaseSource,
    target: &RepositoryTarget,
    policy: &FetchPolicy,
) -> Result<Collected, ResolveError> {
    let floor = &target.min_version;
    let max_attempts = policy.max_attempts.max(1);
    let mut versions = Vec::new();
    let mut pages = 0;
    let mut state = State::Fetching {
        page: 1,
        attempt: 1,
    };

    let stop = loop {
        state = match state {
            State::Fetching { page, attempt } => {
                match source.list_page(&target.owner, &target.name, page).await {
                    Ok(result) => State::Evaluating { page, result },
                    Err(e) if attempt < max_attempts => {
                        warn!(
                            "Failed to fetch page {} of {} (attempt {}/{}): {}",
                            page, target, attempt, max_attempts, e
                        );
                        State::Fetching {
                            page,
                            attempt: attempt + 1,
                        }
                    }
                    Err(e) => return Err(page_failed(page, attempt, e)),
                }
            }
            State::Evaluating { page, result } => {
                pages += 1;
                let before = versions.len();
                versions.extend(result.tags.iter().filter_map(|tag| parse_tag(tag, floor)));
                debug!(
                    "Page {} of {}: {} tags, {} eligible",
                    page,
                    target,
                    result.tags.len(),
                    versions.len() - before
                );

                // The untrimmed page decides: a filtered-out trailing tag still carries order.
                let past_floor = result
                    .tags
                    .last()
                    .is_some_and(|tag| is_below_floor(tag, floor));

                match result.next_page {
                    _ if past_floor => State::Stopped(StopReason::EarlyExit),
                    Some(next) if next > page => State::Fetching {
                        page: next,
                        attempt: 1,
                    },
                    Some(next) => {
                        warn!(
                            "Source returned non-advancing next page {} after page {} of {}",
                            next, page, target
                        );
                        State::Stopped(StopReason::Exhausted)
                    }
                    None => State::Stopped(StopReason::Exhausted),
                }
            }
            State::Stopped(reason) => break reason,
        };
    };

    debug!("Stopped paging {} after {} page(s): {:?}", target, pages, stop);

    Ok(Collected {
        versions,
        pages,
        stop,
    })
}

fn page_failed(page: u32, attempts: u32, source: SourceError) -> ResolveError {
    ResolveError::PageFailed {
        page,
        attempts,
        source,
    }
}
