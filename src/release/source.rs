//! Source trait for paged release listings

#[cfg(test)]
use mockall::automock;

use crate::release::error::SourceError;
use crate::release::types::ReleasePage;

/// Trait for fetching release tags one page at a time
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches a single page of releases for `owner/name`
    ///
    /// # Arguments
    /// * `owner` - Repository owner (e.g., "rust-lang")
    /// * `name` - Repository name (e.g., "rust")
    /// * `page` - 1-based page index
    ///
    /// # Returns
    /// * `Ok(ReleasePage)` - Tags ordered from newest to oldest, plus the next page index if any
    /// * `Err(SourceError)` - If the fetch fails; callers decide whether to retry the same page
    async fn list_page(
        &self,
        owner: &str,
        name: &str,
        page: u32,
    ) -> Result<ReleasePage, SourceError>;
}
