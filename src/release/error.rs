use thiserror::Error;

/// Failure of a single page request against a release source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Terminal failure while resolving one repository
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("page {page} failed after {attempts} attempt(s): {source}")]
    PageFailed {
        page: u32,
        attempts: u32,
        #[source]
        source: SourceError,
    },
}
