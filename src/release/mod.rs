//! Release resolution layer
//!
//! Turns a paged listing of release tags into the latest version of every
//! `major.minor` line at or above a repository's minimum version.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│  Paginate   │────▶│  Aggregate  │
//! │  (fetch)    │     │ (early exit)│     │ (per line)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   GitHub    │     │   Filter    │
//! │ (Releases)  │     │ (tag parse) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Trait for fetching release tags page by page
//! - [`github`]: GitHub Releases API implementation of the source
//! - [`filter`]: Tag parsing and the release eligibility rules
//! - [`paginate`]: Sequential page consumption with early exit and bounded retry
//! - [`aggregate`]: `LatestVersionSet`, the highest patch of each line
//! - [`resolver`]: Per-repository pipeline and the run over all rows
//! - [`error`]: Error types for sources and resolution
//! - [`types`]: `RepositoryTarget` and `ReleasePage`

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod github;
pub mod paginate;
pub mod resolver;
pub mod source;
pub mod types;
