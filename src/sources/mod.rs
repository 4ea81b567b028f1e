//! Remote data sources.
//!
//! Two independent upstream services feed a lookup: a profile service for
//! company metadata and autocomplete suggestions, and a repository service
//! for per-organization repository listings and star counts. The traits
//! here are the seams the aggregator and suggestion fetcher are built
//! against, so both can be driven by in-memory fakes in tests.

pub mod crunchbase;
pub mod error;
pub mod github;

use std::future::Future;

use crate::types::{CompanyProfile, RepositoryData, Suggestion};

pub use crunchbase::CrunchBaseClient;
pub use error::{NOT_FOUND_MESSAGE, SourceError};
pub use github::GitHubClient;

/// Company metadata and autocomplete lookups.
pub trait ProfileSource: Send + Sync {
    /// Look up candidate organizations by name and return the first match.
    ///
    /// Fails with `SourceError::NotFound` when the upstream returns zero
    /// matches, `SourceError::Transport` on network or HTTP errors.
    fn fetch_profile(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<CompanyProfile, SourceError>> + Send;

    /// Look up organizations by partial name, projected to display name and
    /// image only. Returns at most five candidates.
    fn fetch_suggestions(
        &self,
        partial: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, SourceError>> + Send;
}

/// Per-organization repository listings.
pub trait RepositorySource: Send + Sync {
    /// Fetch all repositories for an organization.
    ///
    /// `total_stars` is summed across the full result set; the returned
    /// list is truncated to the first ten entries in upstream order.
    fn fetch_repositories(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<RepositoryData, SourceError>> + Send;
}
