//! GitHub repository source.

use octocrab::Octocrab;
use octocrab::models::Repository;

use crate::config::Config;
use crate::error::{DossierError, Result};
use crate::types::{RepoSummary, RepositoryData};

use super::error::from_octocrab_error;
use super::{RepositorySource, SourceError};

/// Number of repositories shown on the card. The star total is still
/// computed over the full set.
const REPO_DISPLAY_LIMIT: usize = 10;

const REPOS_PER_PAGE: u8 = 100;

/// GitHub repository source.
///
/// Works unauthenticated, but a personal token raises the rate limit.
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.github_token().as_deref())
    }

    /// Create a new GitHub client, optionally authenticated.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| DossierError::Api(format!("Failed to create GitHub client: {}", e)))?;

        Ok(Self { client })
    }
}

impl RepositorySource for GitHubClient {
    async fn fetch_repositories(
        &self,
        query: &str,
    ) -> std::result::Result<RepositoryData, SourceError> {
        let first_page = self
            .client
            .orgs(query)
            .list_repos()
            .per_page(REPOS_PER_PAGE)
            .send()
            .await
            .map_err(|e| from_octocrab_error(&e))?;

        // Drain every page: the star total covers the full repository set,
        // not just the displayed slice.
        let repositories: Vec<Repository> = self
            .client
            .all_pages(first_page)
            .await
            .map_err(|e| from_octocrab_error(&e))?;

        Ok(summarize(
            repositories.into_iter().map(convert_repository).collect(),
        ))
    }
}

/// Flatten an upstream repository record into the card's summary shape.
fn convert_repository(repo: Repository) -> RepoSummary {
    RepoSummary {
        name: repo.name,
        language: repo
            .language
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string),
        description: repo.description.unwrap_or_default(),
        stars: u64::from(repo.stargazers_count.unwrap_or(0)),
    }
}

/// Sum stars across the full set, then truncate the displayed list to the
/// first entries in upstream order (no re-sorting).
fn summarize(repos: Vec<RepoSummary>) -> RepositoryData {
    let total_stars = repos.iter().map(|r| r.stars).sum();
    let mut repos = repos;
    repos.truncate(REPO_DISPLAY_LIMIT);

    RepositoryData {
        total_stars: Some(total_stars),
        repos,
    }
}
