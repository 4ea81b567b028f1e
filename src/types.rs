//! Core domain types shared across the crate.

use serde::{Deserialize, Serialize};

/// Descriptive company metadata returned by the profile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Name of the company.
    pub name: String,
    /// City the company is located in.
    pub city: Option<String>,
    /// Country the company is located in.
    pub country: Option<String>,
    /// Ticker symbol, for publicly traded companies.
    pub stock_symbol: Option<String>,
    /// Short description of the company.
    pub description: String,
    /// Image URL for the company logo.
    pub image_url: String,
}

/// A single autocomplete candidate for a partial query.
///
/// Regenerated wholesale on every debounced lookup; the previous list is
/// discarded, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub value: String,
    pub image_url: String,
}

/// A source repository owned by the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Name of the repository.
    pub name: String,
    /// Primary language, if the upstream reports one.
    pub language: Option<String>,
    /// Short description of the repository.
    pub description: String,
    /// Number of stars the repository has.
    pub stars: u64,
}

/// Repository data for one company, as merged into the view-model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryData {
    /// Star count summed across the company's **entire** repository set,
    /// not just the displayed page. `None` when repository data could not
    /// be fetched.
    pub total_stars: Option<u64>,
    /// Displayed repositories, truncated to the first entries in upstream
    /// order.
    pub repos: Vec<RepoSummary>,
}

impl RepositoryData {
    /// The recovered-failure sentinel: repository data is optional, so a
    /// failed fetch merges as "no stars, no repos" rather than an error.
    pub fn empty() -> Self {
        Self {
            total_stars: None,
            repos: Vec::new(),
        }
    }
}

/// The merged, UI-facing view of one company lookup.
///
/// Each remote source writes only its own fields: the profile source fills
/// the descriptive fields, the repository source fills `total_stars` and
/// `repos`. `repos == None` means repository data has not merged yet;
/// `Some(vec![])` means it merged empty (or as the failure sentinel).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub stock_symbol: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub total_stars: Option<u64>,
    pub repos: Option<Vec<RepoSummary>>,
}

impl Company {
    /// Shallow-merge profile fields, preserving any repository fields
    /// already present.
    pub fn apply_profile(&mut self, profile: CompanyProfile) {
        self.name = Some(profile.name);
        self.city = profile.city;
        self.country = profile.country;
        self.stock_symbol = profile.stock_symbol;
        self.description = Some(profile.description);
        self.image_url = Some(profile.image_url);
    }

    /// Shallow-merge repository fields, preserving any profile fields
    /// already present.
    pub fn apply_repositories(&mut self, data: RepositoryData) {
        self.total_stars = data.total_stars;
        self.repos = Some(data.repos);
    }
}
