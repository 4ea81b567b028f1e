pub mod aggregator;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod sources;
pub mod suggest;
pub mod types;

pub use aggregator::{Aggregator, Snapshot, StateEvent, Submission};
pub use config::Config;
pub use error::{DossierError, Result};
pub use sources::{
    CrunchBaseClient, GitHubClient, NOT_FOUND_MESSAGE, ProfileSource, RepositorySource,
    SourceError,
};
pub use suggest::{DEBOUNCE_DELAY, SuggestionDebouncer};
pub use types::{Company, CompanyProfile, RepoSummary, RepositoryData, Suggestion};
