//! Shared error handling for remote data sources.
//!
//! Both sources report failures through the same two-variant taxonomy:
//! `NotFound` for a query the upstream has no record of, `Transport` for
//! everything else (network, HTTP status, decode). How a failure is
//! surfaced is the caller's decision — the aggregator shows profile
//! failures to the user and silently recovers repository failures.

use thiserror::Error;

/// User-facing message for a profile query with zero matches.
pub const NOT_FOUND_MESSAGE: &str = "The company you are looking for could not be found";

/// Failure at the service-client boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream returned zero matches for the query.
    #[error("no matching organization found")]
    NotFound,

    /// Network, HTTP, or decode failure, carrying the underlying text.
    #[error("{0}")]
    Transport(String),
}

impl SourceError {
    /// The message shown in the shared error slot when this failure
    /// surfaces on the profile path.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            SourceError::Transport(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

/// Build a detailed error message from an octocrab GitHub error.
///
/// Extracts the structured status and message when the error came from the
/// GitHub API itself, falling back to the error's own rendering.
pub fn build_github_error_message(error: &octocrab::Error) -> String {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code;
            let status_text = status.canonical_reason().unwrap_or("Unknown");
            format!(
                "GitHub API error ({} {}): {}",
                status.as_u16(),
                status_text,
                source.message
            )
        }
        octocrab::Error::Http { source, .. } => format!("HTTP error: {source}"),
        octocrab::Error::Serde { source, .. } => format!("Serialization error: {source}"),
        octocrab::Error::Json { source, .. } => {
            format!("JSON error in {}: {}", source.path(), source.inner())
        }
        _ => format!("GitHub API error: {error}"),
    }
}

/// Get the HTTP status code from an octocrab error, if available.
pub fn get_github_status_code(error: &octocrab::Error) -> Option<u16> {
    if let octocrab::Error::GitHub { source, .. } = error {
        return Some(source.status_code.as_u16());
    }
    None
}

/// Convert an octocrab error into the source taxonomy: an unknown
/// organization (404) is `NotFound`, anything else is `Transport`.
pub fn from_octocrab_error(error: &octocrab::Error) -> SourceError {
    if get_github_status_code(error) == Some(404) {
        return SourceError::NotFound;
    }
    SourceError::Transport(build_github_error_message(error))
}
