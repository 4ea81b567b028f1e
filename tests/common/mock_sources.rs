//! Programmable in-memory sources for driving the aggregator and the
//! suggestion debouncer without a network.
//!
//! Responses are keyed by query. Each mock is a cheap clone over shared
//! state, so a test can keep one handle for assertions while the component
//! under test owns another.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dossier::sources::{ProfileSource, RepositorySource, SourceError};
use dossier::types::{CompanyProfile, RepoSummary, RepositoryData, Suggestion};

pub fn sample_profile(name: &str) -> CompanyProfile {
    CompanyProfile {
        name: name.to_string(),
        city: Some("Springfield".to_string()),
        country: Some("US".to_string()),
        stock_symbol: Some("ACME".to_string()),
        description: "Makes everything".to_string(),
        image_url: format!("https://img.example/{name}.png"),
    }
}

pub fn sample_suggestion(title: &str) -> Suggestion {
    Suggestion {
        title: title.to_string(),
        value: title.to_string(),
        image_url: format!("https://img.example/{title}.png"),
    }
}

pub fn repos_with_stars(stars: &[u64]) -> RepositoryData {
    let repos: Vec<RepoSummary> = stars
        .iter()
        .enumerate()
        .map(|(i, &count)| RepoSummary {
            name: format!("repo-{i}"),
            language: Some("Rust".to_string()),
            description: format!("Repository number {i}"),
            stars: count,
        })
        .collect();

    RepositoryData {
        total_stars: Some(stars.iter().sum()),
        repos,
    }
}

#[derive(Default)]
struct ProfileInner {
    profiles: Mutex<HashMap<String, Result<CompanyProfile, SourceError>>>,
    suggestions: Mutex<HashMap<String, Result<Vec<Suggestion>, SourceError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    profile_calls: AtomicUsize,
    suggestion_calls: AtomicUsize,
    suggestion_queries: Mutex<Vec<String>>,
}

/// Profile source stub. Unknown queries resolve to `NotFound` (profiles)
/// or an empty list (suggestions).
#[derive(Clone, Default)]
pub struct MockProfileSource {
    inner: Arc<ProfileInner>,
}

impl MockProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, query: &str, profile: CompanyProfile) -> Self {
        self.inner
            .profiles
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(profile));
        self
    }

    pub fn with_profile_error(self, query: &str, error: SourceError) -> Self {
        self.inner
            .profiles
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(error));
        self
    }

    pub fn with_suggestions(self, query: &str, items: Vec<Suggestion>) -> Self {
        self.inner
            .suggestions
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(items));
        self
    }

    pub fn with_suggestion_error(self, query: &str, error: SourceError) -> Self {
        self.inner
            .suggestions
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(error));
        self
    }

    /// Delay every fetch for `query` by `delay` before resolving.
    pub fn with_delay(self, query: &str, delay: Duration) -> Self {
        self.inner
            .delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.inner.profile_calls.load(Ordering::SeqCst)
    }

    pub fn suggestion_calls(&self) -> usize {
        self.inner.suggestion_calls.load(Ordering::SeqCst)
    }

    pub fn suggestion_queries(&self) -> Vec<String> {
        self.inner.suggestion_queries.lock().unwrap().clone()
    }

    fn delay_for(&self, query: &str) -> Option<Duration> {
        self.inner.delays.lock().unwrap().get(query).copied()
    }
}

impl ProfileSource for MockProfileSource {
    async fn fetch_profile(&self, query: &str) -> Result<CompanyProfile, SourceError> {
        self.inner.profile_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay_for(query) {
            tokio::time::sleep(delay).await;
        }
        self.inner
            .profiles
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Err(SourceError::NotFound))
    }

    async fn fetch_suggestions(&self, partial: &str) -> Result<Vec<Suggestion>, SourceError> {
        self.inner.suggestion_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .suggestion_queries
            .lock()
            .unwrap()
            .push(partial.to_string());
        if let Some(delay) = self.delay_for(partial) {
            tokio::time::sleep(delay).await;
        }
        self.inner
            .suggestions
            .lock()
            .unwrap()
            .get(partial)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
    }
}

#[derive(Default)]
struct RepoInner {
    responses: Mutex<HashMap<String, Result<RepositoryData, SourceError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: AtomicUsize,
}

/// Repository source stub. Unknown queries resolve to an empty success.
#[derive(Clone, Default)]
pub struct MockRepositorySource {
    inner: Arc<RepoInner>,
}

impl MockRepositorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repositories(self, query: &str, data: RepositoryData) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(data));
        self
    }

    pub fn with_error(self, query: &str, error: SourceError) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(error));
        self
    }

    pub fn with_delay(self, query: &str, delay: Duration) -> Self {
        self.inner
            .delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl RepositorySource for MockRepositorySource {
    async fn fetch_repositories(&self, query: &str) -> Result<RepositoryData, SourceError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.inner.delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner
            .responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| {
                Ok(RepositoryData {
                    total_stars: Some(0),
                    repos: Vec::new(),
                })
            })
    }
}
