//! Dual-source aggregator.
//!
//! Given a confirmed query, drives the profile and repository sources
//! concurrently and merges their results into one company view-model. The
//! two fetches are independent: neither waits for, cancels, or fails the
//! other. Each exposes its own loading flag, and only the profile path can
//! raise the shared error.
//!
//! Every submission stamps a monotonically increasing token. A source
//! resolution is applied only while its token is still current, so a slow
//! first query that settles after a second query has been submitted cannot
//! touch the newer state. In-flight requests are never cancelled, only
//! superseded.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::sources::{ProfileSource, RepositorySource};
use crate::types::{Company, RepositoryData};

/// Notification event sent when the aggregator state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// The profile fetch settled (success or failure).
    ProfileSettled,
    /// The repository fetch settled (failure recovered into the sentinel).
    ReposSettled,
    /// The view was cleared by an empty submission.
    Cleared,
}

/// Read-only snapshot of the aggregator state, for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// The current confirmed query.
    pub query: String,
    /// The merged view-model, `None` until a source has merged into it or
    /// after a profile failure reset it.
    pub company: Option<Company>,
    /// Shared error message, set only by the profile path.
    pub error: Option<String>,
    /// True from dispatch until the profile fetch settles.
    pub profile_loading: bool,
    /// True from dispatch until the repository fetch settles.
    pub repos_loading: bool,
}

impl Snapshot {
    /// Presentation rule: the fallback panel replaces the data card
    /// whenever there is an error or no confirmed query.
    pub fn shows_fallback(&self) -> bool {
        self.error.is_some() || self.query.is_empty()
    }
}

/// Handle for one submission's in-flight work.
///
/// The fetches run to completion whether or not this is awaited; `settled`
/// exists so one-shot callers (the CLI) can wait for both sources.
pub struct Submission {
    profile: Option<JoinHandle<()>>,
    repos: Option<JoinHandle<()>>,
}

impl Submission {
    fn settled_now() -> Self {
        Self {
            profile: None,
            repos: None,
        }
    }

    /// Wait until both sources have settled for this submission.
    pub async fn settled(self) {
        if let Some(handle) = self.profile {
            let _ = handle.await;
        }
        if let Some(handle) = self.repos {
            let _ = handle.await;
        }
    }
}

/// Aggregator-owned mutable state. All mutations go through the lock; the
/// token decides whether a settling source may still write.
#[derive(Debug, Default)]
struct ViewState {
    token: u64,
    query: String,
    company: Option<Company>,
    error: Option<String>,
    profile_loading: bool,
    repos_loading: bool,
}

/// Orchestrates the two remote sources for the current query.
pub struct Aggregator<P, R> {
    profile_source: Arc<P>,
    repo_source: Arc<R>,
    state: Arc<RwLock<ViewState>>,
    events: broadcast::Sender<StateEvent>,
}

impl<P, R> Aggregator<P, R>
where
    P: ProfileSource + 'static,
    R: RepositorySource + 'static,
{
    pub fn new(profile_source: P, repo_source: R) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            profile_source: Arc::new(profile_source),
            repo_source: Arc::new(repo_source),
            state: Arc::new(RwLock::new(ViewState::default())),
            events,
        }
    }

    /// Subscribe to state change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// Get a read-only snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot {
            query: state.query.clone(),
            company: state.company.clone(),
            error: state.error.clone(),
            profile_loading: state.profile_loading,
            repos_loading: state.repos_loading,
        }
    }

    /// Confirm a query: dispatch one profile fetch and one repository fetch
    /// in parallel and merge their results as they arrive.
    ///
    /// An empty query clears the view immediately and dispatches nothing.
    pub fn submit_query(&self, query: &str) -> Submission {
        if query.is_empty() {
            let mut state = self.state.write();
            state.token += 1;
            state.query.clear();
            state.company = None;
            state.error = None;
            state.profile_loading = false;
            state.repos_loading = false;
            drop(state);

            let _ = self.events.send(StateEvent::Cleared);
            return Submission::settled_now();
        }

        let token = {
            let mut state = self.state.write();
            state.token += 1;
            state.query = query.to_string();
            state.error = None;
            state.profile_loading = true;
            state.repos_loading = true;
            state.token
        };

        Submission {
            profile: Some(self.spawn_profile_fetch(query.to_string(), token)),
            repos: Some(self.spawn_repo_fetch(query.to_string(), token)),
        }
    }

    /// Equivalent to submitting the empty query.
    pub fn clear_query(&self) {
        self.submit_query("");
    }

    fn spawn_profile_fetch(&self, query: String, token: u64) -> JoinHandle<()> {
        let source = Arc::clone(&self.profile_source);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = source.fetch_profile(&query).await;

            {
                let mut state = state.write();
                if state.token != token {
                    return;
                }
                state.profile_loading = false;

                match result {
                    Ok(profile) => {
                        state
                            .company
                            .get_or_insert_with(Company::default)
                            .apply_profile(profile);
                        state.error = None;
                    }
                    Err(err) => {
                        // All-or-nothing on the profile path: the error
                        // wipes any repository data already merged in.
                        state.error = Some(err.user_message());
                        state.company = None;
                    }
                }
            }

            let _ = events.send(StateEvent::ProfileSettled);
        })
    }

    fn spawn_repo_fetch(&self, query: String, token: u64) -> JoinHandle<()> {
        let source = Arc::clone(&self.repo_source);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        tokio::spawn(async move {
            // Repository data is secondary: a failed fetch merges as the
            // zero/empty sentinel instead of surfacing an error.
            let data = source.fetch_repositories(&query).await.unwrap_or_else(|e| {
                tracing::warn!("repository lookup for '{query}' failed: {e}");
                RepositoryData::empty()
            });

            {
                let mut state = state.write();
                if state.token != token {
                    return;
                }
                state.repos_loading = false;
                state
                    .company
                    .get_or_insert_with(Company::default)
                    .apply_repositories(data);
            }

            let _ = events.send(StateEvent::ReposSettled);
        })
    }
}
