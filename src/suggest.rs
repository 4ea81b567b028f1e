//! Debounced suggestion fetcher.
//!
//! Converts a raw text-input stream into a rate-limited stream of
//! autocomplete lookups against the profile source. Trailing-edge debounce:
//! each input change restarts a single fixed-delay timer, and only the
//! value present when the timer fires is looked up. The empty string
//! bypasses the debounce entirely and clears the list at once.
//!
//! The state machine has two states, idle (no timer armed) and pending
//! (timer armed), realized as a background tokio task over an input
//! channel. At most one timer is armed and at most one request is tracked
//! at any time; a request's result is applied only if no newer timer has
//! fired (and no clear has happened) since it was dispatched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::sources::ProfileSource;
use crate::types::Suggestion;

/// Quiet interval before a pending input is looked up.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Debounced autocomplete driver.
///
/// Dropping the handle closes the input channel and ends the background
/// task after any armed timer or tracked request resolves.
pub struct SuggestionDebouncer {
    input_tx: mpsc::UnboundedSender<String>,
    suggestions_rx: watch::Receiver<Vec<Suggestion>>,
}

impl SuggestionDebouncer {
    /// Spawn the debounce task with the standard 500ms delay.
    pub fn spawn<S>(source: S) -> Self
    where
        S: ProfileSource + 'static,
    {
        Self::with_delay(source, DEBOUNCE_DELAY)
    }

    /// Spawn the debounce task with a custom delay (tests use short ones).
    pub fn with_delay<S>(source: S, delay: Duration) -> Self
    where
        S: ProfileSource + 'static,
    {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (suggestions_tx, suggestions_rx) = watch::channel(Vec::new());

        tokio::spawn(run_debounce_loop(
            input_rx,
            Arc::new(source),
            suggestions_tx,
            delay,
        ));

        Self {
            input_tx,
            suggestions_rx,
        }
    }

    /// Feed one raw input change into the debouncer.
    pub fn input(&self, text: &str) {
        let _ = self.input_tx.send(text.to_string());
    }

    /// Watch the current suggestion list. The receiver always holds the
    /// latest published list; intermediate lists may be skipped.
    pub fn suggestions(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.suggestions_rx.clone()
    }
}

/// Background loop: idle/pending timer state plus at most one tracked
/// request, invalidated by generation number.
async fn run_debounce_loop<S>(
    mut input_rx: mpsc::UnboundedReceiver<String>,
    source: Arc<S>,
    suggestions_tx: watch::Sender<Vec<Suggestion>>,
    delay: Duration,
) where
    S: ProfileSource + 'static,
{
    // Pending input, present exactly while the timer is armed.
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();
    // Bumped on every dispatch and every clear; a completed request whose
    // generation no longer matches is discarded (last-write-wins by
    // completion order).
    let mut generation: u64 = 0;
    let mut in_flight: Option<JoinHandle<(u64, Vec<Suggestion>)>> = None;

    loop {
        tokio::select! {
            changed = input_rx.recv() => {
                match changed {
                    None => break,
                    Some(text) if text.is_empty() => {
                        // Clears bypass the debounce: drop the timer,
                        // invalidate anything in flight, publish empty now.
                        pending = None;
                        generation += 1;
                        let _ = suggestions_tx.send(Vec::new());
                    }
                    Some(text) => {
                        pending = Some(text);
                        deadline = Instant::now() + delay;
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                let text = pending.take().expect("pending input when timer fires");
                generation += 1;
                let fired = generation;
                let source = Arc::clone(&source);

                in_flight = Some(tokio::spawn(async move {
                    // Suggestion failures are never user-visible: they
                    // collapse to an empty list.
                    let items = source.fetch_suggestions(&text).await.unwrap_or_default();
                    (fired, items)
                }));
            }
            result = async { in_flight.as_mut().expect("in-flight request").await },
                if in_flight.is_some() =>
            {
                in_flight = None;
                if let Ok((fired, items)) = result
                    && fired == generation
                {
                    let _ = suggestions_tx.send(items);
                }
            }
        }
    }
}
