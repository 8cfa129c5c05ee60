//! Search coordinator: the state machine and the single in-flight request
//!
//! The coordinator owns [`SearchState`] and is its only writer. Every call
//! to [`SearchCoordinator::perform_search`] bumps a generation counter and
//! a completing fetch is applied only if its captured generation still
//! matches; aborting the previous task is best-effort, the generation
//! comparison is what actually keeps stale completions out of the visible
//! state.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::fetch::{FetchError, Fetcher};
use crate::model::{Category, SearchConfig, SearchOutcome, SearchState, parser, ranker};

/// Coordinates catalog searches against the store endpoint
pub struct SearchCoordinator {
    fetcher: Arc<dyn Fetcher>,
    config: SearchConfig,
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<SearchState>,
    outcome_handler: Mutex<Option<Arc<dyn Fn(SearchOutcome) + Send + Sync>>>,
}

struct Inner {
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

/// Critical sections under these locks never panic, so a poisoned lock can
/// only mean an aborted task; recover the guard instead of unwrapping.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SearchCoordinator {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: SearchConfig) -> Self {
        let (state_tx, _) = watch::channel(SearchState::NotSearched);
        Self {
            fetcher,
            config,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    generation: 0,
                    in_flight: None,
                }),
                state_tx,
                outcome_handler: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current search state
    pub fn state(&self) -> SearchState {
        self.shared.state_tx.borrow().clone()
    }

    /// Push-style state notifications for the presentation layer
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state_tx.subscribe()
    }

    /// Register the observer called with the outcome of every completed,
    /// non-superseded search
    pub fn set_outcome_handler(&self, handler: impl Fn(SearchOutcome) + Send + Sync + 'static) {
        *lock(&self.shared.outcome_handler) = Some(Arc::new(handler));
    }

    /// Schedule a search, superseding any search still in flight
    ///
    /// Returns after spawning the fetch; the caller observes `Loading`
    /// immediately. Text that trims to empty means no search was submitted
    /// and leaves the state untouched. Must be called on a Tokio runtime.
    pub fn perform_search(&self, text: &str, category: Category) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let url = self.build_url(text, category);
        tracing::debug!(%url, "Performing search");

        let mut inner = lock(&self.shared.inner);
        inner.generation += 1;
        let generation = inner.generation;

        if let Some(task) = inner.in_flight.take() {
            // Best-effort: the transport may still deliver a completion,
            // which the generation check then discards.
            task.abort();
        }

        self.shared.state_tx.send_replace(SearchState::Loading);

        let fetcher = self.fetcher.clone();
        let shared = self.shared.clone();
        inner.in_flight = Some(tokio::spawn(async move {
            let result = fetcher.fetch(&url).await;
            apply_completion(&shared, generation, result);
        }));
    }

    fn build_url(&self, text: &str, category: Category) -> String {
        let mut url = format!(
            "{}?term={}&limit={}",
            self.config.base_url,
            urlencoding::encode(text),
            self.config.result_limit
        );
        if let Some(token) = category.entity_token() {
            url.push_str("&entity=");
            url.push_str(token);
        }
        url
    }
}

/// Apply one fetch completion to the shared state, unless it is stale
fn apply_completion(shared: &Shared, generation: u64, result: Result<Vec<u8>, FetchError>) {
    let outcome = {
        let mut inner = lock(&shared.inner);
        if generation != inner.generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Discarding stale search completion"
            );
            return;
        }
        inner.in_flight = None;

        match result {
            Err(FetchError::Cancelled) => {
                // A newer search owns the next visible state.
                tracing::debug!(generation, "Search fetch cancelled");
                None
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Search fetch failed");
                shared.state_tx.send_replace(SearchState::NotSearched);
                Some(SearchOutcome::NetworkError)
            }
            Ok(bytes) => {
                let results = ranker::rank(parser::parse(&bytes));
                tracing::info!(generation, count = results.len(), "Search completed");
                let state = if results.is_empty() {
                    SearchState::NoResults
                } else {
                    SearchState::Results(results)
                };
                shared.state_tx.send_replace(state);
                Some(SearchOutcome::Ok)
            }
        }
    };

    // Notify outside the lock so a handler may call back into the
    // coordinator.
    if let Some(outcome) = outcome {
        let handler = lock(&shared.outcome_handler).clone();
        if let Some(handler) = handler {
            handler(outcome);
        }
    }
}
