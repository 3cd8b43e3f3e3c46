//! Presentation state controller for the joke screen.
//!
//! # Design
//! `JokeStore` owns the observable state inside a `tokio::sync::watch`
//! channel. Every mutation goes through the sender's lock, so updates are
//! serialized and each one notifies subscribers once. The re-entrancy guard
//! is a test-and-set under that same lock: `try_begin` either flips
//! `is_loading` on (clearing the previous error) or changes nothing.
//!
//! `JokeViewModel` pairs a store with a `JokeSource` and drives one load at a
//! time. The fetch runs on a spawned task, so a load always settles once
//! started. There are only two states, idle and loading; "loaded" and "failed"
//! are just what `joke` and `error_message` hold while idle. A failed load
//! leaves the previous joke in place next to the error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::service::JokeService;
use crate::types::Joke;

/// Anything that can produce a joke asynchronously.
///
/// Errors that are a `FetchError` get the fixed user-facing wording; any
/// other error is shown using its own description.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self) -> anyhow::Result<Joke>;
}

#[async_trait]
impl<S: JokeSource + ?Sized> JokeSource for Arc<S> {
    async fn fetch_joke(&self) -> anyhow::Result<Joke> {
        (**self).fetch_joke().await
    }
}

/// Snapshot of everything the rendering layer observes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JokeState {
    pub joke: Option<Joke>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// User-facing text for a failed load.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FetchError>() {
        Some(fetch) => fetch.user_message(),
        None => err.to_string(),
    }
}

/// Single-writer holder of `JokeState`.
#[derive(Debug)]
pub struct JokeStore {
    state: watch::Sender<JokeState>,
}

impl JokeStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(JokeState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> JokeState {
        self.state.borrow().clone()
    }

    /// Receiver that is woken after every state change.
    pub fn subscribe(&self) -> watch::Receiver<JokeState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Enter the loading state. Returns `false`, leaving the state untouched
    /// and without notifying anyone, when a load is already in flight.
    pub fn try_begin(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error_message = None;
            true
        })
    }

    /// Apply the outcome of the in-flight load and return to idle.
    ///
    /// Returns `false` and discards the outcome when no load is in flight.
    pub fn finish(&self, outcome: anyhow::Result<Joke>) -> bool {
        self.state.send_if_modified(|state| {
            if !state.is_loading {
                return false;
            }
            match outcome {
                Ok(joke) => state.joke = Some(joke),
                Err(err) => state.error_message = Some(error_message(&err)),
            }
            state.is_loading = false;
            true
        })
    }

    /// Return to idle without an outcome; used when a load task dies
    /// before it settles.
    fn abandon(&self) {
        let was_loading = self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
        if was_loading {
            warn!("joke load ended without an outcome");
        }
    }
}

impl Default for JokeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks one load as in flight. Settling it applies the outcome; dropping it
/// unsettled (the load task panicked or its runtime shut down) returns the
/// store to idle.
struct InFlight<'a> {
    store: Option<&'a JokeStore>,
}

impl<'a> InFlight<'a> {
    fn new(store: &'a JokeStore) -> Self {
        Self { store: Some(store) }
    }

    fn settle(mut self, outcome: anyhow::Result<Joke>) {
        if let Some(store) = self.store.take() {
            store.finish(outcome);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(store) = self.store.take() {
            store.abandon();
        }
    }
}

struct Shared<S> {
    store: JokeStore,
    source: S,
}

/// Drives loads from a `JokeSource` into a `JokeStore`.
///
/// Each load runs on its own tokio task, so it completes and lands in the
/// state even if the caller stops waiting for it.
pub struct JokeViewModel<S = JokeService> {
    shared: Arc<Shared<S>>,
}

impl JokeViewModel<JokeService> {
    pub fn new() -> Self {
        Self::with_source(JokeService::new())
    }
}

impl Default for JokeViewModel<JokeService> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: JokeSource + 'static> JokeViewModel<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: JokeStore::new(),
                source,
            }),
        }
    }

    pub fn state(&self) -> JokeState {
        self.shared.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<JokeState> {
        self.shared.store.subscribe()
    }

    /// Fetch a new joke unless one is already being fetched.
    ///
    /// Never fails: the outcome lands in the state. A call made while a load
    /// is in flight returns immediately and leaves everything as it was.
    /// Dropping the returned future does not abort the fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn load(&self) {
        if !self.shared.store.try_begin() {
            debug!("joke load already in flight; ignoring");
            return;
        }

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let in_flight = InFlight::new(&shared.store);
            let outcome = shared.source.fetch_joke().await;
            if let Err(err) = &outcome {
                debug!(error = %err, "joke load failed");
            }
            in_flight.settle(outcome);
        });

        if let Err(err) = task.await {
            warn!(error = %err, "joke load task did not complete");
        }
    }
}
