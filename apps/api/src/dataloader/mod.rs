//! Request-scoped batch loading
//!
//! [`BatchLoader`] coalesces every `load` issued during one scheduler tick into
//! a single call of the wrapped [`Loader`], then caches each key's outcome
//! (including "not found") for the rest of the request.
//!
//! The batch window is closed from inside the caller's task:
//! - the first `load` that queues a key becomes the window's leader
//! - every other `load` only queues its key (or joins the waiters of a key
//!   that is already queued or in flight)
//! - the leader yields once (or sleeps `batch_delay`), drains the queue and
//!   hands the drained keys to a fetch task
//!
//! async-graphql polls sibling fields and list items with `join_all` inside
//! the request's task, so by the time the leader is polled again every sibling
//! load has been queued, whichever worker thread runs the task. A leader
//! dropped before draining passes the open window to a detached flush.

mod grouped;

pub use grouped::{Grouped, GroupedLoader};

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::try_join_all;
use kinship_shared_config::LoaderConfig;
use thiserror::Error;
use tokio::sync::oneshot;

/// Bounds every loader key must satisfy
pub trait LoaderKey: Send + Sync + Hash + Eq + Clone + fmt::Debug + 'static {}

impl<T> LoaderKey for T where T: Send + Sync + Hash + Eq + Clone + fmt::Debug + 'static {}

/// Bulk fetch wrapped by a [`BatchLoader`]
pub trait Loader<K: LoaderKey>: Send + Sync + 'static {
    /// Value resolved for a single key
    type Value: Send + Sync + 'static;

    /// Error raised by the underlying store
    type Error: Send + Sync + 'static;

    /// Fetch all `keys` in one round trip.
    ///
    /// `keys` is de-duplicated. Keys absent from the returned map resolve to `None`.
    fn load(
        &self,
        keys: &[K],
    ) -> impl Future<Output = Result<HashMap<K, Self::Value>, Self::Error>> + Send;
}

/// Failure of a [`BatchLoader::load`] call
#[derive(Debug, Error)]
pub enum LoadError<E> {
    /// The bulk fetch for the batch containing this key failed
    #[error("batch fetch failed: {0}")]
    Fetch(Arc<E>),

    /// The fetch ended without resolving this key
    #[error("batch flush ended before resolving the key")]
    Dropped,
}

impl<E> Clone for LoadError<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Fetch(err) => Self::Fetch(Arc::clone(err)),
            Self::Dropped => Self::Dropped,
        }
    }
}

/// Outcome delivered to every waiter of a key
pub type LoadResult<V, E> = Result<Option<Arc<V>>, LoadError<E>>;

type Waiter<V, E> = oneshot::Sender<LoadResult<V, E>>;

struct State<K, V, E> {
    /// Settled keys. `None` records a confirmed miss.
    cache: HashMap<K, Option<Arc<V>>>,
    /// Everyone waiting on a queued or in-flight key
    waiters: HashMap<K, Vec<Waiter<V, E>>>,
    /// Keys queued since the last drain, in first-request order
    queued: Vec<K>,
    /// Some load (or detached flush) owns the open window
    leading: bool,
}

struct Shared<K: LoaderKey, L: Loader<K>> {
    name: &'static str,
    loader: L,
    config: LoaderConfig,
    state: Mutex<State<K, L::Value, L::Error>>,
}

/// Per-request batching and caching facade over a [`Loader`]
///
/// Cloning is cheap; clones share the same queue and cache.
pub struct BatchLoader<K: LoaderKey, L: Loader<K>> {
    shared: Arc<Shared<K, L>>,
}

impl<K: LoaderKey, L: Loader<K>> Clone for BatchLoader<K, L> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K: LoaderKey, L: Loader<K>> BatchLoader<K, L> {
    /// Create a loader with default tuning
    pub fn new(name: &'static str, loader: L) -> Self {
        Self::with_config(name, loader, LoaderConfig::default())
    }

    /// Create a loader with explicit batch delay and batch size
    pub fn with_config(name: &'static str, loader: L, config: LoaderConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                loader,
                config,
                state: Mutex::new(State {
                    cache: HashMap::new(),
                    waiters: HashMap::new(),
                    queued: Vec::new(),
                    leading: false,
                }),
            }),
        }
    }

    /// Load a single key, batching with every other load issued this tick.
    ///
    /// Returns `Ok(None)` when the store has no row for `key`. A settled key
    /// returns the cached `Arc` without touching the store.
    pub async fn load(&self, key: K) -> LoadResult<L::Value, L::Error> {
        let (receiver, leader) = {
            let mut state = self.shared.lock();

            if let Some(cached) = state.cache.get(&key) {
                return Ok(cached.clone());
            }

            let (sender, receiver) = oneshot::channel();
            match state.waiters.get_mut(&key) {
                Some(waiters) => waiters.push(sender),
                None => {
                    state.waiters.insert(key.clone(), vec![sender]);
                    state.queued.push(key);
                }
            }

            let leader = !state.leading && !state.queued.is_empty();
            if leader {
                state.leading = true;
            }

            (receiver, leader)
        };

        if leader {
            Leadership::new(Arc::clone(&self.shared)).close_window().await;
        }

        receiver.await.unwrap_or(Err(LoadError::Dropped))
    }

    /// Load several keys concurrently, preserving input order
    pub async fn load_many<I>(&self, keys: I) -> Result<Vec<Option<Arc<L::Value>>>, LoadError<L::Error>>
    where
        I: IntoIterator<Item = K>,
    {
        try_join_all(keys.into_iter().map(|key| self.load(key))).await
    }

    /// Drop the cached outcome for `key` so the next load refetches it
    pub fn clear(&self, key: &K) {
        self.shared.lock().cache.remove(key);
    }

    /// Drop every cached outcome
    pub fn clear_all(&self) {
        self.shared.lock().cache.clear();
    }

    /// Seed the cache with a known value, replacing any cached outcome
    pub fn prime(&self, key: K, value: L::Value) {
        self.shared.lock().cache.insert(key, Some(Arc::new(value)));
    }

    /// Whether `key` has a settled outcome in the cache
    pub fn is_cached(&self, key: &K) -> bool {
        self.shared.lock().cache.contains_key(key)
    }
}

impl<K: LoaderKey, L: Loader<K>> Shared<K, L> {
    fn lock(&self) -> MutexGuard<'_, State<K, L::Value, L::Error>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn wait_window(&self) {
        if self.config.batch_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.config.batch_delay).await;
        }
    }

    /// Close the window: take the queued keys and give up leadership
    fn drain(&self) -> Vec<K> {
        let mut state = self.lock();
        state.leading = false;
        std::mem::take(&mut state.queued)
    }

    /// Fetch drained keys on a detached task that outlives the leader
    fn dispatch(self: Arc<Self>, keys: Vec<K>) {
        if keys.is_empty() {
            return;
        }
        tokio::spawn(async move { self.fetch(keys).await });
    }

    async fn fetch(&self, keys: Vec<K>) {
        if keys.is_empty() {
            return;
        }

        tracing::debug!(loader = self.name, keys = keys.len(), "flushing batch");

        let mut in_flight = InFlight {
            shared: self,
            keys: &keys,
            settled: 0,
        };

        for chunk in keys.chunks(self.config.max_batch_size.max(1)) {
            let outcome = self.loader.load(chunk).await;
            self.settle(chunk, outcome);
            in_flight.settled += chunk.len();
        }
    }

    fn settle(&self, keys: &[K], outcome: Result<HashMap<K, L::Value>, L::Error>) {
        let mut state = self.lock();

        match outcome {
            Ok(mut values) => {
                for key in keys {
                    let value = values.remove(key).map(Arc::new);
                    state.cache.insert(key.clone(), value.clone());
                    for waiter in state.waiters.remove(key).unwrap_or_default() {
                        let _ = waiter.send(Ok(value.clone()));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(loader = self.name, keys = keys.len(), "batch fetch failed");
                let err = LoadError::Fetch(Arc::new(err));
                for key in keys {
                    for waiter in state.waiters.remove(key).unwrap_or_default() {
                        let _ = waiter.send(Err(err.clone()));
                    }
                }
            }
        }
    }
}

/// Ownership of an open batch window, held by the leading `load`
struct Leadership<K: LoaderKey, L: Loader<K>> {
    shared: Option<Arc<Shared<K, L>>>,
}

impl<K: LoaderKey, L: Loader<K>> Leadership<K, L> {
    fn new(shared: Arc<Shared<K, L>>) -> Self {
        Self {
            shared: Some(shared),
        }
    }

    async fn close_window(mut self) {
        if let Some(shared) = self.shared.as_deref() {
            shared.wait_window().await;
        }
        if let Some(shared) = self.shared.take() {
            let keys = shared.drain();
            shared.dispatch(keys);
        }
    }
}

impl<K: LoaderKey, L: Loader<K>> Drop for Leadership<K, L> {
    fn drop(&mut self) {
        let Some(shared) = self.shared.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(loader = shared.name, "leader dropped, flushing detached");
                handle.spawn(async move {
                    shared.wait_window().await;
                    let keys = shared.drain();
                    shared.fetch(keys).await;
                });
            }
            Err(_) => {
                let keys = shared.drain();
                let mut state = shared.lock();
                for key in &keys {
                    state.waiters.remove(key);
                }
            }
        }
    }
}

/// Releases the waiters of unsettled keys if a fetch is torn down early
/// (panicking fetch or runtime shutdown), so their loads fail instead of hanging.
struct InFlight<'a, K: LoaderKey, L: Loader<K>> {
    shared: &'a Shared<K, L>,
    keys: &'a [K],
    settled: usize,
}

impl<K: LoaderKey, L: Loader<K>> Drop for InFlight<'_, K, L> {
    fn drop(&mut self) {
        if self.settled >= self.keys.len() {
            return;
        }

        let mut state = self.shared.lock();
        for key in &self.keys[self.settled..] {
            state.waiters.remove(key);
        }
        drop(state);

        tracing::warn!(
            loader = self.shared.name,
            unsettled = self.keys.len() - self.settled,
            "flush aborted before settling all keys"
        );
    }
}
