//! Read-through, write-invalidated entity cache.
//!
//! Entries have no TTL: they live until [`EntityCache::invalidate`] removes
//! them. Concurrent loads of the same uncached key coalesce onto a single
//! in-flight fetch (singleflight); loads of different keys never block each
//! other. Load failures are never cached, so a not-found result cannot
//! poison later lookups once the entity exists.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::OnceCell;

type Flight<V, E> = Arc<OnceCell<Result<V, E>>>;

/// Per-key load coordination state.
///
/// `generation` is bumped by every invalidation; a load only publishes its
/// result if the generation it observed before fetching is still current.
/// That makes `invalidate` linearizable with in-flight loads: either the
/// load started after the invalidation (and fetched fresh data) or its
/// result is discarded.
struct KeyState<V, E> {
    generation: u64,
    flight: Option<Flight<V, E>>,
}

impl<V, E> Default for KeyState<V, E> {
    fn default() -> Self {
        Self {
            generation: 0,
            flight: None,
        }
    }
}

/// Read-through cache keyed by entity id.
///
/// Lock order is `loads` then `entries`; the read fast path touches only
/// `entries`.
pub struct EntityCache<K, V, E> {
    entries: RwLock<HashMap<K, V>>,
    loads: Mutex<HashMap<K, KeyState<V, E>>>,
}

impl<K, V, E> EntityCache<K, V, E>
where
    K: Clone + Eq + Hash,
    V: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            loads: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, or compute it via `load`, cache it,
    /// and return it.
    ///
    /// At most one `load` runs per key at a time; concurrent callers on the
    /// same uncached key wait for the in-flight load and receive its result
    /// or its failure.
    pub async fn get_or_load<F, Fut>(&self, key: &K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.entries.read().unwrap().get(key) {
            return Ok(value.clone());
        }

        // Join the in-flight load for this key, or open a new one.
        let flight = {
            let mut loads = self.loads.lock().unwrap();
            let state = loads.entry(key.clone()).or_default();
            state
                .flight
                .get_or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let result = flight
            .get_or_init(|| async {
                // A finished flight may have populated the entry between our
                // miss and joining; serve it without another fetch.
                if let Some(value) = self.entries.read().unwrap().get(key) {
                    return Ok(value.clone());
                }

                let generation = self.generation_of(key);
                let result = load().await;

                if let Ok(value) = &result {
                    let mut loads = self.loads.lock().unwrap();
                    let state = loads.entry(key.clone()).or_default();
                    if state.generation == generation {
                        self.entries
                            .write()
                            .unwrap()
                            .insert(key.clone(), value.clone());
                    }
                }

                result
            })
            .await
            .clone();

        self.retire(key, &flight);
        result
    }

    /// Remove any cached entry for `key`.
    ///
    /// Must be called as part of every successful update or delete of the
    /// entity, before the write is reported complete.
    pub fn invalidate(&self, key: &K) {
        let mut loads = self.loads.lock().unwrap();
        if let Some(state) = loads.get_mut(key) {
            state.generation += 1;
            state.flight = None;
        }
        self.entries.write().unwrap().remove(key);
    }

    fn generation_of(&self, key: &K) -> u64 {
        self.loads
            .lock()
            .unwrap()
            .get(key)
            .map(|state| state.generation)
            .unwrap_or(0)
    }

    /// Close out a completed flight so a failed load is not sticky.
    fn retire(&self, key: &K, flight: &Flight<V, E>) {
        let mut loads = self.loads.lock().unwrap();
        if let Some(state) = loads.get_mut(key) {
            if state
                .flight
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, flight))
            {
                state.flight = None;
            }
        }
    }
}

impl<K, V, E> Default for EntityCache<K, V, E>
where
    K: Clone + Eq + Hash,
    V: Clone,
    E: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
