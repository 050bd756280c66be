//! Resource Cache
//!
//! URL-keyed store of resolved linked resources. At most one fetch per URL is
//! ever outstanding: the first resolver installs a shared pending future and
//! every later resolver of the same URL awaits that same future.

use super::kinds::{LinkedResource, ResourceKind};
use crate::swapi::SwapiClient;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type PendingFetch = Shared<BoxFuture<'static, Option<LinkedResource>>>;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, LinkedResource>,
    in_flight: HashMap<String, PendingFetch>,
    /// Bumped on every reset; fetches started under an older generation
    /// never write into the map.
    generation: u64,
    /// Number of network fetches issued since creation
    fetches: u64,
}

/// Shared handle to the resource cache
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct ResourceCache {
    client: SwapiClient,
    state: Arc<Mutex<CacheState>>,
}

impl ResourceCache {
    pub fn new(client: SwapiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached resource for `url`, fetching it if needed
    ///
    /// Failures are logged and yield `None`; they are not remembered, so a
    /// later call retries.
    pub async fn resolve(&self, url: &str, kind: ResourceKind) -> Option<LinkedResource> {
        let pending = {
            let mut state = self.lock();

            if let Some(resource) = state.entries.get(url) {
                tracing::trace!("Cache hit: {}", url);
                return Some(resource.clone());
            }

            match state.in_flight.get(url) {
                Some(pending) => {
                    tracing::trace!("Joining in-flight fetch: {}", url);
                    pending.clone()
                }
                None => {
                    let pending = fetch_and_store(
                        self.client.clone(),
                        Arc::clone(&self.state),
                        url.to_string(),
                        kind,
                        state.generation,
                    )
                    .boxed()
                    .shared();
                    state.in_flight.insert(url.to_string(), pending.clone());
                    state.fetches += 1;
                    pending
                }
            }
        };

        pending.await
    }

    /// Non-fetching lookup
    pub fn get(&self, url: &str) -> Option<LinkedResource> {
        self.lock().entries.get(url).cloned()
    }

    /// Insert or overwrite an entry without touching the network
    pub fn put(&self, url: &str, resource: LinkedResource) {
        tracing::debug!("Local update of {} {}", resource.kind(), url);
        self.lock().entries.insert(url.to_string(), resource);
    }

    /// Drop every entry and forget in-flight fetches
    pub fn reset(&self) {
        let mut state = self.lock();
        tracing::debug!(
            "Resetting resource cache ({} entries, {} in flight)",
            state.entries.len(),
            state.in_flight.len()
        );
        state.entries.clear();
        state.in_flight.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().entries.contains_key(url)
    }

    pub fn is_in_flight(&self, url: &str) -> bool {
        self.lock().in_flight.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Network fetches issued over the cache's lifetime
    pub fn fetch_count(&self) -> u64 {
        self.lock().fetches
    }
}

async fn fetch_and_store(
    client: SwapiClient,
    state: Arc<Mutex<CacheState>>,
    url: String,
    kind: ResourceKind,
    generation: u64,
) -> Option<LinkedResource> {
    let fetched = match client
        .get(&url)
        .await
        .and_then(|value| LinkedResource::decode(kind, value))
    {
        Ok(resource) => Some(resource),
        Err(e) => {
            tracing::warn!("Failed to resolve {} {}: {:#}", kind, url, e);
            None
        }
    };

    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.generation != generation {
        tracing::debug!("Discarding {} fetched before a cache reset", url);
        return fetched;
    }

    state.in_flight.remove(&url);
    let resource = fetched?;

    // A local edit made while the fetch was pending takes precedence.
    Some(state.entries.entry(url).or_insert(resource).clone())
}
