//! Record Store
//!
//! Owns the current page of characters and orchestrates resolution of their
//! links through the [`ResourceCache`]. All presentation code reads and writes
//! characters through this type.

use crate::model::Character;
use crate::resource::{has_id, record_id, same_resource, LinkedResource, ResourceCache};
use crate::swapi::{format_api_error, SwapiClient};
use anyhow::{bail, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Records per page served by the people listing
pub const PAGE_SIZE: u64 = 10;

/// Number of pages needed to show `count` records
pub fn page_count(count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// A character together with the link payloads resolved for it
///
/// `resources` holds one entry per link URL; `None` marks a link that could
/// not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: Character,
    pub resources: HashMap<String, Option<LinkedResource>>,
}

impl CharacterRecord {
    /// Resolved payload for a link URL, if any
    pub fn resource(&self, url: &str) -> Option<&LinkedResource> {
        self.resources.get(url).and_then(Option::as_ref)
    }

    /// Short id derived from the record's URL
    pub fn id(&self) -> Option<&str> {
        record_id(&self.character.url)
    }
}

#[derive(Default)]
struct StoreState {
    characters: Vec<CharacterRecord>,
    /// Records fetched by id that are not part of the current page
    detached: Vec<CharacterRecord>,
    count: u64,
    /// Page fetches that have started and not yet finished
    in_progress: usize,
    /// Bumped by every page fetch and reset; only the latest fetch publishes
    page_generation: u64,
    last_error: Option<String>,
    revision: u64,
}

impl StoreState {
    fn find(&self, id: &str) -> Option<&CharacterRecord> {
        self.characters
            .iter()
            .chain(self.detached.iter())
            .find(|r| has_id(&r.character.url, id))
    }

    fn find_url(&self, url: &str) -> Option<&CharacterRecord> {
        self.characters
            .iter()
            .chain(self.detached.iter())
            .find(|r| same_resource(&r.character.url, url))
    }
}

/// Counts one page fetch as in progress until finished or dropped
struct LoadingGuard<'a> {
    store: &'a RecordStore,
    finished: bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(store: &'a RecordStore, state: &mut StoreState) -> Self {
        state.in_progress += 1;
        Self {
            store,
            finished: false,
        }
    }

    /// Release under a lock the caller already holds
    fn finish(mut self, state: &mut StoreState) {
        state.in_progress = state.in_progress.saturating_sub(1);
        self.finished = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let mut state = self.store.lock();
            state.in_progress = state.in_progress.saturating_sub(1);
        }
    }
}

/// Shared handle to the record store
#[derive(Clone)]
pub struct RecordStore {
    client: SwapiClient,
    cache: ResourceCache,
    state: Arc<Mutex<StoreState>>,
}

impl RecordStore {
    pub fn new(client: SwapiClient) -> Self {
        let cache = ResourceCache::new(client.clone());
        Self {
            client,
            cache,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    // =========================================================================
    // Page loading
    // =========================================================================

    /// Fetch a page of characters and resolve every link on it
    ///
    /// The page is published in one step once all links have settled. On a
    /// listing failure the previous page is kept and the error is recorded in
    /// [`last_error`](Self::last_error). A fetch overtaken by a later fetch or
    /// by [`reset_page`](Self::reset_page) publishes nothing.
    pub async fn fetch_page(&self, page: u32, search: &str) {
        let (generation, loading) = {
            let mut state = self.lock();
            state.page_generation = state.page_generation.wrapping_add(1);
            state.last_error = None;
            let loading = LoadingGuard::start(self, &mut state);
            (state.page_generation, loading)
        };
        tracing::info!("Fetching page {} (search: {:?})", page, search);

        match self.client.list_people(page, search).await {
            Ok(listing) => {
                if !self.is_current(generation) {
                    tracing::debug!("Page {} superseded before link resolution", page);
                    return;
                }

                let records = join_all(
                    listing
                        .results
                        .into_iter()
                        .map(|character| self.resolve_links(character)),
                )
                .await;

                let mut state = self.lock();
                loading.finish(&mut state);
                if state.page_generation != generation {
                    tracing::debug!("Page {} superseded, not publishing", page);
                    return;
                }

                let unresolved = records
                    .iter()
                    .flat_map(|r| r.resources.values())
                    .filter(|r| r.is_none())
                    .count();
                tracing::info!(
                    "Publishing page {}: {} characters, {} total, {} unresolved links",
                    page,
                    records.len(),
                    listing.count,
                    unresolved
                );

                state.characters = records;
                state.count = listing.count;
                state.revision += 1;
            }
            Err(e) => {
                tracing::error!("Failed to fetch characters: {:#}", e);
                let mut state = self.lock();
                loading.finish(&mut state);
                if state.page_generation != generation {
                    return;
                }
                state.last_error = Some(format_api_error(&e));
                state.revision += 1;
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().page_generation == generation
    }

    /// Resolve every link of `character` through the shared cache
    pub async fn resolve_links(&self, character: Character) -> CharacterRecord {
        let resources: HashMap<String, Option<LinkedResource>> = {
            let links = character.link_urls();
            let resolved = join_all(
                links
                    .iter()
                    .map(|link| self.cache.resolve(link.url, link.kind)),
            )
            .await;

            links
                .iter()
                .map(|link| link.url.to_string())
                .zip(resolved)
                .collect()
        };

        CharacterRecord {
            character,
            resources,
        }
    }

    /// Clear the current page and the resource cache
    pub fn reset_page(&self) {
        {
            let mut state = self.lock();
            state.characters.clear();
            state.count = 0;
            state.page_generation = state.page_generation.wrapping_add(1);
            state.revision += 1;
        }
        self.cache.reset();
    }

    // =========================================================================
    // Record lookup and edits
    // =========================================================================

    /// Look up a record by short id in the current page or among records
    /// fetched directly
    pub fn get_record(&self, id: &str) -> Option<CharacterRecord> {
        self.lock().find(id).cloned()
    }

    /// Return the record for `id`, fetching it directly when it is not held
    ///
    /// Links are resolved through the shared cache, so anything already
    /// resolved while browsing pages is reused. The fetched record is held
    /// under its canonical URL, so `"05"` and `"5"` share one entry.
    pub async fn load_record(&self, id: &str) -> Result<CharacterRecord> {
        if let Some(record) = self.get_record(id) {
            tracing::debug!("Character {} served from store", id);
            return Ok(record);
        }

        tracing::info!("Character {} not in store, fetching directly", id);
        let character = self.client.get_person(id).await?;
        if record_id(&character.url).is_none() {
            bail!("Character {} has no resource URL", id);
        }
        if let Some(existing) = self.lock().find_url(&character.url) {
            tracing::debug!("Character {} already held as {}", id, character.url);
            return Ok(existing.clone());
        }
        let record = self.resolve_links(character).await;

        let mut state = self.lock();
        if let Some(existing) = state.find_url(&record.character.url) {
            // Another caller stored it while we were fetching.
            return Ok(existing.clone());
        }
        state.detached.push(record.clone());
        state.revision += 1;
        Ok(record)
    }

    /// Replace the held record whose URL matches `record`'s
    ///
    /// Local only; nothing is sent to the API. Unknown URLs are ignored.
    pub fn update_record(&self, record: CharacterRecord) {
        let mut state = self.lock();
        let StoreState {
            characters,
            detached,
            ..
        } = &mut *state;

        let slot = characters
            .iter_mut()
            .chain(detached.iter_mut())
            .find(|r| same_resource(&r.character.url, &record.character.url));

        match slot {
            Some(slot) => {
                tracing::debug!("Updated character {}", record.character.url);
                *slot = record;
            }
            None => {
                tracing::debug!(
                    "Ignoring update for character not in store: {}",
                    record.character.url
                );
            }
        }
        state.revision += 1;
    }

    /// Cached payload for a link URL
    pub fn get_resource_data(&self, url: &str) -> Option<LinkedResource> {
        self.cache.get(url)
    }

    /// Overwrite a cached link payload
    pub fn update_resource_data(&self, url: &str, resource: LinkedResource) {
        self.cache.put(url, resource);
        self.lock().revision += 1;
    }

    // =========================================================================
    // Observable state
    // =========================================================================

    pub fn characters(&self) -> Vec<CharacterRecord> {
        self.lock().characters.clone()
    }

    pub fn count(&self) -> u64 {
        self.lock().count
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.count(), PAGE_SIZE)
    }

    /// True while any page fetch is in progress
    pub fn loading(&self) -> bool {
        self.lock().in_progress > 0
    }

    /// User-facing message for the last failed page fetch
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Incremented once per published page, failed fetch and mutation
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }
}
