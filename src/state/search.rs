//! Search state manager: current query, results, bounded result cache, and
//! bounded search history.
//!
//! The cache is keyed by the legacy unsanitized `"{term}-{entity}"`
//! concatenation. That allows key collisions (term `"a-b"` with entity `"c"`
//! collides with term `"a"` and entity `"b-c"`); the behavior is kept as-is
//! for compatibility with previously persisted expectations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::sources::{Catalog, SearchCriteria, SearchError};
use crate::state::types::{ENTITIES, Entity, MediaItem, SearchPage};
use crate::storage::{SEARCH_HISTORY_KEY, StorageAdapter};

/// Soft time-to-live for cached search results.
const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
/// Maximum number of cached searches retained after an overflow sweep.
const CACHE_CAPACITY: usize = 50;
/// Maximum number of remembered search terms.
const HISTORY_CAPACITY: usize = 10;
/// Number of history entries surfaced as "recent searches".
const RECENT_DISPLAY: usize = 5;

/// Cached result page with its write timestamp.
///
/// Expiry is soft: entries older than [`CACHE_TTL`] are skipped on lookup but
/// only removed by the overflow sweep or a forced refresh overwrite.
#[derive(Clone, Debug)]
struct CacheEntry {
    /// The cached page.
    data: SearchPage,
    /// When the entry was written.
    timestamp: Instant,
}

/// Pending fetch correlated to the dispatch that planned it.
///
/// The id is checked by [`SearchState::apply_outcome`]; an outcome whose id is
/// no longer current is discarded so a late response cannot clobber the state
/// of a newer search.
#[derive(Clone, Debug)]
pub struct FetchPlan {
    /// Monotonic identifier of the dispatch.
    pub id: u64,
    /// Normalized criteria to send to the gateway.
    pub criteria: SearchCriteria,
    /// Cache key the outcome will be stored under.
    key: String,
    /// Trimmed term recorded into history on success.
    term: String,
}

/// Decision taken by [`SearchState::plan_search`] for one dispatch.
#[derive(Clone, Debug)]
pub enum SearchPlan {
    /// Blank effective term: results were cleared, nothing to fetch.
    Cleared,
    /// A fresh cache entry was served; no network call, no history update.
    Cached,
    /// A gateway call is required; run it and feed the outcome back through
    /// [`SearchState::apply_outcome`].
    Fetch(FetchPlan),
}

/// Holds the search slice of application state.
///
/// All mutation goes through the action methods; the view layer only reads
/// the derived getters. History is persisted through the storage adapter on
/// every change.
pub struct SearchState {
    /// Current search term as typed.
    term: String,
    /// Current entity filter.
    entity: Entity,
    /// Results of the last applied search.
    results: Vec<MediaItem>,
    /// Total count reported for the last applied search.
    result_count: u32,
    /// Whether a search is in flight.
    loading: bool,
    /// Human-readable message of the last failure, if any.
    error: Option<String>,
    /// Unique past terms, most-recent-first, capped at [`HISTORY_CAPACITY`].
    history: Vec<String>,
    /// Bounded query-result cache.
    cache: HashMap<String, CacheEntry>,
    /// Monotonic dispatch counter for stale-response detection.
    query_seq: u64,
    /// Persistence sink for the history list.
    storage: Arc<dyn StorageAdapter>,
}

impl SearchState {
    /// Construct the manager, loading persisted history from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let mut history: Vec<String> = storage
            .get(SEARCH_HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        history.truncate(HISTORY_CAPACITY);
        Self {
            term: String::new(),
            entity: Entity::default(),
            results: Vec::new(),
            result_count: 0,
            loading: false,
            error: None,
            history,
            cache: HashMap::new(),
            query_seq: 0,
            storage,
        }
    }

    /// Resolve a dispatch into a plan, applying any immediate state effects.
    ///
    /// Cache hits younger than the TTL are served directly (results set, error
    /// cleared); otherwise loading is raised, the error cleared, and a
    /// [`FetchPlan`] returned for the caller to execute. `force_refresh`
    /// bypasses the cache lookup entirely.
    pub fn plan_search(
        &mut self,
        term: Option<&str>,
        entity: Option<Entity>,
        force_refresh: bool,
        now: Instant,
    ) -> SearchPlan {
        let term = term.map_or_else(|| self.term.clone(), str::to_string);
        let entity = entity.unwrap_or(self.entity);

        if term.trim().is_empty() {
            self.clear_results();
            return SearchPlan::Cleared;
        }

        // Legacy cache key; see the module docs for the collision caveat.
        let key = format!("{term}-{}", entity.as_key());

        if !force_refresh
            && let Some(entry) = self.cache.get(&key)
            && now.saturating_duration_since(entry.timestamp) < CACHE_TTL
        {
            let page = entry.data.clone();
            debug!(key, result_count = page.result_count, "serving search from cache");
            self.results = page.results;
            self.result_count = page.result_count;
            self.error = None;
            return SearchPlan::Cached;
        }

        self.loading = true;
        self.error = None;
        self.query_seq += 1;
        SearchPlan::Fetch(FetchPlan {
            id: self.query_seq,
            criteria: SearchCriteria::new(term.trim(), entity),
            key,
            term: term.trim().to_string(),
        })
    }

    /// Apply the outcome of an executed [`FetchPlan`].
    ///
    /// Outcomes from superseded dispatches are discarded. For the current
    /// dispatch, loading is reset unconditionally; success stores the results,
    /// records the term into history, and caches the page; failure stores the
    /// error message and clears any stale results.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure after the state has been updated.
    pub fn apply_outcome(
        &mut self,
        plan: &FetchPlan,
        outcome: Result<SearchPage, SearchError>,
        now: Instant,
    ) -> Result<(), SearchError> {
        if plan.id != self.query_seq {
            debug!(
                stale_id = plan.id,
                current_id = self.query_seq,
                "discarding outcome of a superseded search"
            );
            return Ok(());
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                info!(
                    term = %plan.term,
                    result_count = page.result_count,
                    "search succeeded"
                );
                self.results.clone_from(&page.results);
                self.result_count = page.result_count;
                self.add_to_history(&plan.term);
                self.cache_insert(plan.key.clone(), page, now);
                Ok(())
            }
            Err(e) => {
                warn!(term = %plan.term, error = %e, "search failed");
                self.error = Some(e.to_string());
                self.results.clear();
                self.result_count = 0;
                Err(e)
            }
        }
    }

    /// Search the catalog, resolving term and entity from arguments or state.
    ///
    /// Convenience composition of [`Self::plan_search`] and
    /// [`Self::apply_outcome`]; the exclusive borrow serializes dispatches, so
    /// the stale-outcome guard only matters for callers driving the split API
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway failure; the error message is also
    /// stored in the state for display.
    pub async fn search(
        &mut self,
        catalog: &impl Catalog,
        term: Option<&str>,
        entity: Option<Entity>,
        force_refresh: bool,
    ) -> Result<(), SearchError> {
        match self.plan_search(term, entity, force_refresh, Instant::now()) {
            SearchPlan::Cleared | SearchPlan::Cached => Ok(()),
            SearchPlan::Fetch(plan) => {
                let outcome = catalog.search(plan.criteria.clone()).await;
                self.apply_outcome(&plan, outcome, Instant::now())
            }
        }
    }

    /// Set the current search term without dispatching a search.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Set the current entity filter without dispatching a search.
    pub const fn set_entity(&mut self, entity: Entity) {
        self.entity = entity;
    }

    /// Change the entity filter, re-running the current search when a term is
    /// set.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure of the re-run search.
    pub async fn change_entity(
        &mut self,
        catalog: &impl Catalog,
        entity: Entity,
    ) -> Result<(), SearchError> {
        self.entity = entity;
        if self.term.trim().is_empty() {
            return Ok(());
        }
        self.search(catalog, None, None, false).await
    }

    /// Clear the term and all result state.
    pub fn clear_search(&mut self) {
        self.term.clear();
        self.clear_results();
    }

    /// Clear only the error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop all remembered search terms and the persisted copy.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.storage.remove(SEARCH_HISTORY_KEY);
    }

    /// Current search term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Current entity filter.
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    /// Results of the last applied search.
    #[must_use]
    pub fn results(&self) -> &[MediaItem] {
        &self.results
    }

    /// Total result count reported by the last applied search.
    #[must_use]
    pub const fn result_count(&self) -> u32 {
        self.result_count
    }

    /// Whether any results are present.
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Whether an error message is set.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The stored error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// One-line status for the results header.
    ///
    /// Priority: loading, then error, then empty results, then a pluralized
    /// count of the reported total.
    #[must_use]
    pub fn search_summary(&self) -> String {
        if self.loading {
            return "Searching...".to_string();
        }
        if self.error.is_some() {
            return "Search failed".to_string();
        }
        if self.results.is_empty() {
            return "No results".to_string();
        }
        if self.result_count == 1 {
            "1 result found".to_string()
        } else {
            format!("{} results found", self.result_count)
        }
    }

    /// Full search history, most-recent-first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The first [`RECENT_DISPLAY`] history entries.
    #[must_use]
    pub fn recent_searches(&self) -> &[String] {
        &self.history[..self.history.len().min(RECENT_DISPLAY)]
    }

    /// Entities selectable in the UI, in display order.
    #[must_use]
    pub const fn entities() -> &'static [Entity] {
        &ENTITIES
    }

    /// Reset results, count, and error.
    fn clear_results(&mut self) {
        self.results.clear();
        self.result_count = 0;
        self.error = None;
    }

    /// Record `term` into history: most-recent-first, unique, capped.
    ///
    /// Re-inserting a known term is a no-op (it does not move to the front).
    /// Persists through the storage adapter only when the list changed.
    fn add_to_history(&mut self, term: &str) {
        if term.is_empty() || self.history.iter().any(|t| t == term) {
            return;
        }
        self.history.insert(0, term.to_string());
        self.history.truncate(HISTORY_CAPACITY);
        match serde_json::to_string(&self.history) {
            Ok(raw) => self.storage.set(SEARCH_HISTORY_KEY, &raw),
            Err(e) => warn!(error = %e, "failed to serialize search history"),
        }
    }

    /// Insert a cache entry, sweeping to the [`CACHE_CAPACITY`]
    /// most-recently-written entries on overflow.
    fn cache_insert(&mut self, key: String, data: SearchPage, now: Instant) {
        self.cache.insert(key, CacheEntry { data, timestamp: now });
        if self.cache.len() > CACHE_CAPACITY {
            let mut entries: Vec<(String, CacheEntry)> = self.cache.drain().collect();
            entries.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
            entries.truncate(CACHE_CAPACITY);
            debug!(retained = entries.len(), "cache overflow sweep");
            self.cache.extend(entries);
        }
    }
}
