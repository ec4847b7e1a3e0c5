//! Application state, split per slice.
//!
//! Each slice (search, favorites, UI) is owned by its own manager struct and
//! mutated only through that manager's action methods; the managers are
//! gathered under [`AppState`], the composition root handed to whatever drives
//! the application. There are no module-level singletons.

pub mod favorites;
pub mod search;
pub mod types;
pub mod ui;

use std::sync::Arc;

use crate::storage::StorageAdapter;

pub use favorites::FavoritesState;
pub use search::{FetchPlan, SearchPlan, SearchState};
pub use types::{
    ENTITIES, Entity, FavoriteItem, FavoritesBreakdown, FavoritesFilter, MediaItem, Notification,
    NotificationKind, SearchPage, View, ViewMode, WrapperKind,
};
pub use ui::UiState;

/// Composition root owning one manager per state slice.
///
/// The managers share the storage adapter but persist disjoint keys, keeping
/// the single-writer-per-slice discipline intact.
pub struct AppState {
    /// Search slice: query, results, cache, history.
    pub search: SearchState,
    /// Favorites slice: persisted favorites list.
    pub favorites: FavoritesState,
    /// UI slice: presentation state.
    pub ui: UiState,
}

impl AppState {
    /// Construct all managers, loading their persisted slices from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            search: SearchState::load(Arc::clone(&storage)),
            favorites: FavoritesState::load(Arc::clone(&storage)),
            ui: UiState::load(storage),
        }
    }
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
