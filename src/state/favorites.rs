//! Favorites state manager: a persisted, deduplicated list of favorited
//! catalog items keyed by their derived identifier.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::state::types::{
    FavoriteItem, FavoritesBreakdown, FavoritesFilter, MediaItem, WrapperKind,
};
use crate::storage::{FAVORITES_KEY, StorageAdapter};

/// Holds the favorites slice of application state.
///
/// The list is most-recent-first and persisted through the storage adapter on
/// every mutation. Uniqueness is by shared concrete identifier: an incoming
/// item is a duplicate when its track, collection, or artist id matches an
/// existing favorite's same field.
pub struct FavoritesState {
    /// Favorited items, most-recent-first.
    favorites: Vec<FavoriteItem>,
    /// Active list filter.
    filter: FavoritesFilter,
    /// Persistence sink for the favorites list.
    storage: Arc<dyn StorageAdapter>,
}

impl FavoritesState {
    /// Construct the manager, loading persisted favorites from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let favorites: Vec<FavoriteItem> = storage
            .get(FAVORITES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            favorites,
            filter: FavoritesFilter::default(),
            storage,
        }
    }

    /// Add `item` to the front of the list unless a favorite already shares
    /// one of its identifiers. Items carrying no identifier at all cannot be
    /// keyed and are skipped.
    pub fn add(&mut self, item: MediaItem) {
        if self.favorites.iter().any(|f| f.item.shares_identifier(&item)) {
            debug!("item already favorited; not adding again");
            return;
        }
        let Some(id) = item.derived_id() else {
            warn!("item has no track, collection, or artist id; cannot favorite");
            return;
        };
        self.favorites.insert(
            0,
            FavoriteItem {
                item,
                favorited_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                id,
            },
        );
        self.persist();
    }

    /// Remove the favorite with derived id `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: u64) {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);
        if self.favorites.len() != before {
            self.persist();
        }
    }

    /// Remove every favorite and the persisted copy.
    pub fn clear(&mut self) {
        self.favorites.clear();
        self.storage.remove(FAVORITES_KEY);
    }

    /// Remove `item` when favorited, add it otherwise.
    pub fn toggle(&mut self, item: MediaItem) {
        if let Some(id) = item.derived_id()
            && self.favorites.iter().any(|f| f.id == id)
        {
            self.remove(id);
        } else {
            self.add(item);
        }
    }

    /// Set the active list filter.
    pub const fn set_filter(&mut self, filter: FavoritesFilter) {
        self.filter = filter;
    }

    /// Active list filter.
    #[must_use]
    pub const fn filter(&self) -> FavoritesFilter {
        self.filter
    }

    /// The unfiltered list, most-recent-first.
    #[must_use]
    pub fn list(&self) -> &[FavoriteItem] {
        &self.favorites
    }

    /// The list restricted to the active filter.
    #[must_use]
    pub fn filtered(&self) -> Vec<&FavoriteItem> {
        let wanted = match self.filter {
            FavoritesFilter::All => return self.favorites.iter().collect(),
            FavoritesFilter::Albums => WrapperKind::Collection,
            FavoritesFilter::Artists => WrapperKind::Artist,
            FavoritesFilter::Songs => WrapperKind::Track,
        };
        self.favorites
            .iter()
            .filter(|f| f.item.wrapper_kind() == wanted)
            .collect()
    }

    /// Number of favorites, unfiltered.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Whether `item` is favorited, matched by its derived id.
    #[must_use]
    pub fn is_favorite(&self, item: &MediaItem) -> bool {
        item.derived_id()
            .is_some_and(|id| self.favorites.iter().any(|f| f.id == id))
    }

    /// Per-kind favorite counts.
    #[must_use]
    pub fn counts_by_type(&self) -> FavoritesBreakdown {
        let mut breakdown = FavoritesBreakdown::default();
        for f in &self.favorites {
            match f.item.wrapper_kind() {
                WrapperKind::Collection => breakdown.albums += 1,
                WrapperKind::Artist => breakdown.artists += 1,
                WrapperKind::Track => breakdown.songs += 1,
                WrapperKind::Other => breakdown.other += 1,
            }
        }
        breakdown
    }

    /// Write the current list through the storage adapter.
    fn persist(&self) {
        match serde_json::to_string(&self.favorites) {
            Ok(raw) => self.storage.set(FAVORITES_KEY, &raw),
            Err(e) => warn!(error = %e, "failed to serialize favorites"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FavoritesState;
    use crate::state::types::{FavoritesFilter, MediaItem};
    use crate::storage::{FAVORITES_KEY, MemoryStore, StorageAdapter};
    use std::sync::Arc;

    fn track(id: u64, name: &str) -> MediaItem {
        MediaItem {
            wrapper_type: Some("track".to_string()),
            track_id: Some(id),
            track_name: Some(name.to_string()),
            ..MediaItem::default()
        }
    }

    fn album(id: u64, artist_id: u64) -> MediaItem {
        MediaItem {
            wrapper_type: Some("collection".to_string()),
            collection_id: Some(id),
            artist_id: Some(artist_id),
            ..MediaItem::default()
        }
    }

    fn artist(id: u64) -> MediaItem {
        MediaItem {
            wrapper_type: Some("artist".to_string()),
            artist_id: Some(id),
            ..MediaItem::default()
        }
    }

    fn state() -> FavoritesState {
        FavoritesState::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    /// What: Adding prepends with a derived id and skips duplicates
    ///
    /// - Input: A track added twice, then an album sharing the track's artist
    /// - Output: One entry for the track; the album rejected via the shared
    ///   artist id
    fn add_dedups_by_shared_identifier() {
        let mut s = state();
        let item = MediaItem {
            artist_id: Some(7),
            ..track(1, "Come Together")
        };
        s.add(item.clone());
        s.add(item);
        assert_eq!(s.count(), 1);
        assert_eq!(s.list()[0].id, 1);
        assert!(!s.list()[0].favorited_at.is_empty());

        // Shares artist id 7 with the existing favorite.
        s.add(album(42, 7));
        assert_eq!(s.count(), 1);

        // No identifiers at all: unkeyable, skipped.
        s.add(MediaItem::default());
        assert_eq!(s.count(), 1);
    }

    #[test]
    /// What: Newest favorites sit at the front of the list
    ///
    /// - Input: Two favorites added in order
    /// - Output: The second one first
    fn add_prepends() {
        let mut s = state();
        s.add(track(1, "one"));
        s.add(track(2, "two"));
        assert_eq!(s.list()[0].id, 2);
        assert_eq!(s.list()[1].id, 1);
    }

    #[test]
    /// What: Removal by id, including the absent-id no-op
    ///
    /// - Input: Remove an existing id, then an unknown id
    /// - Output: List shrinks once; second removal changes nothing
    fn remove_by_id_and_absent_noop() {
        let mut s = state();
        s.add(track(1, "one"));
        s.add(track(2, "two"));
        s.remove(1);
        assert_eq!(s.count(), 1);
        s.remove(99);
        assert_eq!(s.count(), 1);
    }

    #[test]
    /// What: Toggling twice restores the original list
    ///
    /// - Input: Toggle the same item twice on a one-favorite state
    /// - Output: Item present after the first toggle pair resolves back out
    fn toggle_round_trip() {
        let mut s = state();
        s.add(track(1, "one"));
        let item = track(2, "two");
        s.toggle(item.clone());
        assert!(s.is_favorite(&item));
        assert_eq!(s.count(), 2);
        s.toggle(item.clone());
        assert!(!s.is_favorite(&item));
        assert_eq!(s.count(), 1);
        assert_eq!(s.list()[0].id, 1);
    }

    #[test]
    /// What: Filtering and the per-kind breakdown
    ///
    /// - Input: A track, an album, an artist, and an unknown-kind favorite
    /// - Output: Filters isolate each kind; breakdown counts all four buckets
    fn filter_and_breakdown() {
        let mut s = state();
        s.add(track(1, "song"));
        s.add(album(2, 100));
        s.add(artist(3));
        s.add(MediaItem {
            wrapper_type: Some("audiobook".to_string()),
            collection_id: Some(4),
            ..MediaItem::default()
        });
        assert_eq!(s.filtered().len(), 4);
        s.set_filter(FavoritesFilter::Songs);
        assert_eq!(s.filtered().len(), 1);
        assert_eq!(s.filtered()[0].id, 1);
        s.set_filter(FavoritesFilter::Albums);
        assert_eq!(s.filtered()[0].id, 2);
        s.set_filter(FavoritesFilter::Artists);
        assert_eq!(s.filtered()[0].id, 3);

        let b = s.counts_by_type();
        assert_eq!((b.albums, b.artists, b.songs, b.other), (1, 1, 1, 1));
    }

    #[test]
    /// What: Favorites persist and reload through the storage adapter
    ///
    /// - Input: One favorite added, a fresh manager over the same store, then
    ///   `clear`
    /// - Output: Reloaded manager sees the favorite; clear removes the key
    fn persistence_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let mut s = FavoritesState::load(Arc::clone(&store) as Arc<dyn StorageAdapter>);
        s.add(track(1, "one"));
        assert!(store.get(FAVORITES_KEY).is_some());

        let reloaded = FavoritesState::load(Arc::clone(&store) as Arc<dyn StorageAdapter>);
        assert_eq!(reloaded.count(), 1);
        assert_eq!(reloaded.list()[0].item.track_name.as_deref(), Some("one"));

        let mut s = reloaded;
        s.clear();
        assert_eq!(s.count(), 0);
        assert_eq!(store.get(FAVORITES_KEY), None);
    }
}
