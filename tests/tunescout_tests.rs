//! End-to-end flows over the public API: the composition root, a scripted
//! catalog, and the in-memory storage adapter. No test touches the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use tunescout::sources::{Catalog, SearchCriteria, SearchError};
use tunescout::state::{AppState, Entity, MediaItem, NotificationKind, SearchPage};
use tunescout::storage::{
    FAVORITES_KEY, FileStore, MemoryStore, SEARCH_HISTORY_KEY, StorageAdapter,
};

/// Catalog fake that counts calls and replays a fixed response.
struct ScriptedCatalog {
    calls: AtomicU32,
    response: Result<SearchPage, SearchError>,
}

impl ScriptedCatalog {
    fn ok(page: SearchPage) -> Self {
        Self {
            calls: AtomicU32::new(0),
            response: Ok(page),
        }
    }

    fn failing(err: SearchError) -> Self {
        Self {
            calls: AtomicU32::new(0),
            response: Err(err),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Catalog for ScriptedCatalog {
    async fn search(&self, _criteria: SearchCriteria) -> Result<SearchPage, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

fn track(id: u64, name: &str) -> MediaItem {
    MediaItem {
        wrapper_type: Some("track".to_string()),
        track_id: Some(id),
        track_name: Some(name.to_string()),
        artist_name: Some("The Beatles".to_string()),
        ..MediaItem::default()
    }
}

fn one_track_page(id: u64, name: &str) -> SearchPage {
    SearchPage {
        results: vec![track(id, name)],
        result_count: 1,
    }
}

fn new_app() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = AppState::load(Arc::clone(&store) as Arc<dyn StorageAdapter>);
    (app, store)
}

#[tokio::test]
async fn search_flow_populates_results_history_and_cache() {
    let (mut app, store) = new_app();
    let catalog = ScriptedCatalog::ok(one_track_page(1, "Come Together"));

    app.search
        .search(&catalog, Some("  beatles  "), Some(Entity::Song), false)
        .await
        .expect("search succeeds");

    assert!(app.search.has_results());
    assert_eq!(app.search.search_summary(), "1 result found");
    assert_eq!(app.search.history(), ["beatles"]);
    assert_eq!(
        store.get(SEARCH_HISTORY_KEY).as_deref(),
        Some("[\"beatles\"]")
    );

    // Same query again: served from cache, no second gateway call.
    app.search
        .search(&catalog, Some("  beatles  "), Some(Entity::Song), false)
        .await
        .expect("cached search succeeds");
    assert_eq!(catalog.calls(), 1);

    // Forced refresh always goes out.
    app.search
        .search(&catalog, Some("  beatles  "), Some(Entity::Song), true)
        .await
        .expect("forced search succeeds");
    assert_eq!(catalog.calls(), 2);
}

#[tokio::test]
async fn failed_search_clears_results_and_surfaces_the_message() {
    let (mut app, _store) = new_app();
    let good = ScriptedCatalog::ok(one_track_page(1, "Come Together"));
    app.search
        .search(&good, Some("beatles"), None, false)
        .await
        .expect("seed results");
    assert!(app.search.has_results());

    let bad = ScriptedCatalog::failing(SearchError::ServiceUnavailable);
    let err = app
        .search
        .search(&bad, Some("stones"), None, false)
        .await
        .expect_err("search fails");
    assert_eq!(err, SearchError::ServiceUnavailable);
    assert!(!app.search.has_results());
    assert!(!app.search.is_loading());
    assert_eq!(app.search.search_summary(), "Search failed");
    assert_eq!(app.search.error(), Some(err.to_string().as_str()));
    // The failed term never reaches history.
    assert_eq!(app.search.history(), ["beatles"]);
}

#[tokio::test]
async fn blank_search_clears_without_calling_the_gateway() {
    let (mut app, _store) = new_app();
    let catalog = ScriptedCatalog::ok(one_track_page(1, "Come Together"));
    app.search
        .search(&catalog, Some("beatles"), None, false)
        .await
        .expect("seed results");

    app.search
        .search(&catalog, Some("   "), None, false)
        .await
        .expect("blank clears");
    assert!(!app.search.has_results());
    assert_eq!(app.search.search_summary(), "No results");
    assert_eq!(catalog.calls(), 1, "blank term must not hit the gateway");
}

#[test]
fn favorites_survive_an_application_restart() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut app = AppState::load(Arc::clone(&store) as Arc<dyn StorageAdapter>);
        app.favorites.toggle(track(1, "Come Together"));
        app.favorites.toggle(track(2, "Something"));
        assert_eq!(app.favorites.count(), 2);
    }
    let raw = store.get(FAVORITES_KEY).expect("favorites persisted");
    assert!(raw.contains("favoritedAt"));
    assert!(raw.contains("\"trackId\":1"));

    let mut app = AppState::load(Arc::clone(&store) as Arc<dyn StorageAdapter>);
    assert_eq!(app.favorites.count(), 2);
    assert!(app.favorites.is_favorite(&track(1, "Come Together")));

    // Toggling an already-favorited item removes it again.
    app.favorites.toggle(track(1, "Come Together"));
    assert_eq!(app.favorites.count(), 1);
}

#[test]
fn state_slices_persist_through_a_file_store() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StorageAdapter> = Arc::new(FileStore::new(tmp.path().to_path_buf()));
    {
        let mut app = AppState::load(Arc::clone(&store));
        app.ui.set_dark_mode(true);
        app.favorites.add(track(1, "Come Together"));
    }
    assert!(tmp.path().join("darkMode.json").is_file());
    assert!(tmp.path().join("favorites.json").is_file());

    let app = AppState::load(store);
    assert!(app.ui.is_dark_mode());
    assert_eq!(app.favorites.count(), 1);
}

#[test]
fn notifications_expire_on_the_tick_sweep() {
    let (mut app, _store) = new_app();
    let now = Instant::now();
    let sticky = app
        .ui
        .push_notification(NotificationKind::Warning, "stays", Some(0), now);
    app.ui
        .push_notification(NotificationKind::Info, "goes", Some(100), now);
    assert_eq!(app.ui.notifications().len(), 2);

    app.ui
        .expire_notifications(now + std::time::Duration::from_millis(101));
    assert_eq!(app.ui.notifications().len(), 1);
    assert_eq!(app.ui.notifications()[0].id, sticky);
}
