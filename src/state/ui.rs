//! UI state manager: presentation state independent of search and favorites.
//!
//! Notifications expire through a tick-driven sweep: each entry carries an
//! absolute expiry instant and [`UiState::expire_notifications`] drops the
//! ones past due. A timeout of exactly 0 marks the entry sticky.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::state::types::{MediaItem, Notification, NotificationKind, View, ViewMode};
use crate::storage::{DARK_MODE_KEY, StorageAdapter};

/// Default notification display duration in milliseconds.
const NOTIFICATION_TIMEOUT_MS: u64 = 5000;
/// Default number of results shown per page.
const DEFAULT_RESULTS_PER_PAGE: u32 = 24;

/// Holds the presentation slice of application state.
///
/// Only the dark-mode flag persists across sessions; everything else is
/// per-session.
pub struct UiState {
    /// Dark theme enabled.
    dark_mode: bool,
    /// Navigation drawer visibility.
    drawer_open: bool,
    /// Active top-level view.
    current_view: View,
    /// Search results display mode.
    search_view: ViewMode,
    /// Results per page.
    results_per_page: u32,
    /// Current 1-based page.
    current_page: u32,
    /// Queued notifications in arrival order.
    notifications: Vec<Notification>,
    /// Next notification id.
    next_notification_id: u64,
    /// Preview modal: the item when shown, `None` when hidden. Visibility and
    /// the item reference are one value, so the modal cannot be shown empty.
    preview: Option<MediaItem>,
    /// Whole-app loading indicator.
    app_loading: bool,
    /// Persistence sink for the dark-mode flag.
    storage: Arc<dyn StorageAdapter>,
}

impl UiState {
    /// Construct the manager, loading the persisted dark-mode flag.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let dark_mode = storage
            .get(DARK_MODE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);
        Self {
            dark_mode,
            drawer_open: false,
            current_view: View::default(),
            search_view: ViewMode::default(),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            current_page: 1,
            notifications: Vec::new(),
            next_notification_id: 1,
            preview: None,
            app_loading: false,
            storage,
        }
    }

    /// Set and persist the dark-mode flag.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        match serde_json::to_string(&enabled) {
            Ok(raw) => self.storage.set(DARK_MODE_KEY, &raw),
            Err(e) => warn!(error = %e, "failed to serialize dark mode flag"),
        }
    }

    /// Flip and persist the dark-mode flag.
    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    /// Whether the dark theme is enabled.
    #[must_use]
    pub const fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Set the drawer visibility.
    pub const fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }

    /// Flip the drawer visibility.
    pub const fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Whether the drawer is open.
    #[must_use]
    pub const fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Navigate to a top-level view.
    pub const fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }

    /// Active top-level view.
    #[must_use]
    pub const fn current_view(&self) -> View {
        self.current_view
    }

    /// Whether the search view is active.
    #[must_use]
    pub fn is_search_view(&self) -> bool {
        self.current_view == View::Search
    }

    /// Whether the favorites view is active.
    #[must_use]
    pub fn is_favorites_view(&self) -> bool {
        self.current_view == View::Favorites
    }

    /// Whether the about view is active.
    #[must_use]
    pub fn is_about_view(&self) -> bool {
        self.current_view == View::About
    }

    /// Set the search results display mode.
    pub const fn set_search_view(&mut self, mode: ViewMode) {
        self.search_view = mode;
    }

    /// Active search results display mode.
    #[must_use]
    pub const fn search_view_mode(&self) -> ViewMode {
        self.search_view
    }

    /// Whether results render as a grid.
    #[must_use]
    pub fn is_grid_view(&self) -> bool {
        self.search_view == ViewMode::Grid
    }

    /// Whether results render as a list.
    #[must_use]
    pub fn is_list_view(&self) -> bool {
        self.search_view == ViewMode::List
    }

    /// Set the page size, snapping back to the first page.
    pub const fn set_results_per_page(&mut self, count: u32) {
        self.results_per_page = count;
        self.current_page = 1;
    }

    /// Jump to a 1-based page.
    pub const fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }

    /// Current page size and 1-based page number.
    #[must_use]
    pub const fn pagination(&self) -> (u32, u32) {
        (self.results_per_page, self.current_page)
    }

    /// Queue a notification and return its id.
    ///
    /// `timeout_ms` defaults to [`NOTIFICATION_TIMEOUT_MS`]; an explicit 0
    /// makes the notification sticky (never swept).
    pub fn push_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        timeout_ms: Option<u64>,
        now: Instant,
    ) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        let timeout_ms = timeout_ms.unwrap_or(NOTIFICATION_TIMEOUT_MS);
        let expires_at = (timeout_ms != 0).then(|| now + Duration::from_millis(timeout_ms));
        self.notifications.push(Notification {
            id,
            kind,
            message: message.into(),
            timeout_ms,
            expires_at,
        });
        id
    }

    /// Remove the notification with `id`; absent ids are a no-op.
    pub fn remove_notification(&mut self, id: u64) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Remove every queued notification.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Drop notifications whose expiry has passed. Called from the driving
    /// loop's tick.
    pub fn expire_notifications(&mut self, now: Instant) {
        self.notifications
            .retain(|n| n.expires_at.is_none_or(|at| at > now));
    }

    /// Queued notifications in arrival order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Whether any notification is queued.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    /// Show the preview modal for `item`.
    pub fn show_preview(&mut self, item: MediaItem) {
        self.preview = Some(item);
    }

    /// Hide the preview modal and drop the item reference.
    pub fn hide_preview(&mut self) {
        self.preview = None;
    }

    /// The previewed item when the modal is shown.
    #[must_use]
    pub const fn preview(&self) -> Option<&MediaItem> {
        self.preview.as_ref()
    }

    /// Set the whole-app loading indicator.
    pub const fn set_app_loading(&mut self, loading: bool) {
        self.app_loading = loading;
    }

    /// Whether the whole-app loading indicator is raised.
    #[must_use]
    pub const fn is_app_loading(&self) -> bool {
        self.app_loading
    }
}
