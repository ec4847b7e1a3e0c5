//! Core value types used by tunescout state.

use std::time::Instant;

/// Category filter sent to the catalog search endpoint.
///
/// Mirrors the entities selectable in the search UI; the wire value is the
/// camel-case key returned by [`Entity::as_key`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Album collections.
    #[default]
    Album,
    /// Artists.
    MusicArtist,
    /// Individual songs.
    Song,
    /// Music videos.
    MusicVideo,
    /// Podcast shows.
    Podcast,
}

/// All selectable entities in display order.
pub const ENTITIES: [Entity; 5] = [
    Entity::Album,
    Entity::MusicArtist,
    Entity::Song,
    Entity::MusicVideo,
    Entity::Podcast,
];

impl Entity {
    /// Return the wire/config key for this entity.
    ///
    /// Inputs: none
    ///
    /// Output: Static key string as sent to the catalog API.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::MusicArtist => "musicArtist",
            Self::Song => "song",
            Self::MusicVideo => "musicVideo",
            Self::Podcast => "podcast",
        }
    }

    /// Parse an entity from its wire key or common aliases.
    ///
    /// Inputs: `s` key string (case-insensitive).
    ///
    /// Output: `Some(Entity)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "album" | "albums" => Some(Self::Album),
            "musicartist" | "artist" | "artists" => Some(Self::MusicArtist),
            "song" | "songs" | "track" => Some(Self::Song),
            "musicvideo" | "video" => Some(Self::MusicVideo),
            "podcast" | "podcasts" => Some(Self::Podcast),
            _ => None,
        }
    }

    /// Human-readable label for entity pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Album => "Albums",
            Self::MusicArtist => "Artists",
            Self::Song => "Songs",
            Self::MusicVideo => "Music Videos",
            Self::Podcast => "Podcasts",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Broad record kind derived from a catalog item's `wrapperType` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapperKind {
    /// Album or other collection record.
    Collection,
    /// Artist record.
    Artist,
    /// Song or other track record.
    Track,
    /// Anything else (podcasts, unknown wrapper types, missing field).
    Other,
}

/// Single catalog search result record.
///
/// All fields are optional: the catalog returns a different subset per record
/// kind, and unknown fields are ignored on deserialization. This is compact
/// enough to render in result lists; favorites carry the same fields plus
/// bookkeeping (see [`FavoriteItem`]).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Record kind discriminator: `collection`, `artist`, or `track`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_type: Option<String>,
    /// Finer-grained kind (e.g., `song`, `music-video`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Track identifier, present on track records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u64>,
    /// Collection identifier, present on album/collection records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    /// Artist identifier, present on most records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u64>,
    /// Track title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    /// Album/collection title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Artist name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    /// 100x100 artwork URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url100: Option<String>,
    /// Audio/video preview URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Primary genre label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
    /// Release date as reported by the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MediaItem {
    /// First available identifier among track, collection, and artist ids.
    ///
    /// This is the derived id favorites are keyed by; records carrying none of
    /// the three cannot be favorited.
    #[must_use]
    pub const fn derived_id(&self) -> Option<u64> {
        match (self.track_id, self.collection_id, self.artist_id) {
            (Some(id), _, _) | (None, Some(id), _) | (None, None, Some(id)) => Some(id),
            (None, None, None) => None,
        }
    }

    /// Whether `self` and `other` share any concrete identifier.
    ///
    /// A field only matches when present on both sides; two records that both
    /// lack an identifier are never considered the same item.
    #[must_use]
    pub fn shares_identifier(&self, other: &Self) -> bool {
        fn eq_some(a: Option<u64>, b: Option<u64>) -> bool {
            matches!((a, b), (Some(x), Some(y)) if x == y)
        }
        eq_some(self.track_id, other.track_id)
            || eq_some(self.collection_id, other.collection_id)
            || eq_some(self.artist_id, other.artist_id)
    }

    /// Broad record kind from the `wrapperType` discriminator.
    #[must_use]
    pub fn wrapper_kind(&self) -> WrapperKind {
        match self.wrapper_type.as_deref() {
            Some("collection") => WrapperKind::Collection,
            Some("artist") => WrapperKind::Artist,
            Some("track") => WrapperKind::Track,
            _ => WrapperKind::Other,
        }
    }

    /// Best available display title: track, then collection, then artist name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.track_name
            .as_deref()
            .or(self.collection_name.as_deref())
            .or(self.artist_name.as_deref())
            .unwrap_or("")
    }
}

/// One page of catalog search results.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Matching records in catalog rank order.
    #[serde(default)]
    pub results: Vec<MediaItem>,
    /// Total result count reported by the catalog.
    #[serde(default)]
    pub result_count: u32,
}

/// Favorited catalog item with bookkeeping fields.
///
/// Serializes with the original item fields flattened alongside `favoritedAt`
/// and the derived `id`, matching the persisted favorites array shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    /// The favorited catalog record.
    #[serde(flatten)]
    pub item: MediaItem,
    /// RFC 3339 UTC timestamp of when the item was favorited.
    pub favorited_at: String,
    /// Derived identifier (first of track, collection, artist id).
    pub id: u64,
}

/// Filter applied to the favorites list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FavoritesFilter {
    /// No filtering.
    #[default]
    All,
    /// Collection records only.
    Albums,
    /// Artist records only.
    Artists,
    /// Track records only.
    Songs,
}

impl FavoritesFilter {
    /// Return the string key used for this filter.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Albums => "albums",
            Self::Artists => "artists",
            Self::Songs => "songs",
        }
    }

    /// Parse a filter from its key (case-insensitive).
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "albums" => Some(Self::Albums),
            "artists" => Some(Self::Artists),
            "songs" => Some(Self::Songs),
            _ => None,
        }
    }
}

/// Per-kind favorite counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FavoritesBreakdown {
    /// Collection records.
    pub albums: usize,
    /// Artist records.
    pub artists: usize,
    /// Track records.
    pub songs: usize,
    /// Everything else.
    pub other: usize,
}

/// Top-level application view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Search view.
    #[default]
    Search,
    /// Favorites view.
    Favorites,
    /// About view.
    About,
}

/// Display mode for search results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Grid of cards.
    #[default]
    Grid,
    /// Flat list.
    List,
}

/// Severity/kind of a queued notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational message.
    #[default]
    Info,
    /// Success confirmation.
    Success,
    /// Recoverable warning.
    Warning,
    /// Error message.
    Error,
}

/// Queued UI notification.
#[derive(Clone, Debug)]
pub struct Notification {
    /// Monotonic identifier assigned by the UI state manager.
    pub id: u64,
    /// Severity/kind.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
    /// Requested display duration in milliseconds; 0 means sticky.
    pub timeout_ms: u64,
    /// Absolute expiry instant; `None` for sticky notifications.
    pub expires_at: Option<Instant>,
}
