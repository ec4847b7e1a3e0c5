//! Persistence adapter for state managers.
//!
//! State managers never touch the filesystem directly; they write through the
//! [`StorageAdapter`] trait after each mutating action. The file-backed store
//! mirrors how persisted lists live as JSON files under the config directory,
//! while [`MemoryStore`] keeps everything in-process for tests and ephemeral
//! sessions.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Storage key for the persisted favorites list (JSON array).
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key for the persisted search history (JSON array of strings).
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";
/// Storage key for the persisted dark-mode flag (JSON boolean).
pub const DARK_MODE_KEY: &str = "darkMode";

/// Key-value string store consumed by the state managers.
///
/// Failures are absorbed by implementations (logged, never propagated) so that
/// state transitions stay infallible.
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Delete the value stored under `key`; absent keys are a no-op.
    fn remove(&self, key: &str);
}

/// File-backed store keeping one JSON file per key under a base directory.
pub struct FileStore {
    /// Directory holding one `<key>.json` file per storage key.
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on the
    /// first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File path backing `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageAdapter for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "failed to create storage directory");
            return;
        }
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, value) {
            warn!(path = %path.display(), error = %e, "failed to persist storage key");
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// In-memory store for tests and sessions that should not persist anything.
#[derive(Default)]
pub struct MemoryStore {
    /// Backing map guarded for shared use across managers.
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut m) = self.map.lock() {
            m.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut m) = self.map.lock() {
            m.remove(key);
        }
    }
}
