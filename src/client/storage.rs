//! Client-local durable key/value storage.
//!
//! Reads and writes never fail from the caller's point of view: a broken
//! backing store behaves like an empty one and the problem is logged.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Storage key of the language preference
pub const LANGUAGE_KEY: &str = "language";

/// Storage key of the accessibility settings record
pub const ACCESSIBILITY_KEY: &str = "accessibility-settings";

/// Storage key of the cookie consent decision
pub const CONSENT_KEY: &str = "cookie_consent";

pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile storage, one per session.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Storage persisted as a single JSON object in a file.
///
/// The whole object is rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring malformed storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize storage: {}", e);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create {}: {}", parent.display(), e);
                return;
            }
        }

        match std::fs::write(&self.path, json) {
            Ok(()) => debug!("Storage saved to {}", self.path.display()),
            Err(e) => warn!("Failed to write storage file {}: {}", self.path.display(), e),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== Memory Storage Tests ====================

    #[test]
    fn test_memory_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get(LANGUAGE_KEY), None);

        storage.set(LANGUAGE_KEY, "he");
        assert_eq!(storage.get(LANGUAGE_KEY).as_deref(), Some("he"));

        storage.set(LANGUAGE_KEY, "en");
        assert_eq!(storage.get(LANGUAGE_KEY).as_deref(), Some("en"));

        storage.remove(LANGUAGE_KEY);
        assert_eq!(storage.get(LANGUAGE_KEY), None);
    }

    // ==================== File Storage Tests ====================

    #[test]
    fn test_file_storage_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state/storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set(CONSENT_KEY, "accepted");
        storage.set(LANGUAGE_KEY, "he");

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get(CONSENT_KEY).as_deref(), Some("accepted"));
        assert_eq!(reopened.get(LANGUAGE_KEY).as_deref(), Some("he"));
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set(LANGUAGE_KEY, "he");
        storage.remove(LANGUAGE_KEY);

        assert_eq!(FileStorage::open(&path).get(LANGUAGE_KEY), None);
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get(LANGUAGE_KEY), None);

        // Next write replaces the broken file
        storage.set(LANGUAGE_KEY, "en");
        assert_eq!(
            FileStorage::open(&path).get(LANGUAGE_KEY).as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path().join("absent.json"));

        assert_eq!(storage.get(ACCESSIBILITY_KEY), None);
        assert!(!storage.path().exists());
    }
}
