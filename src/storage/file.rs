//! FileStorage - key-value storage persisted as a JSON object on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

use super::{KeyValueStorage, StorageError};

/// File-backed storage.
///
/// All entries live in one JSON object file. The file is read once when
/// the storage is opened and rewritten in full after every change. An
/// unreadable or corrupt file is logged and treated as empty.
///
/// Default location (see [`FileStorage::default_location`]):
/// - Linux: ~/.config/hero-hub/storage.json
/// - macOS: ~/Library/Application Support/io.herohub.hero-hub/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\herohub\hero-hub\config\storage.json
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStorage {
    /// Open storage at `path`, loading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let cache = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "failed to parse storage file");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "failed to read storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = ?path, entries = cache.len(), "file storage opened");

        Self {
            path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Platform config directory for this application, falling back to
    /// the current directory when none can be determined.
    pub fn default_location() -> PathBuf {
        match ProjectDirs::from("io", "herohub", "hero-hub") {
            Some(dirs) => dirs.config_dir().join("storage.json"),
            None => PathBuf::from("hero_hub_storage.json"),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }

        let data =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Serde(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cache = self
            .cache
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(cache.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        cache.insert(key.to_string(), value.to_string());
        // Held across the write so concurrent saves reach disk in order.
        self.persist(&cache)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        if cache.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&cache)?;
        Ok(true)
    }
}
