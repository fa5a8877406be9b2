//! Storage - durable key-value blobs for client-side state.
//!
//! A storage holds string values under string keys, the same contract a
//! browser's local storage offers. The favorites store keeps its whole
//! membership under a single key.
//!
//! ## Example
//!
//! ```ignore
//! use hero_hub::{InMemoryStorage, KeyValueStorage};
//!
//! let storage = InMemoryStorage::new();
//! storage.save("hero-hub-favorites", r#"["1","2"]"#)?;
//! let raw = storage.load("hero-hub-favorites")?;
//! ```

mod file;
mod in_memory;

use thiserror::Error;

/// Abstract string key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`. Returns None if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying I/O failed (file system, quota, device).
    #[error("storage io error: {0}")]
    Io(String),
    /// Stored data could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serde(String),
    /// A lock guarding the storage was poisoned.
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
