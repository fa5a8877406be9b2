use std::sync::Arc;

use event_emitter_rs::EventEmitter;

use super::notice::{FavoritesNotice, NoticeKind, NOTICE_EVENT};
use super::persister::{PersistStats, Persister};
use super::set::{FavoriteSet, FavoriteSetError};
use super::{FAVORITES_STORAGE_KEY, MAX_FAVORITES};
use crate::storage::KeyValueStorage;

/// Bounded, persisted favorites with change notifications.
///
/// Mutations update the in-memory set synchronously, queue a snapshot
/// for the background writer, then notify listeners. Persistence
/// failures are logged by the writer and never surface here.
///
/// ## Example
///
/// ```ignore
/// use hero_hub::{FavoritesStore, InMemoryStorage};
///
/// let mut store = FavoritesStore::open(InMemoryStorage::new());
///
/// store.subscribe(|notice| {
///     println!("{}: {}", notice.title, notice.description);
/// });
///
/// store.toggle("70", Some("Batman"));
/// assert!(store.is_favorite("70"));
/// ```
pub struct FavoritesStore {
    set: FavoriteSet,
    emitter: EventEmitter,
    persister: Persister,
    revision: u64,
}

impl FavoritesStore {
    /// Open the store, loading any persisted favorites from `storage`.
    ///
    /// Never fails: missing, unreadable or malformed data starts the
    /// store empty.
    pub fn open<S>(storage: S) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(storage);
        let set = FavoriteSet::from_persisted(load_persisted(storage.as_ref()));

        Self {
            set,
            emitter: EventEmitter::new(),
            persister: Persister::spawn(storage, FAVORITES_STORAGE_KEY),
            revision: 0,
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    /// Add `id` to the favorites.
    ///
    /// Returns false without changing anything if `id` is already a
    /// favorite or the limit is reached; the latter also raises a
    /// `LimitReached` notice.
    pub fn add(&mut self, id: &str, display_name: Option<&str>) -> bool {
        match self.set.insert(id) {
            Ok(()) => {
                self.persist();
                self.notify(FavoritesNotice::added(display_name, self.set.ids()));
                true
            }
            Err(FavoriteSetError::AlreadyPresent(_)) => false,
            Err(FavoriteSetError::CapacityReached { max }) => {
                tracing::debug!(id, max, "favorites limit reached");
                self.notify(FavoritesNotice::limit_reached(display_name, self.set.ids()));
                false
            }
        }
    }

    /// Remove `id` from the favorites. Returns false if it was not one.
    pub fn remove(&mut self, id: &str, display_name: Option<&str>) -> bool {
        if !self.set.remove(id) {
            return false;
        }
        self.persist();
        self.notify(FavoritesNotice::removed(display_name, self.set.ids()));
        true
    }

    /// Remove `id` if it is a favorite, otherwise add it.
    pub fn toggle(&mut self, id: &str, display_name: Option<&str>) -> bool {
        if self.is_favorite(id) {
            self.remove(id, display_name)
        } else {
            self.add(id, display_name)
        }
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.persist();
        self.notify(FavoritesNotice::cleared());
    }

    /// Favorite identifiers, oldest first.
    pub fn favorites(&self) -> &[String] {
        self.set.ids()
    }

    pub fn count(&self) -> usize {
        self.set.len()
    }

    pub fn max_favorites(&self) -> usize {
        MAX_FAVORITES
    }

    pub fn can_add_more(&self) -> bool {
        !self.set.is_full()
    }

    /// Register a listener for every notice. Returns the listener id.
    ///
    /// Listeners run on emitter threads, so notices can arrive out of
    /// order. Each notice carries a `revision` that grows with every
    /// emit; drop any notice older than the last one seen.
    pub fn subscribe<F>(&mut self, listener: F) -> String
    where
        F: Fn(FavoritesNotice) + Send + Sync + 'static,
    {
        self.emitter.on(NOTICE_EVENT, listener)
    }

    /// Register a listener for one kind of notice. Returns the listener id.
    pub fn on<F>(&mut self, kind: NoticeKind, listener: F) -> String
    where
        F: Fn(FavoritesNotice) + Send + Sync + 'static,
    {
        self.emitter.on(kind.event_name(), listener)
    }

    /// Remove a listener by id. Returns true if it was registered.
    pub fn unsubscribe(&mut self, listener_id: &str) -> bool {
        self.emitter.remove_listener(listener_id).is_some()
    }

    /// Flush queued writes and stop the background writer.
    pub fn close(mut self) -> PersistStats {
        self.persister.finish()
    }

    fn persist(&self) {
        match serde_json::to_string(self.set.ids()) {
            Ok(snapshot) => self.persister.submit(snapshot),
            Err(e) => tracing::warn!(error = %e, "failed to serialize favorites"),
        }
    }

    fn notify(&mut self, mut notice: FavoritesNotice) {
        self.revision += 1;
        notice.revision = self.revision;
        self.emitter.emit(notice.kind.event_name(), notice.clone());
        self.emitter.emit(NOTICE_EVENT, notice);
    }
}

fn load_persisted(storage: &dyn KeyValueStorage) -> Vec<String> {
    let raw = match storage.load(FAVORITES_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read favorites; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => {
            tracing::debug!(count = ids.len(), "favorites loaded");
            ids
        }
        Err(e) => {
            tracing::warn!(error = %e, "persisted favorites are malformed; starting empty");
            Vec::new()
        }
    }
}
