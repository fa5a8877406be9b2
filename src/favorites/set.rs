use thiserror::Error;

use super::MAX_FAVORITES;

/// Why an insert into a [`FavoriteSet`] was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoriteSetError {
    #[error("{0} is already a favorite")]
    AlreadyPresent(String),
    #[error("favorites limit of {max} reached")]
    CapacityReached { max: usize },
}

/// Ordered, deduplicated, capacity-bounded list of identifiers.
///
/// Insertion order is kept (oldest first). The cap is enforced on
/// insert only: a set adopted from persisted data may already exceed it
/// and is kept verbatim until members are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<String>,
    max: usize,
}

impl Default for FavoriteSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_FAVORITES)
    }

    pub fn with_capacity_limit(max: usize) -> Self {
        Self {
            ids: Vec::new(),
            max,
        }
    }

    /// Adopt a previously persisted sequence as-is.
    pub fn from_persisted(ids: Vec<String>) -> Self {
        Self {
            ids,
            max: MAX_FAVORITES,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Append `id`. Duplicates are checked before capacity.
    pub fn insert(&mut self, id: impl Into<String>) -> Result<(), FavoriteSetError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(FavoriteSetError::AlreadyPresent(id));
        }
        if self.is_full() {
            return Err(FavoriteSetError::CapacityReached { max: self.max });
        }
        self.ids.push(id);
        Ok(())
    }

    /// Remove every occurrence of `id`. Returns true if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
