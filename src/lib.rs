pub mod browse;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod record;
pub mod storage;

pub use browse::{load_view, sort_records, CatalogQuery, CatalogView, SortKey, SortOrder, ViewSource};
#[cfg(feature = "http")]
pub use catalog::HttpRecordLookup;
pub use catalog::{CatalogClient, InMemoryLookup, Lookup, LookupError, LookupRequest, RecordLookup};
pub use config::CatalogConfig;
pub use favorites::{
    FavoriteSet, FavoriteSetError, FavoritesNotice, FavoritesStore, NoticeKind, PersistStats,
    FAVORITES_STORAGE_KEY, MAX_FAVORITES,
};
pub use record::{Appearance, Biography, Connections, Image, PowerStats, Record, StatKey, Work};
pub use storage::{FileStorage, InMemoryStorage, KeyValueStorage, StorageError};
