//! Favorites - a small, durable, capacity-bounded set of record ids.
//!
//! - [`FavoriteSet`] is the plain bounded set.
//! - [`FavoritesStore`] wraps it with persistence (through any
//!   [`KeyValueStorage`](crate::KeyValueStorage)) and notifications.

mod notice;
mod persister;
mod set;
mod store;

/// Most favorites a user may hold.
pub const MAX_FAVORITES: usize = 5;

/// Storage key holding the JSON array of favorite ids.
pub const FAVORITES_STORAGE_KEY: &str = "hero-hub-favorites";

pub use notice::{FavoritesNotice, NoticeKind, NOTICE_EVENT};
pub use persister::PersistStats;
pub use set::{FavoriteSet, FavoriteSetError};
pub use store::FavoritesStore;
