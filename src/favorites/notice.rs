use serde::{Deserialize, Serialize};

use super::MAX_FAVORITES;

/// Event name every notice is emitted on.
pub const NOTICE_EVENT: &str = "favorites";

const DEFAULT_DISPLAY_NAME: &str = "Hero";

/// What happened to the favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Added,
    Removed,
    LimitReached,
    Cleared,
}

impl NoticeKind {
    /// Kind-specific event name, emitted alongside [`NOTICE_EVENT`].
    pub fn event_name(&self) -> &'static str {
        match self {
            NoticeKind::Added => "FavoriteAdded",
            NoticeKind::Removed => "FavoriteRemoved",
            NoticeKind::LimitReached => "FavoritesLimitReached",
            NoticeKind::Cleared => "FavoritesCleared",
        }
    }
}

/// User-facing notification carrying the membership at the time it was raised.
///
/// `revision` increases with every notice a store emits. Listeners run
/// on separate threads and may see notices out of order; the notice with
/// the highest revision describes the current membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesNotice {
    pub kind: NoticeKind,
    pub revision: u64,
    pub title: String,
    pub description: String,
    pub display_name: Option<String>,
    pub favorites: Vec<String>,
    pub count: usize,
}

impl FavoritesNotice {
    pub(crate) fn added(display_name: Option<&str>, favorites: &[String]) -> Self {
        let name = display_name.unwrap_or(DEFAULT_DISPLAY_NAME);
        Self::build(
            NoticeKind::Added,
            "Hero favorited!".to_string(),
            format!("{} was added to your favorites.", name),
            display_name,
            favorites,
        )
    }

    pub(crate) fn removed(display_name: Option<&str>, favorites: &[String]) -> Self {
        let name = display_name.unwrap_or(DEFAULT_DISPLAY_NAME);
        Self::build(
            NoticeKind::Removed,
            "Hero removed from favorites".to_string(),
            format!("{} was removed from your favorites.", name),
            display_name,
            favorites,
        )
    }

    pub(crate) fn limit_reached(display_name: Option<&str>, favorites: &[String]) -> Self {
        Self::build(
            NoticeKind::LimitReached,
            "Favorites limit reached".to_string(),
            format!(
                "You can have at most {} favorite heroes. Remove a favorite to add another.",
                MAX_FAVORITES
            ),
            display_name,
            favorites,
        )
    }

    pub(crate) fn cleared() -> Self {
        Self::build(
            NoticeKind::Cleared,
            "Favorites cleared".to_string(),
            "All favorites were removed.".to_string(),
            None,
            &[],
        )
    }

    fn build(
        kind: NoticeKind,
        title: String,
        description: String,
        display_name: Option<&str>,
        favorites: &[String],
    ) -> Self {
        Self {
            kind,
            revision: 0,
            title,
            description,
            display_name: display_name.map(str::to_string),
            favorites: favorites.to_vec(),
            count: favorites.len(),
        }
    }
}
