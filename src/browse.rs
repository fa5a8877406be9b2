//! Browse - the listing a catalog screen shows for a given query.
//!
//! Composes the aggregator with the user's favorites: choose a source
//! (initial batch, name search, or favorites), collapse a failed fetch
//! to an empty list, then sort client-side.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogClient, RecordLookup};
use crate::record::{Record, StatKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Name,
    Stat(StatKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search_term: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub favorites_only: bool,
}

impl CatalogQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }
}

/// Where the records of a view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewSource {
    Initial,
    Search,
    Favorites,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub source: ViewSource,
    pub records: Vec<Record>,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Title and message to show when the view has no records.
    pub fn empty_message(&self) -> (&'static str, &'static str) {
        match self.source {
            ViewSource::Favorites => (
                "No favorites",
                "You have not added any heroes to your favorites yet.",
            ),
            ViewSource::Initial | ViewSource::Search => (
                "No heroes found",
                "Try a different search term or go back to the initial list.",
            ),
        }
    }
}

/// Load the records for `query`.
///
/// `favorites_only` wins over a search term. A blank search term shows
/// the initial batch. Fetch failures yield an empty view, never an error.
pub async fn load_view<L: RecordLookup>(
    client: &CatalogClient<L>,
    query: &CatalogQuery,
    favorites: &[String],
) -> CatalogView {
    let term = query.search_term.trim();

    let (source, fetched) = if query.favorites_only {
        if favorites.is_empty() {
            (ViewSource::Favorites, Some(Vec::new()))
        } else {
            (ViewSource::Favorites, client.get_by_ids(favorites).await)
        }
    } else if !term.is_empty() {
        (ViewSource::Search, client.search(term).await)
    } else {
        (ViewSource::Initial, client.get_initial_batch().await)
    };

    let mut records = fetched.unwrap_or_default();
    sort_records(&mut records, query.sort_by, query.sort_order);
    CatalogView { source, records }
}

/// Stable in-place sort.
///
/// Names compare case-insensitively, ties broken by exact name. Stats
/// compare numerically; values that are not numbers count as 0.
pub fn sort_records(records: &mut [Record], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Stat(stat) => stat_value(a.stat(stat)).cmp(&stat_value(b.stat(stat))),
    }
}

/// Lenient integer parse: leading whitespace, optional sign, then as
/// many digits as are present. No digits (e.g. `"null"`) reads as 0;
/// values outside `i64` saturate.
pub fn stat_value(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return 0;
    }

    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    match signed.parse::<i64>() {
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}
