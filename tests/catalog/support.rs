//! Fixture records and collaborators shared by the catalog tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hero_hub::record::{Record, StatKey};
use hero_hub::{InMemoryLookup, LookupError, LookupRequest, RecordLookup};
use serde_json::Value;

pub fn hero(id: &str, name: &str, strength: &str, intelligence: &str) -> Record {
    Record::new(id, name)
        .with_stat(StatKey::Strength, strength)
        .with_stat(StatKey::Intelligence, intelligence)
}

/// Records "1" through "5" plus a few well-known ids.
pub fn heroes() -> Vec<Record> {
    vec![
        hero("1", "A-Bomb", "100", "38"),
        hero("2", "Abe Sapien", "28", "88"),
        hero("3", "Abin Sur", "90", "50"),
        hero("4", "Abomination", "80", "63"),
        hero("5", "Abraxas", "100", "88"),
        hero("69", "Batgirl", "11", "88"),
        hero("70", "Batman", "26", "100"),
        hero("644", "Superman", "100", "94"),
    ]
}

pub fn fixture_lookup() -> InMemoryLookup {
    InMemoryLookup::with_records(heroes())
}

pub fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Wraps a lookup, answering later ids sooner so completion order is the
/// reverse of request order. Tracks how many requests overlap.
#[derive(Clone)]
pub struct DelayedLookup {
    inner: InMemoryLookup,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl DelayedLookup {
    pub fn new(inner: InMemoryLookup) -> Self {
        Self {
            inner,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Most requests observed in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn delay_for(request: &LookupRequest) -> Duration {
        let rank = match request {
            LookupRequest::ById(id) => id.parse::<u64>().unwrap_or(0),
            LookupRequest::Search(_) => 0,
        };
        Duration::from_millis(100u64.saturating_sub(rank.min(20) * 5))
    }
}

#[async_trait]
impl RecordLookup for DelayedLookup {
    async fn fetch(&self, request: &LookupRequest) -> Result<Value, LookupError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Self::delay_for(request)).await;
        let result = self.inner.fetch(request).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Lookup whose every request panics, standing in for a programming error.
pub struct PanickingLookup;

#[async_trait]
impl RecordLookup for PanickingLookup {
    async fn fetch(&self, request: &LookupRequest) -> Result<Value, LookupError> {
        panic!("lookup bug while fetching {}", request.path());
    }
}
