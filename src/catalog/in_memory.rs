//! InMemoryLookup - fixture upstream for testing and development.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::lookup::{LookupError, LookupRequest, RecordLookup};
use crate::record::Record;

/// Record lookup answering from an in-memory list of records.
///
/// Mirrors the upstream contract: unknown ids get an error payload and
/// searches match names case-insensitively by substring. Clone-friendly
/// via Arc, so a test can keep a handle for toggling failures.
#[derive(Clone, Default)]
pub struct InMemoryLookup {
    records: Arc<RwLock<Vec<Record>>>,
    failing_ids: Arc<RwLock<HashSet<String>>>,
    offline: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let lookup = Self::new();
        for record in records {
            lookup.insert(record);
        }
        lookup
    }

    /// Add a record, replacing any record with the same id.
    pub fn insert(&self, record: Record) {
        if let Ok(mut records) = self.records.write() {
            records.retain(|existing| existing.id != record.id);
            records.push(record);
        }
    }

    /// Answer every request with a transport failure while `offline`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Answer lookups of `id` with a 500 status.
    pub fn fail_id(&self, id: &str) {
        if let Ok(mut failing) = self.failing_ids.write() {
            failing.insert(id.to_string());
        }
    }

    /// Number of requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn by_id(&self, id: &str) -> Result<Value, LookupError> {
        let failing = self
            .failing_ids
            .read()
            .map_err(|_| LookupError::Transport("lookup lock poisoned".into()))?;
        if failing.contains(id) {
            return Err(LookupError::Status(500));
        }

        let records = self
            .records
            .read()
            .map_err(|_| LookupError::Transport("lookup lock poisoned".into()))?;
        match records.iter().find(|record| record.id == id) {
            Some(record) => {
                let mut payload =
                    serde_json::to_value(record).map_err(|e| LookupError::Decode(e.to_string()))?;
                if let Value::Object(map) = &mut payload {
                    map.insert("response".into(), json!("success"));
                }
                Ok(payload)
            }
            None => Ok(json!({ "response": "error", "error": "invalid id" })),
        }
    }

    fn search(&self, query: &str) -> Result<Value, LookupError> {
        let records = self
            .records
            .read()
            .map_err(|_| LookupError::Transport("lookup lock poisoned".into()))?;
        let needle = query.to_lowercase();
        let results: Vec<&Record> = records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect();

        Ok(json!({
            "response": "success",
            "results-for": query,
            "results": results,
        }))
    }
}

#[async_trait]
impl RecordLookup for InMemoryLookup {
    async fn fetch(&self, request: &LookupRequest) -> Result<Value, LookupError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(LookupError::Transport("connection refused".into()));
        }

        match request {
            LookupRequest::ById(id) => self.by_id(id),
            LookupRequest::Search(query) => self.search(query),
        }
    }
}
