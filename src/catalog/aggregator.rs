use std::panic::AssertUnwindSafe;

use futures::future::join_all;
use futures::FutureExt;
use serde_json::Value;

use super::lookup::{Lookup, LookupError, LookupRequest, RecordLookup};
use crate::config::{CatalogConfig, DEFAULT_INITIAL_BATCH};
use crate::record::Record;

/// Resolves ids and search queries into records through a [`RecordLookup`].
///
/// The public operations never return errors: every failure is logged
/// and collapsed to `None` (single lookups) or dropped from the result
/// (batch lookups). `resolve_*` expose the uncollapsed [`Lookup`] for
/// callers that need to tell not-found from transport failure.
///
/// ## Example
///
/// ```ignore
/// use hero_hub::{CatalogClient, HttpRecordLookup, CatalogConfig};
///
/// let config = CatalogConfig::from_env();
/// let client = CatalogClient::with_config(HttpRecordLookup::from_config(&config), &config);
///
/// let heroes = client.get_initial_batch().await.unwrap_or_default();
/// let batman = client.get_by_id("70").await;
/// ```
pub struct CatalogClient<L> {
    lookup: L,
    initial_batch_size: usize,
}

impl<L: RecordLookup> CatalogClient<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            initial_batch_size: DEFAULT_INITIAL_BATCH,
        }
    }

    pub fn with_config(lookup: L, config: &CatalogConfig) -> Self {
        Self {
            lookup,
            initial_batch_size: config.initial_batch_size,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Look up one record, keeping the reason it was not found.
    pub async fn resolve_by_id(&self, id: &str) -> Lookup<Record> {
        let request = LookupRequest::ById(id.to_string());
        let outcome = match self.lookup.fetch(&request).await {
            Ok(payload) => classify_record(payload),
            Err(e) => Lookup::Failed(e),
        };
        log_outcome(&request, &outcome);
        outcome
    }

    /// Search by name, keeping the reason it produced nothing.
    pub async fn resolve_search(&self, query: &str) -> Lookup<Vec<Record>> {
        let request = LookupRequest::Search(query.to_string());
        let outcome = match self.lookup.fetch(&request).await {
            Ok(payload) => classify_search(payload),
            Err(e) => Lookup::Failed(e),
        };
        log_outcome(&request, &outcome);
        outcome
    }

    /// One record, or None if it does not exist or could not be fetched.
    pub async fn get_by_id(&self, id: &str) -> Option<Record> {
        self.resolve_by_id(id).await.found()
    }

    /// Records whose name matches `query`.
    ///
    /// `Some(vec![])` means the search succeeded with no matches; None
    /// means the search itself failed.
    pub async fn search(&self, query: &str) -> Option<Vec<Record>> {
        self.resolve_search(query).await.found()
    }

    /// Fetch all `ids` concurrently and keep the ones that resolved, in
    /// input order.
    ///
    /// A missing or failed id is dropped rather than failing the batch.
    /// None is returned only if the fan-out itself panics.
    pub async fn get_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Option<Vec<Record>> {
        let lookups = ids.iter().map(|id| self.get_by_id(id.as_ref()));

        match AssertUnwindSafe(join_all(lookups)).catch_unwind().await {
            Ok(results) => {
                let records: Vec<Record> = results.into_iter().flatten().collect();
                tracing::debug!(
                    requested = ids.len(),
                    resolved = records.len(),
                    "batch lookup finished"
                );
                Some(records)
            }
            Err(_) => {
                tracing::error!(requested = ids.len(), "batch lookup panicked");
                None
            }
        }
    }

    /// The initial listing: ids `"1"` through the configured batch size.
    pub async fn get_initial_batch(&self) -> Option<Vec<Record>> {
        self.get_initial_batch_of(self.initial_batch_size).await
    }

    /// Ids `"1"` through `count`, with [`get_by_ids`](Self::get_by_ids) semantics.
    pub async fn get_initial_batch_of(&self, count: usize) -> Option<Vec<Record>> {
        self.get_by_ids(initial_ids(count).as_slice()).await
    }
}

#[cfg(feature = "http")]
impl CatalogClient<super::http::HttpRecordLookup> {
    /// HTTP-backed client built from `config`.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::with_config(super::http::HttpRecordLookup::from_config(config), config)
    }
}

/// Deterministic id sequence `"1"..="count"`.
pub fn initial_ids(count: usize) -> Vec<String> {
    (1..=count).map(|i| i.to_string()).collect()
}

fn error_payload(payload: &Value) -> Option<String> {
    if payload.get("response").and_then(Value::as_str) != Some("error") {
        return None;
    }
    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some(message.to_string())
}

fn classify_record(payload: Value) -> Lookup<Record> {
    if let Some(message) = error_payload(&payload) {
        return Lookup::NotFound(message);
    }
    match serde_json::from_value(payload) {
        Ok(record) => Lookup::Found(record),
        Err(e) => Lookup::Failed(LookupError::Decode(e.to_string())),
    }
}

fn classify_search(mut payload: Value) -> Lookup<Vec<Record>> {
    if let Some(message) = error_payload(&payload) {
        return Lookup::NotFound(message);
    }
    match payload.get_mut("results").map(Value::take) {
        None | Some(Value::Null) => Lookup::NotFound("no results in payload".into()),
        Some(results) => match serde_json::from_value(results) {
            Ok(records) => Lookup::Found(records),
            Err(e) => Lookup::Failed(LookupError::Decode(e.to_string())),
        },
    }
}

fn log_outcome<T>(request: &LookupRequest, outcome: &Lookup<T>) {
    match outcome {
        Lookup::Found(_) => {}
        Lookup::NotFound(message) => {
            tracing::warn!(path = %request.path(), error = %message, "lookup reported an error")
        }
        Lookup::Failed(e) => {
            tracing::warn!(path = %request.path(), error = %e, "lookup failed")
        }
    }
}
