use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A request understood by the upstream lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupRequest {
    /// `GET /{id}`
    ById(String),
    /// `GET /search/{query}`
    Search(String),
}

impl LookupRequest {
    /// Path segments below the service base URL (unencoded).
    pub fn segments(&self) -> Vec<&str> {
        match self {
            LookupRequest::ById(id) => vec![id.as_str()],
            LookupRequest::Search(query) => vec!["search", query.as_str()],
        }
    }

    /// Request path as the upstream documents it.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

/// Transport-level failure talking to the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request never produced a response (connect, timeout, DNS).
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service returned status {0}")]
    Status(u16),
    /// The body was not the JSON shape we expected.
    #[error("invalid payload: {0}")]
    Decode(String),
}

/// Record lookup collaborator: turns a request into a raw JSON payload.
///
/// Implementations report only transport-level failures as errors. An
/// application-level error payload (`{"response": "error", ...}`) is a
/// successful fetch; classifying it is the caller's job.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn fetch(&self, request: &LookupRequest) -> Result<Value, LookupError>;
}

/// Outcome of resolving a request, before it is collapsed for callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// The service answered with an error payload (unknown id, no result).
    NotFound(String),
    Failed(LookupError),
}

impl<T> Lookup<T> {
    /// Collapse to the public view: anything but `Found` becomes None.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound(_) | Lookup::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound(message) => Lookup::NotFound(message),
            Lookup::Failed(error) => Lookup::Failed(error),
        }
    }
}
