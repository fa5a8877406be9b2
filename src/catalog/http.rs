//! HTTP collaborator - fetches records from the upstream REST service.
//!
//! Requires the `http` feature. Uses reqwest.
//!
//! ## Routes consumed
//!
//! - `GET {base}/{id}` - a single record, or `{ "response": "error", "error": ... }`.
//! - `GET {base}/search/{query}` - `{ "response": "success", "results": [...] }`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use super::lookup::{LookupError, LookupRequest, RecordLookup};
use crate::config::CatalogConfig;

/// Record lookup over HTTP.
#[derive(Clone)]
pub struct HttpRecordLookup {
    client: Client,
    base_url: String,
}

impl HttpRecordLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build http client; using defaults");
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL. Segments are percent-encoded, so a search
    /// query containing `/` or spaces stays a single segment.
    fn url_for(&self, request: &LookupRequest) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::Transport(format!("invalid base url: {}", e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                LookupError::Transport(format!("{} cannot be a base url", self.base_url))
            })?;
            segments.pop_if_empty().extend(request.segments());
        }
        Ok(url)
    }
}

#[async_trait]
impl RecordLookup for HttpRecordLookup {
    async fn fetch(&self, request: &LookupRequest) -> Result<Value, LookupError> {
        let url = self.url_for(request)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}
