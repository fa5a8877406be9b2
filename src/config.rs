//! Catalog configuration with environment overrides.
//!
//! Supported environment variables:
//! - `HERO_HUB_API_URL`: base URL of the lookup service.
//! - `HERO_HUB_TIMEOUT_SECS`: per-request timeout in seconds (1-300).
//! - `HERO_HUB_INITIAL_BATCH`: ids fetched for the initial listing (1-731).
//!
//! Invalid values are logged and ignored.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/superhero";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INITIAL_BATCH: usize = 20;

/// Highest id the upstream catalog serves.
pub const MAX_CATALOG_ID: usize = 731;

const API_URL_VAR: &str = "HERO_HUB_API_URL";
const TIMEOUT_VAR: &str = "HERO_HUB_TIMEOUT_SECS";
const INITIAL_BATCH_VAR: &str = "HERO_HUB_INITIAL_BATCH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub initial_batch_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            initial_batch_size: DEFAULT_INITIAL_BATCH,
        }
    }
}

impl CatalogConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides read through `var`. `from_env` with an
    /// injectable source, so tests need not touch the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = var(API_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                tracing::warn!("{} is empty, ignoring", API_URL_VAR);
            } else {
                config.base_url = url.to_string();
            }
        }

        if let Some(val) = var(TIMEOUT_VAR) {
            match val.trim().parse::<u64>() {
                Ok(secs) if (1..=300).contains(&secs) => {
                    config.timeout = Duration::from_secs(secs);
                }
                Ok(secs) => {
                    tracing::warn!(secs, "{} out of range [1, 300], ignoring", TIMEOUT_VAR)
                }
                Err(_) => tracing::warn!(val = %val, "{} is not a valid u64, ignoring", TIMEOUT_VAR),
            }
        }

        if let Some(val) = var(INITIAL_BATCH_VAR) {
            match val.trim().parse::<usize>() {
                Ok(size) if (1..=MAX_CATALOG_ID).contains(&size) => {
                    config.initial_batch_size = size;
                }
                Ok(size) => tracing::warn!(
                    size,
                    "{} out of range [1, {}], ignoring",
                    INITIAL_BATCH_VAR,
                    MAX_CATALOG_ID
                ),
                Err(_) => {
                    tracing::warn!(val = %val, "{} is not a valid usize, ignoring", INITIAL_BATCH_VAR)
                }
            }
        }

        config
    }
}
