//! Catalog - fetching records from the upstream lookup service.
//!
//! [`CatalogClient`] is the aggregator; it talks to any [`RecordLookup`]
//! collaborator. [`HttpRecordLookup`] (feature `http`) is the real one,
//! [`InMemoryLookup`] a fixture with the same contract.

mod aggregator;
#[cfg(feature = "http")]
mod http;
mod in_memory;
mod lookup;

pub use aggregator::{initial_ids, CatalogClient};
#[cfg(feature = "http")]
pub use http::HttpRecordLookup;
pub use in_memory::InMemoryLookup;
pub use lookup::{Lookup, LookupError, LookupRequest, RecordLookup};
