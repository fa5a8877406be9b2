//! Aggregator behavior over the in-memory collaborator.

use hero_hub::{CatalogClient, CatalogConfig, Lookup, LookupError};

use crate::support::{fixture_lookup, ids, DelayedLookup, PanickingLookup};

#[tokio::test]
async fn get_by_id_found() {
    let client = CatalogClient::new(fixture_lookup());
    let record = client.get_by_id("70").await.unwrap();
    assert_eq!(record.name, "Batman");
}

#[tokio::test]
async fn get_by_id_unknown_is_none() {
    let client = CatalogClient::new(fixture_lookup());
    assert!(client.get_by_id("999999").await.is_none());
}

#[tokio::test]
async fn resolve_distinguishes_not_found_from_failure() {
    let lookup = fixture_lookup();
    lookup.fail_id("3");
    let client = CatalogClient::new(lookup);

    assert!(client.resolve_by_id("70").await.is_found());
    assert!(!client.resolve_by_id("999999").await.is_found());
    assert!(matches!(
        client.resolve_by_id("999999").await,
        Lookup::NotFound(_)
    ));
    assert_eq!(
        client.resolve_by_id("3").await,
        Lookup::Failed(LookupError::Status(500))
    );
    // Both collapse to the same public outcome.
    assert!(client.get_by_id("999999").await.is_none());
    assert!(client.get_by_id("3").await.is_none());
}

#[tokio::test]
async fn batch_drops_missing_ids_and_keeps_order() {
    let client = CatalogClient::new(fixture_lookup());
    let records = client.get_by_ids(&["1", "999999", "2"]).await.unwrap();
    assert_eq!(ids(&records), ["1", "2"]);
}

#[tokio::test]
async fn batch_drops_failed_ids() {
    let lookup = fixture_lookup();
    lookup.fail_id("2");
    let client = CatalogClient::new(lookup);

    let records = client.get_by_ids(&["1", "2", "3"]).await.unwrap();
    assert_eq!(ids(&records), ["1", "3"]);
}

#[tokio::test]
async fn batch_with_every_lookup_failing_is_empty_not_none() {
    let lookup = fixture_lookup();
    lookup.set_offline(true);
    let client = CatalogClient::new(lookup);

    let records = client.get_by_ids(&["1", "2"]).await;
    assert_eq!(records, Some(vec![]));
}

#[tokio::test]
async fn empty_batch_issues_no_requests() {
    let lookup = fixture_lookup();
    let client = CatalogClient::new(lookup.clone());

    let none: [&str; 0] = [];
    assert_eq!(client.get_by_ids(&none).await, Some(vec![]));
    assert_eq!(lookup.requests(), 0);
}

#[tokio::test]
async fn batch_runs_concurrently_but_returns_input_order() {
    let lookup = DelayedLookup::new(fixture_lookup());
    let client = CatalogClient::new(lookup.clone());

    // Later ids finish first.
    let records = client.get_by_ids(&["1", "2", "3", "4", "5"]).await.unwrap();
    assert_eq!(ids(&records), ["1", "2", "3", "4", "5"]);
    assert!(lookup.peak_concurrency() > 1);
}

#[tokio::test]
async fn panicking_fan_out_returns_none() {
    let client = CatalogClient::new(PanickingLookup);
    assert!(client.get_by_ids(&["1", "2"]).await.is_none());
}

#[tokio::test]
async fn initial_batch_requests_ids_one_through_twenty() {
    let lookup = fixture_lookup();
    let client = CatalogClient::new(lookup.clone());

    // Only "1".."5" exist among the first twenty ids.
    let records = client.get_initial_batch().await.unwrap();
    assert_eq!(ids(&records), ["1", "2", "3", "4", "5"]);
    assert_eq!(lookup.requests(), 20);
}

#[tokio::test]
async fn initial_batch_size_follows_config() {
    let lookup = fixture_lookup();
    let config = CatalogConfig {
        initial_batch_size: 3,
        ..CatalogConfig::default()
    };
    let client = CatalogClient::with_config(lookup.clone(), &config);

    let records = client.get_initial_batch().await.unwrap();
    assert_eq!(ids(&records), ["1", "2", "3"]);
    assert_eq!(lookup.requests(), 3);
}

#[tokio::test]
async fn repeated_calls_reissue_lookups() {
    let client = CatalogClient::new(fixture_lookup());

    let first = client.get_by_ids(&["1", "70"]).await;
    let second = client.get_by_ids(&["1", "70"]).await;
    assert_eq!(first, second);
    assert_eq!(client.lookup().requests(), 4);
}

#[tokio::test]
async fn search_matches_are_returned() {
    let client = CatalogClient::new(fixture_lookup());
    let records = client.search("bat").await.unwrap();
    assert_eq!(ids(&records), ["69", "70"]);
}

#[tokio::test]
async fn search_without_matches_is_empty() {
    let client = CatalogClient::new(fixture_lookup());
    assert_eq!(client.search("zzzznotreal").await, Some(vec![]));
}

#[tokio::test]
async fn search_failure_is_none() {
    let lookup = fixture_lookup();
    lookup.set_offline(true);
    let client = CatalogClient::new(lookup);

    assert!(client.search("zzzznotreal").await.is_none());
    assert!(matches!(
        client.resolve_search("bat").await,
        Lookup::Failed(LookupError::Transport(_))
    ));
}
