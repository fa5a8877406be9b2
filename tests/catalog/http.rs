//! HTTP collaborator integration tests.
//!
//! Starts an axum server standing in for the upstream proxy and
//! exercises it through `HttpRecordLookup`.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use hero_hub::{
    CatalogClient, CatalogConfig, HttpRecordLookup, InMemoryLookup, Lookup, LookupError,
    LookupRequest, RecordLookup,
};

use crate::support::{fixture_lookup, ids};

async fn record_handler(State(lookup): State<InMemoryLookup>, Path(id): Path<String>) -> Response {
    match id.as_str() {
        "500" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::OK.into_response()
        }
        _ => match lookup.fetch(&LookupRequest::ById(id)).await {
            Ok(payload) => Json(payload).into_response(),
            Err(_) => StatusCode::BAD_GATEWAY.into_response(),
        },
    }
}

async fn search_handler(
    State(lookup): State<InMemoryLookup>,
    Path(query): Path<String>,
) -> Response {
    if query == "broken" {
        return Json(serde_json::json!({ "response": "success" })).into_response();
    }
    match lookup.fetch(&LookupRequest::Search(query)).await {
        Ok(payload) => Json(payload).into_response(),
        Err(_) => StatusCode::BAD_GATEWAY.into_response(),
    }
}

/// Bind to port 0 and return the base URL of the fake upstream.
async fn start_upstream() -> String {
    let app = Router::new()
        .route("/api/superhero/search/:query", get(search_handler))
        .route("/api/superhero/:id", get(record_handler))
        .with_state(fixture_lookup());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/superhero")
}

fn client_for(base: &str) -> CatalogClient<HttpRecordLookup> {
    let config = CatalogConfig {
        base_url: base.to_string(),
        timeout: Duration::from_millis(500),
        ..CatalogConfig::default()
    };
    CatalogClient::from_config(&config)
}

#[tokio::test]
async fn fetches_record_by_id() {
    let base = start_upstream().await;
    let client = client_for(&base);

    let record = client.get_by_id("70").await.unwrap();
    assert_eq!(record.name, "Batman");
    assert_eq!(record.powerstats.intelligence, "100");
}

#[tokio::test]
async fn error_payload_is_not_found() {
    let base = start_upstream().await;
    let client = client_for(&base);

    assert!(matches!(
        client.resolve_by_id("999999").await,
        Lookup::NotFound(message) if message == "invalid id"
    ));
}

#[tokio::test]
async fn server_error_is_status_failure() {
    let base = start_upstream().await;
    let client = client_for(&base);

    assert_eq!(
        client.resolve_by_id("500").await,
        Lookup::Failed(LookupError::Status(500))
    );
    assert!(client.get_by_id("500").await.is_none());
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let base = start_upstream().await;
    let client = client_for(&base);

    assert!(matches!(
        client.resolve_by_id("garbage").await,
        Lookup::Failed(LookupError::Decode(_))
    ));
}

#[tokio::test]
async fn timeout_is_transport_failure() {
    let base = start_upstream().await;
    let client = client_for(&base);

    assert!(matches!(
        client.resolve_by_id("slow").await,
        Lookup::Failed(LookupError::Transport(_))
    ));
}

#[tokio::test]
async fn unreachable_upstream_collapses_to_none() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = client_for("http://127.0.0.1:9/api/superhero");

    assert!(client.get_by_id("1").await.is_none());
    assert!(client.search("bat").await.is_none());
    assert_eq!(client.get_by_ids(&["1", "2"]).await, Some(vec![]));
}

#[tokio::test]
async fn batch_over_http_drops_bad_ids() {
    let base = start_upstream().await;
    let client = client_for(&base);

    let records = client
        .get_by_ids(&["1", "999999", "500", "garbage", "2"])
        .await
        .unwrap();
    assert_eq!(ids(&records), ["1", "2"]);
}

#[tokio::test]
async fn search_over_http() {
    let base = start_upstream().await;
    let client = client_for(&base);

    let found = client.search("man").await.unwrap();
    assert_eq!(ids(&found), ["70", "644"]);

    assert_eq!(client.search("zzzznotreal").await, Some(vec![]));
    assert!(client.search("broken").await.is_none());
}

#[tokio::test]
async fn search_query_is_one_path_segment() {
    let base = start_upstream().await;
    let client = client_for(&base);

    // Without encoding this would route to a different path and 404.
    assert_eq!(client.search("a/b c").await, Some(vec![]));
}
