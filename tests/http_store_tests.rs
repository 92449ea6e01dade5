//! Integration Tests for the HTTP Store Client
//!
//! Runs a fake parameter service on localhost, backed by an in-memory store,
//! and drives it through `HttpStoreClient` and the cache.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use param_cache::client::{
    HttpStoreClient, InMemoryStore, StoreClient, StoreError, StoreOp,
};
use param_cache::{CacheError, ParameterCache};
use serde::Deserialize;
use serde_json::json;

// == Fake Parameter Service ==

#[derive(Deserialize)]
struct ParameterQuery {
    name: String,
    #[serde(default)]
    with_decryption: bool,
}

#[derive(Deserialize)]
struct WriteBody {
    name: String,
    value: String,
    encrypted: bool,
    overwrite: bool,
}

fn error_response(err: StoreError) -> Response {
    let status = match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
        StoreError::AccessDenied(_) => StatusCode::FORBIDDEN,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string()).into_response()
}

async fn fetch(State(store): State<Arc<InMemoryStore>>, Query(q): Query<ParameterQuery>) -> Response {
    match store.fetch_parameter(&q.name, q.with_decryption).await {
        Ok(parameter) => Json(parameter).into_response(),
        Err(err) => error_response(err),
    }
}

async fn metadata(
    State(store): State<Arc<InMemoryStore>>,
    Query(q): Query<ParameterQuery>,
) -> Response {
    match store.fetch_parameter_metadata(&q.name).await {
        Ok(meta) => Json(meta).into_response(),
        Err(err) => error_response(err),
    }
}

async fn write(State(store): State<Arc<InMemoryStore>>, Json(body): Json<WriteBody>) -> Response {
    match store
        .write_parameter(&body.name, &body.value, body.encrypted, body.overwrite)
        .await
    {
        Ok(version) => Json(json!({ "version": version })).into_response(),
        Err(err) => error_response(err),
    }
}

async fn denied() -> Response {
    (StatusCode::FORBIDDEN, "not allowed to decrypt").into_response()
}

/// Starts the fake service and returns its base URL.
async fn spawn_fake_service(store: Arc<InMemoryStore>) -> String {
    let app = Router::new()
        .route("/parameter", get(fetch).put(write))
        .route("/parameter-metadata", get(metadata))
        .route("/denied/parameter", get(denied))
        .with_state(store);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn client_for(store: &Arc<InMemoryStore>) -> HttpStoreClient {
    let endpoint = spawn_fake_service(store.clone()).await;
    HttpStoreClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

// == Client Tests ==

#[tokio::test]
async fn test_fetch_parameter() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("app/db", "postgres://", true).await;
    let client = client_for(&store).await;

    let parameter = client.fetch_parameter("app/db", true).await.unwrap();

    assert_eq!(parameter.name, "app/db");
    assert_eq!(parameter.value, "postgres://");
    assert_eq!(parameter.version, 1);
}

#[tokio::test]
async fn test_fetch_metadata_does_not_decrypt() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("app/db", "postgres://", true).await;
    store.seed("app/db", "postgres://replica", true).await;
    let client = client_for(&store).await;

    let meta = client.fetch_parameter_metadata("app/db").await.unwrap();

    assert_eq!(meta.version, 2);
    assert_eq!(store.count(StoreOp::Fetch).await, 0);
}

#[tokio::test]
async fn test_write_parameter_returns_version() {
    let store = Arc::new(InMemoryStore::new());
    let client = client_for(&store).await;

    assert_eq!(client.write_parameter("a", "1", false, true).await.unwrap(), 1);
    assert_eq!(client.write_parameter("a", "2", false, true).await.unwrap(), 2);
    assert_eq!(store.version("a").await, Some(2));
}

#[tokio::test]
async fn test_status_codes_map_to_store_errors() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("a", "1", false).await;
    let client = client_for(&store).await;

    assert!(matches!(
        client.fetch_parameter("missing", false).await,
        Err(StoreError::NotFound(name)) if name == "missing"
    ));
    assert!(matches!(
        client.write_parameter("a", "2", false, false).await,
        Err(StoreError::AlreadyExists(_))
    ));

    store.fail_next(StoreOp::Metadata).await;
    assert!(matches!(
        client.fetch_parameter_metadata("a").await,
        Err(StoreError::Unavailable(_))
    ));

    let denied = HttpStoreClient::new(format!("{}/denied", client.endpoint()), Duration::from_secs(5))
        .unwrap();
    assert!(matches!(
        denied.fetch_parameter("a", true).await,
        Err(StoreError::AccessDenied(msg)) if msg.contains("decrypt")
    ));
}

// == Cache over HTTP ==

#[tokio::test]
async fn test_cache_over_http_store() {
    let store = Arc::new(InMemoryStore::new());
    let client = client_for(&store).await;
    let cache = ParameterCache::new(Arc::new(client), Duration::from_secs(300));

    cache.put_key("app/token", "abc", true).await.unwrap();
    assert_eq!(cache.get_key("app/token", true).await.unwrap(), "abc");

    assert_eq!(store.count(StoreOp::Write).await, 1);
    assert_eq!(store.count(StoreOp::Fetch).await, 1);

    let err = cache.get_key("app/absent", true).await.unwrap_err();
    assert!(matches!(err, CacheError::Retrieve { .. }));
    assert!(err.is_not_found());
}
