//! API Handlers
//!
//! HTTP request handlers for each parameter cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{EntrySnapshot, ParameterCache};
use crate::client::StoreClient;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ExpiryRequest, ExpiryResponse, GetQuery, GetResponse, HealthResponse, PutRequest, PutResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so it is shared behind a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared parameter cache
    pub cache: Arc<ParameterCache>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: ParameterCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the cache over `client` with the configured expiry.
    pub fn from_config(config: &Config, client: Arc<dyn StoreClient>) -> Self {
        Self::new(ParameterCache::new(client, config.default_expiry()))
    }
}

/// Handler for GET /params/*key
///
/// Reads a parameter through the cache.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get_key(&key, query.decrypt).await?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for PUT /params
///
/// Writes a parameter to the store and refreshes its cache entry.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    state.cache.put_key(&req.key, &req.value, req.encrypt).await?;

    Ok(Json(PutResponse::new(req.key)))
}

/// Handler for GET /entries/*key
///
/// Describes the cached entry for a key without contacting the store.
pub async fn entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> std::result::Result<Json<EntrySnapshot>, StatusCode> {
    state
        .cache
        .inspect(&key)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Handler for PUT /expiry
///
/// Changes the TTL applied on subsequent refreshes.
pub async fn expiry_handler(
    State(state): State<AppState>,
    Json(req): Json<ExpiryRequest>,
) -> Result<Json<ExpiryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state
        .cache
        .set_default_expiry(Duration::from_secs(req.seconds));

    Ok(Json(ExpiryResponse {
        default_expiry_secs: req.seconds,
    }))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;

    Json(StatsResponse::new(
        &stats,
        state.cache.default_expiry().as_secs(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
