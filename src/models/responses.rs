//! Response DTOs for the parameter cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /params/*key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the PUT operation (PUT /params)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
        }
    }
}

/// Response body for the expiry endpoint (PUT /expiry)
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryResponse {
    /// TTL applied on subsequent refreshes
    pub default_expiry_secs: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Fresh reads served locally
    pub hits: u64,
    /// Reads for keys not yet cached
    pub misses: u64,
    /// Metadata-only version checks
    pub version_checks: u64,
    /// Version checks that extended an unchanged entry
    pub unchanged: u64,
    /// Full fetches issued
    pub full_fetches: u64,
    /// Writes issued
    pub writes: u64,
    /// Failed operations
    pub errors: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Share of reads answered without a full fetch
    pub hit_rate: f64,
    /// TTL applied on subsequent refreshes
    pub default_expiry_secs: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, default_expiry_secs: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            version_checks: stats.version_checks,
            unchanged: stats.unchanged,
            full_fetches: stats.full_fetches,
            writes: stats.writes,
            errors: stats.errors,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            default_expiry_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
