//! Cache Entry Module
//!
//! Defines a cached parameter value with its expiry and the store version it
//! was fetched at.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use crate::client::Parameter;

// == Cache Entry ==
/// A cached parameter value and its freshness metadata.
///
/// `value` always corresponds to `last_known_version`: both are only ever
/// replaced together by a full fetch.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last known parameter value
    pub value: String,
    /// When the freshness guarantee lapses
    pub expires_at: Instant,
    /// Store version observed at the last full fetch
    pub last_known_version: i64,
    /// Wall-clock time of the last full fetch
    pub refreshed_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry from a freshly fetched parameter.
    pub fn from_parameter(parameter: Parameter, ttl: Duration) -> Self {
        Self {
            value: parameter.value,
            expires_at: Instant::now() + ttl,
            last_known_version: parameter.version,
            refreshed_at: Utc::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Extend ==
    /// Pushes the expiry to `now + ttl`, leaving value and version untouched.
    pub fn extend(&mut self, ttl: Duration) {
        self.expires_at = Instant::now() + ttl;
    }

    /// Returns true if `version` is newer than the cached one.
    pub fn is_superseded_by(&self, version: i64) -> bool {
        version > self.last_known_version
    }

    // == Time To Live ==
    /// Returns the remaining freshness, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Returns a serializable view of the entry.
    pub fn snapshot(&self, key: &str) -> EntrySnapshot {
        EntrySnapshot {
            key: key.to_string(),
            version: self.last_known_version,
            expired: self.is_expired(),
            ttl_remaining_ms: self.ttl_remaining().as_millis() as u64,
            refreshed_at: self.refreshed_at,
        }
    }
}

// == Entry Snapshot ==
/// Point-in-time description of a cached entry. Never carries the value.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    /// Parameter key
    pub key: String,
    /// Store version the cached value belongs to
    pub version: i64,
    /// Whether the next read will trigger a version check
    pub expired: bool,
    /// Remaining freshness in milliseconds
    pub ttl_remaining_ms: u64,
    /// Time of the last full fetch
    pub refreshed_at: DateTime<Utc>,
}
