//! Parameter Cache Module
//!
//! Read-through cache over a [`StoreClient`]. Fresh entries are served
//! locally; expired entries are revalidated with a cheap metadata call and
//! only refetched (and decrypted) when the store reports a newer version.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{validate_key, CacheEntry, CacheStats, EntrySnapshot};
use crate::client::StoreClient;
use crate::error::{CacheError, Result};

/// Per-key slot. The slot lock is held across that key's remote calls.
type Slot = Arc<Mutex<Option<CacheEntry>>>;

// == Parameter Cache ==
/// Time-expiring, version-checked cache of remote parameters.
///
/// The slot map lock is only held long enough to find or create a key's
/// slot, so requests for different keys never wait on each other's remote
/// calls. Requests for the same key serialize on the slot; a request queued
/// behind a refresh observes the refreshed entry.
pub struct ParameterCache {
    /// Remote parameter store
    client: Arc<dyn StoreClient>,
    /// Key to slot mapping; slots are never removed
    slots: Mutex<HashMap<String, Slot>>,
    /// TTL applied on the next refresh of any entry, in nanoseconds
    default_expiry_nanos: AtomicU64,
    /// Number of slots holding an entry
    entry_count: AtomicUsize,
    /// Performance statistics
    stats: Mutex<CacheStats>,
}

impl ParameterCache {
    // == Constructor ==
    /// Creates an empty cache over `client`.
    ///
    /// # Arguments
    /// * `client` - The remote parameter store
    /// * `default_expiry` - TTL applied whenever an entry is refreshed
    pub fn new(client: Arc<dyn StoreClient>, default_expiry: Duration) -> Self {
        Self {
            client,
            slots: Mutex::new(HashMap::new()),
            default_expiry_nanos: AtomicU64::new(duration_to_nanos(default_expiry)),
            entry_count: AtomicUsize::new(0),
            stats: Mutex::new(CacheStats::new()),
        }
    }

    // == Default Expiry ==
    /// Returns the TTL that will be applied on the next refresh.
    pub fn default_expiry(&self) -> Duration {
        Duration::from_nanos(self.default_expiry_nanos.load(Ordering::Relaxed))
    }

    /// Changes the TTL applied on subsequent refreshes.
    ///
    /// Entries already cached keep their current expiry until their next
    /// refresh.
    pub fn set_default_expiry(&self, expiry: Duration) {
        self.default_expiry_nanos
            .store(duration_to_nanos(expiry), Ordering::Relaxed);
        info!(expiry_ms = expiry.as_millis() as u64, "default expiry updated");
    }

    // == Get Key ==
    /// Returns the value of `key`, consulting the store only when needed.
    ///
    /// - No entry: one full fetch.
    /// - Fresh entry: no remote call.
    /// - Expired entry: one metadata call; if the store version is newer, a
    ///   full fetch follows, otherwise the expiry is extended.
    ///
    /// Any remote failure is returned as is; a previously cached value is
    /// never used as a fallback, and stays in place for later callers.
    ///
    /// # Arguments
    /// * `key` - Parameter name
    /// * `decrypt` - Whether the store should decrypt the value on a full fetch
    pub async fn get_key(&self, key: &str, decrypt: bool) -> Result<String> {
        validate_key(key)?;

        let slot = self.slot(key).await;
        let mut entry = slot.lock().await;
        let result = self.read_through(key, decrypt, &mut entry).await;
        self.track(result).await
    }

    // == Put Key ==
    /// Writes `value` to the store, overwriting any existing value, then
    /// refreshes the cached entry from the store.
    ///
    /// A failed write returns [`CacheError::Store`] and skips the refresh. A
    /// successful write followed by a failed refresh returns
    /// [`CacheError::Retrieve`]; the value is then safe in the store but the
    /// cached entry (if any) is left as it was.
    ///
    /// # Arguments
    /// * `key` - Parameter name
    /// * `value` - Value to store
    /// * `encrypt` - Store as an encrypted parameter, and decrypt on refresh
    pub async fn put_key(&self, key: &str, value: &str, encrypt: bool) -> Result<()> {
        validate_key(key)?;

        let slot = self.slot(key).await;
        let mut entry = slot.lock().await;
        let result = self.write_through(key, value, encrypt, &mut entry).await;
        self.track(result).await
    }

    // == Inspect ==
    /// Describes the cached entry for `key` without any remote call.
    pub async fn inspect(&self, key: &str) -> Option<EntrySnapshot> {
        let slot = self.slots.lock().await.get(key).cloned()?;
        let entry = slot.lock().await;
        entry.as_ref().map(|e| e.snapshot(key))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.stats.lock().await.clone();
        stats.set_total_entries(self.len());
        stats
    }

    // == Length ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entry_count.load(Ordering::Relaxed)
    }

    // == Is Empty ==
    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().await;
        if let Some(slot) = slots.get(key) {
            return Arc::clone(slot);
        }
        let slot = Slot::default();
        slots.insert(key.to_string(), Arc::clone(&slot));
        slot
    }

    async fn read_through(
        &self,
        key: &str,
        decrypt: bool,
        entry: &mut Option<CacheEntry>,
    ) -> Result<String> {
        let current = match entry.as_mut() {
            Some(current) => current,
            None => {
                self.stats.lock().await.record_miss();
                return self.refresh(key, decrypt, entry).await;
            }
        };

        if !current.is_expired() {
            self.stats.lock().await.record_hit();
            debug!(key, "cache hit");
            return Ok(current.value.clone());
        }

        self.stats.lock().await.record_version_check();
        let metadata = self
            .client
            .fetch_parameter_metadata(key)
            .await
            .map_err(|source| {
                warn!(key, error = %source, "version check failed");
                CacheError::VersionCheck {
                    key: key.to_string(),
                    source,
                }
            })?;

        if !current.is_superseded_by(metadata.version) {
            current.extend(self.default_expiry());
            self.stats.lock().await.record_unchanged();
            debug!(key, version = current.last_known_version, "unchanged, expiry extended");
            return Ok(current.value.clone());
        }

        info!(
            key,
            cached_version = current.last_known_version,
            store_version = metadata.version,
            "parameter changed in store"
        );
        self.refresh(key, decrypt, entry).await
    }

    async fn write_through(
        &self,
        key: &str,
        value: &str,
        encrypt: bool,
        entry: &mut Option<CacheEntry>,
    ) -> Result<()> {
        self.stats.lock().await.record_write();
        let version = self
            .client
            .write_parameter(key, value, encrypt, true)
            .await
            .map_err(|source| {
                warn!(key, error = %source, "write failed");
                CacheError::Store {
                    key: key.to_string(),
                    source,
                }
            })?;
        debug!(key, version, encrypt, "parameter written");

        self.refresh(key, encrypt, entry).await?;
        Ok(())
    }

    /// Full fetch: replaces value, version and expiry together.
    async fn refresh(
        &self,
        key: &str,
        decrypt: bool,
        entry: &mut Option<CacheEntry>,
    ) -> Result<String> {
        self.stats.lock().await.record_full_fetch();
        let parameter = self
            .client
            .fetch_parameter(key, decrypt)
            .await
            .map_err(|source| {
                warn!(key, error = %source, "full fetch failed");
                CacheError::Retrieve {
                    key: key.to_string(),
                    source,
                }
            })?;

        let ttl = self.default_expiry();
        info!(
            key,
            version = parameter.version,
            ttl_ms = ttl.as_millis() as u64,
            "parameter refreshed"
        );

        let fresh = CacheEntry::from_parameter(parameter, ttl);
        let value = fresh.value.clone();
        if entry.replace(fresh).is_none() {
            self.entry_count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    async fn track<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.stats.lock().await.record_error();
        }
        result
    }
}

fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
