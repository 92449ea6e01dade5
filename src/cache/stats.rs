//! Cache Statistics Module
//!
//! Tracks how reads were served and how many remote calls the cache made.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from a fresh entry without a remote call
    pub hits: u64,
    /// Reads for keys with no cached entry
    pub misses: u64,
    /// Metadata-only version checks issued for expired entries
    pub version_checks: u64,
    /// Version checks that found the value unchanged and extended the expiry
    pub unchanged: u64,
    /// Full (possibly decrypting) fetches
    pub full_fetches: u64,
    /// Writes sent to the store
    pub writes: u64,
    /// Operations that returned an error
    pub errors: u64,
    /// Current number of cached entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of reads answered without a full fetch.
    ///
    /// Unchanged-version extensions count as hits. Returns 0.0 if no reads
    /// have been made.
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.unchanged;
        let total = self.hits + self.misses + self.version_checks;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_version_check(&mut self) {
        self.version_checks += 1;
    }

    pub fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    pub fn record_full_fetch(&mut self) {
        self.full_fetches += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
