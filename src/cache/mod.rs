//! Cache Module
//!
//! Provides a read-through parameter cache with TTL expiry and version checks.

mod entry;
mod parameter_cache;
mod stats;


// Re-export public types
pub use entry::{CacheEntry, EntrySnapshot};
pub use parameter_cache::ParameterCache;
pub use stats::CacheStats;

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 2048;

/// TTL used when none is configured
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(30);

// == Key Validation ==
/// Checks that `key` is a valid parameter name.
///
/// Names are non-empty, at most [`MAX_KEY_LENGTH`] bytes and made of ASCII
/// letters, digits, `_`, `.`, `-` and `/`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }

    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '-' | '/')))
    {
        return Err(CacheError::InvalidKey(format!(
            "key contains invalid character {:?}",
            bad
        )));
    }

    Ok(())
}
