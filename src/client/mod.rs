//! Store Client Module
//!
//! Defines the remote parameter store capability the cache depends on, plus
//! two implementations: an HTTP client for a real parameter service and an
//! in-process versioned store used for local runs and tests.

mod http;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpStoreClient;
pub use memory::{InMemoryStore, StoreCall, StoreOp, CIPHERTEXT_PLACEHOLDER};

// == Parameter ==
/// A parameter value together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter value, decrypted if requested
    pub value: String,
    /// Version, incremented by the store on every write
    pub version: i64,
}

// == Parameter Metadata ==
/// Version information for a parameter, obtained without decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Parameter name
    pub name: String,
    /// Current version held by the store
    pub version: i64,
}

// == Store Error ==
/// Failures reported by a [`StoreClient`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The parameter does not exist
    #[error("parameter not found: {0}")]
    NotFound(String),

    /// A non-overwriting write targeted an existing parameter
    #[error("parameter already exists: {0}")]
    AlreadyExists(String),

    /// The caller lacks permission (e.g. to decrypt)
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The store answered with an unexpected status
    #[error("store returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request never completed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be understood
    #[error("malformed response: {0}")]
    Decode(String),

    /// The store is temporarily unable to serve requests
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// == Store Client ==
/// Remote operations required by the parameter cache.
///
/// Timeouts and cancellation are the implementation's concern; the cache
/// issues each call once and surfaces any failure.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetches a parameter's value and version, optionally decrypting it.
    async fn fetch_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, StoreError>;

    /// Fetches only the parameter's version. Must not decrypt.
    async fn fetch_parameter_metadata(&self, name: &str) -> Result<ParameterMetadata, StoreError>;

    /// Writes a parameter and returns its new version.
    async fn write_parameter(
        &self,
        name: &str,
        value: &str,
        encrypted: bool,
        overwrite: bool,
    ) -> Result<i64, StoreError>;
}
