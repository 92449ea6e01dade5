//! In-Memory Store Module
//!
//! A versioned, in-process parameter store. Every call made through the
//! [`StoreClient`] trait is recorded so callers can assert exactly which
//! remote operations a cache operation issued.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use super::{Parameter, ParameterMetadata, StoreClient, StoreError};

/// Value returned for encrypted parameters fetched without decryption.
pub const CIPHERTEXT_PLACEHOLDER: &str = "<encrypted>";

// == Store Operation ==
/// The kind of remote operation, used for failure injection and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Fetch,
    Metadata,
    Write,
}

// == Store Call ==
/// A recorded call made through the [`StoreClient`] trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch { name: String, with_decryption: bool },
    Metadata { name: String },
    Write { name: String, encrypted: bool },
}

impl StoreCall {
    /// Returns the operation kind of this call.
    pub fn op(&self) -> StoreOp {
        match self {
            StoreCall::Fetch { .. } => StoreOp::Fetch,
            StoreCall::Metadata { .. } => StoreOp::Metadata,
            StoreCall::Write { .. } => StoreOp::Write,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredParameter {
    value: String,
    encrypted: bool,
    version: i64,
}

#[derive(Debug, Default)]
struct StoreState {
    parameters: HashMap<String, StoredParameter>,
    calls: Vec<StoreCall>,
    pending_failures: Vec<StoreOp>,
}

impl StoreState {
    fn upsert(&mut self, name: &str, value: &str, encrypted: bool) -> i64 {
        let version = self
            .parameters
            .get(name)
            .map(|p| p.version + 1)
            .unwrap_or(1);
        self.parameters.insert(
            name.to_string(),
            StoredParameter {
                value: value.to_string(),
                encrypted,
                version,
            },
        );
        version
    }

    fn take_failure(&mut self, op: StoreOp) -> Option<StoreError> {
        let pos = self.pending_failures.iter().position(|pending| *pending == op)?;
        self.pending_failures.remove(pos);
        Some(StoreError::Unavailable(format!("injected {:?} failure", op)))
    }
}

// == In-Memory Store ==
/// Versioned parameter store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Seed ==
    /// Writes a parameter out of band, as another writer would, without
    /// recording a call. Returns the new version.
    pub async fn seed(&self, name: &str, value: &str, encrypted: bool) -> i64 {
        self.state.lock().await.upsert(name, value, encrypted)
    }

    /// Returns the current version of a parameter, if it exists.
    pub async fn version(&self, name: &str) -> Option<i64> {
        self.state
            .lock()
            .await
            .parameters
            .get(name)
            .map(|p| p.version)
    }

    // == Failure Injection ==
    /// Makes the next call of the given kind fail with `StoreError::Unavailable`.
    pub async fn fail_next(&self, op: StoreOp) {
        self.state.lock().await.pending_failures.push(op);
    }

    // == Call Log ==
    /// Returns every call recorded so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Returns the number of recorded calls of the given kind.
    pub async fn count(&self, op: StoreOp) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    /// Forgets all recorded calls.
    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn fetch_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Fetch {
            name: name.to_string(),
            with_decryption,
        });
        if let Some(err) = state.take_failure(StoreOp::Fetch) {
            return Err(err);
        }

        let stored = state
            .parameters
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        trace!(parameter = name, version = stored.version, "in-memory fetch");

        let value = if stored.encrypted && !with_decryption {
            CIPHERTEXT_PLACEHOLDER.to_string()
        } else {
            stored.value.clone()
        };

        Ok(Parameter {
            name: name.to_string(),
            value,
            version: stored.version,
        })
    }

    async fn fetch_parameter_metadata(&self, name: &str) -> Result<ParameterMetadata, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Metadata {
            name: name.to_string(),
        });
        if let Some(err) = state.take_failure(StoreOp::Metadata) {
            return Err(err);
        }

        let stored = state
            .parameters
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        Ok(ParameterMetadata {
            name: name.to_string(),
            version: stored.version,
        })
    }

    async fn write_parameter(
        &self,
        name: &str,
        value: &str,
        encrypted: bool,
        overwrite: bool,
    ) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Write {
            name: name.to_string(),
            encrypted,
        });
        if let Some(err) = state.take_failure(StoreOp::Write) {
            return Err(err);
        }

        if !overwrite && state.parameters.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        let version = state.upsert(name, value, encrypted);
        trace!(parameter = name, version, "in-memory write");
        Ok(version)
    }
}
