//! Param Cache - A read-through cache for remote configuration parameters
//!
//! Serves cached values until their TTL lapses, then checks the store's
//! version cheaply before paying for a full (possibly decrypting) fetch.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::ParameterCache;
pub use client::{HttpStoreClient, InMemoryStore, StoreClient};
pub use config::Config;
pub use error::CacheError;
