//! API Module
//!
//! HTTP handlers and routing that expose the parameter cache to local processes.
//!
//! # Endpoints
//! - `GET /params/*key` - Read a parameter through the cache
//! - `PUT /params` - Write a parameter and refresh its entry
//! - `GET /entries/*key` - Describe a cached entry
//! - `PUT /expiry` - Change the default expiry
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
