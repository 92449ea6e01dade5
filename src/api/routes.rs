//! API Routes
//!
//! Configures the Axum router with all parameter cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    entry_handler, expiry_handler, get_handler, health_handler, put_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /params/*key?decrypt=bool` - Read a parameter through the cache
/// - `PUT /params` - Write a parameter and refresh its entry
/// - `GET /entries/*key` - Describe a cached entry (no remote call)
/// - `PUT /expiry` - Change the TTL applied on subsequent refreshes
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/params", put(put_handler))
        .route("/params/*key", get(get_handler))
        .route("/entries/*key", get(entry_handler))
        .route("/expiry", put(expiry_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
