//! Route table for the SearchGate front door

use crate::handlers::{
    handle_health, handle_index, handle_search, handle_seed, handle_version, AppState,
};
use axum::{routing::get, Router};

/// API routes configuration
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_index))
        .route("/search", get(handle_search))
        .route("/seed", get(handle_seed))
        .route("/health", get(handle_health))
        .route("/version", get(handle_version))
}
