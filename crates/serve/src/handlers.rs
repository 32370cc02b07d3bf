//! HTTP handlers for the SearchGate front door

use crate::error::ApiError;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
};
use searchgate_core::{HealthReport, SearchGateway, SearchResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SearchGateway>,
}

impl AppState {
    pub fn new(gateway: SearchGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Query parameters for `GET /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryParams {
    /// Search query text; missing and empty are both rejected
    pub q: Option<String>,
}

/// Handler for `GET /search`
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    let response = state.gateway.search(&query).await?;

    debug!(
        "Search {:?} answered from {} with {} items",
        query,
        response.source,
        response.data.len()
    );

    Ok(Json(response))
}

/// Handler for `GET /seed`
pub async fn handle_seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let indexed = state.gateway.seed().await?;

    Ok(Json(SeedResponse {
        message: "Data seeded successfully".to_string(),
        indexed,
    }))
}

/// Handler for `GET /health`; always 200
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.gateway.health().await)
}

/// Handler for `GET /version`
pub async fn handle_version() -> impl IntoResponse {
    Json(VersionResponse {
        version: crate::VERSION.to_string(),
    })
}

/// Handler for `GET /`, the search page
pub async fn handle_index() -> Html<&'static str> {
    Html(crate::ui::INDEX_HTML)
}

// Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    pub indexed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}
