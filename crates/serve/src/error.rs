//! HTTP error mapping
//!
//! Callers only ever see a fixed message; the underlying error is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use searchgate_core::{QueryError, SeedError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Error body returned to callers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors produced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(QueryError::BadRequest) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::SearchFailed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Seed(SeedError::Disabled) => StatusCode::FORBIDDEN,
            ApiError::Seed(SeedError::Failed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Query(QueryError::BadRequest) => "Missing query param q",
            ApiError::Query(QueryError::SearchFailed(_)) => "Search failed",
            ApiError::Seed(SeedError::Disabled) => "Seed endpoint disabled in production",
            ApiError::Seed(SeedError::Failed(_)) => "Seeding failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Query(QueryError::SearchFailed(source)) => {
                error!(category = %source.category(), "Search failed: {}", source);
            }
            ApiError::Seed(SeedError::Failed(source)) => {
                error!(category = %source.category(), "Seeding failed: {}", source);
            }
            other => debug!("Rejected request: {}", other),
        }

        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });

        (self.status(), body).into_response()
    }
}
