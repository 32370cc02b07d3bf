//! SearchGate Serve Library
//!
//! HTTP front door for the SearchGate gateway.
//!
//! # Endpoints
//!
//! - `GET /` - search page
//! - `GET /search?q=iphone` - cache-aside search
//! - `GET /seed` - index the demo items (refused in production)
//! - `GET /health` - per-dependency reachability, always 200
//! - `GET /version` - server version

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;
pub mod ui;

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;
pub use server::{create_app, GatewayServer};

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
