//! Search engine clients
//!
//! The gateway talks to the document index through the [`SearchIndex`]
//! trait. [`ElasticsearchClient`] speaks the Elasticsearch REST API and
//! [`LazySearchClient`] defers building it until the first call, so a missing
//! node address surfaces as [`GatewayError::ConfigurationMissing`] on use
//! rather than at startup.
//!
//! [`GatewayError::ConfigurationMissing`]: crate::GatewayError::ConfigurationMissing

pub mod elasticsearch;
pub mod lazy;

use crate::{types::Item, Result};
use async_trait::async_trait;

pub use elasticsearch::ElasticsearchClient;
pub use lazy::LazySearchClient;

/// Full-text document index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a match query of `match_text` against `match_field`
    ///
    /// Documents come back in the engine's relevance order.
    async fn search(
        &self,
        collection: &str,
        match_field: &str,
        match_text: &str,
    ) -> Result<Vec<Item>>;

    /// Add a document to `collection`
    async fn index(&self, collection: &str, item: &Item) -> Result<()>;

    /// Check that the engine is reachable
    async fn ping(&self) -> Result<()>;
}
