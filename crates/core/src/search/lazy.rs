//! Once-initialized search client handle

use super::{ElasticsearchClient, SearchIndex};
use crate::{config::SearchSettings, types::Item, GatewayError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// Builds the [`ElasticsearchClient`] on first use
///
/// Without a node address every call fails with
/// [`GatewayError::ConfigurationMissing`] and no request is sent.
pub struct LazySearchClient {
    url: Option<String>,
    timeout: Duration,
    client: OnceCell<ElasticsearchClient>,
}

impl LazySearchClient {
    pub fn new(url: Option<String>, timeout: Duration) -> Self {
        Self {
            url,
            timeout,
            client: OnceCell::new(),
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.url.clone(), settings.timeout())
    }

    /// Whether the underlying client has been built yet
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> Result<&ElasticsearchClient> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| GatewayError::configuration_missing("search.url"))?;

        self.client
            .get_or_try_init(|| async {
                info!("Creating Elasticsearch client for {}", url);
                ElasticsearchClient::new(url, self.timeout)
            })
            .await
    }
}

#[async_trait]
impl SearchIndex for LazySearchClient {
    async fn search(
        &self,
        collection: &str,
        match_field: &str,
        match_text: &str,
    ) -> Result<Vec<Item>> {
        self.client()
            .await?
            .search(collection, match_field, match_text)
            .await
    }

    async fn index(&self, collection: &str, item: &Item) -> Result<()> {
        self.client().await?.index(collection, item).await
    }

    async fn ping(&self) -> Result<()> {
        self.client().await?.ping().await
    }
}
