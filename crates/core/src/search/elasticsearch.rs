//! Elasticsearch client implementation over the REST API

use super::SearchIndex;
use crate::{types::Item, GatewayError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Elasticsearch client for match queries and document indexing
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    client: Client,
    base_url: String,
}

impl ElasticsearchClient {
    /// Create a new client for the node at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL of the Elasticsearch node
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchClient {
    async fn search(
        &self,
        collection: &str,
        match_field: &str,
        match_text: &str,
    ) -> Result<Vec<Item>> {
        let url = format!("{}/{}/_search", self.base_url, collection);

        let mut clause = Map::new();
        clause.insert(match_field.to_string(), Value::String(match_text.to_string()));
        let body = json!({ "query": { "match": clause } });

        debug!("Searching {} for {}={:?}", url, match_field, match_text);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::search(format!("Failed to send search request: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::search(format!(
                "Search request failed: HTTP {}",
                response.status()
            )));
        }

        let parsed: SearchBody = response
            .json()
            .await
            .map_err(|e| GatewayError::search(format!("Failed to parse search response: {}", e)))?;

        Ok(parsed.hits.hits.into_iter().map(|hit| hit.source).collect())
    }

    async fn index(&self, collection: &str, item: &Item) -> Result<()> {
        // wait_for makes the document visible to the next search
        let url = format!("{}/{}/_doc?refresh=wait_for", self.base_url, collection);

        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| GatewayError::search(format!("Failed to send index request: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::search(format!(
                "Index request failed: HTTP {}",
                response.status()
            )));
        }

        debug!(
            "Indexed '{}' into {}",
            item.name().unwrap_or("<unnamed>"),
            collection
        );
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let url = format!("{}/", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(GatewayError::search(format!(
                "Elasticsearch ping failed: HTTP {}",
                response.status()
            ))),
            Err(e) => {
                warn!("Elasticsearch ping failed: {}", e);
                Err(GatewayError::search(format!(
                    "Elasticsearch unreachable: {}",
                    e
                )))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Item,
}
