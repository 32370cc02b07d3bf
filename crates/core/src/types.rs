//! Core type definitions for SearchGate

use crate::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Caller-supplied query text
///
/// Used verbatim as both the cache key and the match term. No case folding,
/// trimming or stemming is applied, so `" "` is a valid query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Build a query, rejecting the empty string
    pub fn new<S: Into<String>>(text: S) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// Raw query text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document stored in the search index
///
/// The index owns the schema, so the document is kept as the raw JSON object
/// it was stored as. `name` and `category` are read on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(serde_json::Map<String, serde_json::Value>);

impl Item {
    /// Create an item with a name and category
    pub fn new<N: Into<String>, C: Into<String>>(name: N, category: C) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("name".to_string(), serde_json::Value::String(name.into()));
        fields.insert(
            "category".to_string(),
            serde_json::Value::String(category.into()),
        );
        Self(fields)
    }

    /// The `name` field, when it is a string
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    /// The `category` field, when it is a string
    pub fn category(&self) -> Option<&str> {
        self.0.get("category").and_then(serde_json::Value::as_str)
    }

    /// Any field of the stored document
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Item {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(fields)
    }
}

/// Where the data in a [`SearchResponse`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchSource {
    Cache,
    SearchEngine,
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::SearchEngine => write!(f, "search-engine"),
        }
    }
}

/// Result of a gateway search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub source: SearchSource,
    pub data: Vec<Item>,
}

/// Deployment mode; production disables seeding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

impl DeploymentMode {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(GatewayError::validation(format!(
                "Unknown deployment mode: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
