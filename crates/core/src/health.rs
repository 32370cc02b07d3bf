//! Dependency reachability reporting
//!
//! Health checks never fail: an unreachable dependency is reported as
//! `unavailable` and logged.

use crate::gateway::SearchGateway;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Overall gateway health
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every dependency is reachable
    Ok,
    /// At least one dependency is unreachable
    Degraded,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Ok)
    }
}

/// Reachability of one dependency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Connected,
    Unavailable,
}

/// Per-dependency reachability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceReport {
    pub cache: ServiceState,
    pub search: ServiceState,
}

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub services: ServiceReport,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

impl SearchGateway {
    /// Ping the cache store and the search index concurrently
    pub async fn health(&self) -> HealthReport {
        let (cache, search) = tokio::join!(self.cache.ping(), self.search.ping());

        let cache = match cache {
            Ok(()) => ServiceState::Connected,
            Err(e) => {
                warn!("Cache health check failed: {}", e);
                ServiceState::Unavailable
            }
        };
        let search = match search {
            Ok(()) => ServiceState::Connected,
            Err(e) => {
                warn!("Search engine health check failed: {}", e);
                ServiceState::Unavailable
            }
        };

        let status = if cache == ServiceState::Connected && search == ServiceState::Connected {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            services: ServiceReport { cache, search },
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCache, FakeSearch};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_all_connected() {
        let gateway = SearchGateway::new(
            Arc::new(FakeCache::new()),
            Arc::new(FakeSearch::returning(vec![])),
        );

        let report = gateway.health().await;
        assert!(report.is_healthy());
        assert_eq!(
            report.services,
            ServiceReport {
                cache: ServiceState::Connected,
                search: ServiceState::Connected,
            }
        );
    }

    #[tokio::test]
    async fn test_cache_down_search_up() {
        let gateway = SearchGateway::new(
            Arc::new(FakeCache::down()),
            Arc::new(FakeSearch::returning(vec![])),
        );

        let report = gateway.health().await;
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.services.cache, ServiceState::Unavailable);
        assert_eq!(report.services.search, ServiceState::Connected);
    }

    #[tokio::test]
    async fn test_both_down() {
        let gateway = SearchGateway::new(
            Arc::new(FakeCache::down()),
            Arc::new(FakeSearch::failing()),
        );

        let report = gateway.health().await;
        assert!(!report.is_healthy());
        assert_eq!(report.services.search, ServiceState::Unavailable);
    }

    #[test]
    fn test_report_serialization() {
        let report = HealthReport {
            status: HealthStatus::Degraded,
            services: ServiceReport {
                cache: ServiceState::Unavailable,
                search: ServiceState::Connected,
            },
            timestamp: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], json!("degraded"));
        assert_eq!(
            value["services"],
            json!({"cache": "unavailable", "search": "connected"})
        );
    }
}
