//! Server module for the SearchGate serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    Router,
};
use searchgate_core::{
    config::{GatewayConfig, ServerSettings},
    GatewayError, Result, SearchGateway,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// SearchGate HTTP server
pub struct GatewayServer {
    settings: ServerSettings,
    app: Router,
}

impl GatewayServer {
    /// Create a server with clients built from `config`
    ///
    /// Neither the cache store nor the search engine is contacted here.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let gateway = SearchGateway::from_config(config)?;
        Ok(Self::with_gateway(config.server.clone(), gateway))
    }

    /// Create a server around an already-built gateway
    pub fn with_gateway(settings: ServerSettings, gateway: SearchGateway) -> Self {
        let app = create_app(&settings, AppState::new(gateway));
        Self { settings, app }
    }

    /// Start the server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.settings.host, self.settings.port);
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| GatewayError::validation(format!("Invalid address {}: {}", addr, e)))?;

        tracing::info!("Starting SearchGate server on {}", addr);

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("SearchGate server stopped");
        Ok(())
    }

    /// Get the server settings
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Get a handle to the router, e.g. for in-process requests
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Create the Axum application with middleware
pub fn create_app(settings: &ServerSettings, state: AppState) -> Router {
    let mut app = create_routes().with_state(state);

    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(settings.max_request_size)),
    );

    if settings.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers([ACCEPT, CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchgate_core::config::CacheBackend;

    #[test]
    fn test_server_from_config() {
        let mut config = GatewayConfig::default();
        config.cache.backend = CacheBackend::Memory;
        config.server.port = 8080;
        config.server.cors_enabled = false;

        let server = GatewayServer::new(&config).unwrap();
        assert_eq!(server.settings().port, 8080);
        assert!(!server.settings().cors_enabled);
    }

    #[test]
    fn test_server_with_unparsable_redis_url() {
        let mut config = GatewayConfig::default();
        config.cache.url = "nonsense".to_string();

        assert!(GatewayServer::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_invalid_host_is_rejected() {
        let mut config = GatewayConfig::default();
        config.cache.backend = CacheBackend::Memory;
        config.server.host = "not a host".to_string();

        let err = GatewayServer::new(&config).unwrap().start().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));
    }
}
