//! # HTTP Server
//!
//! Binds the router, the CORS layer, and request tracing into one
//! serveable unit.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::{HttpServerConfig, ServiceConfig};
use super::routes::{api_routes, AppState};

/// HTTP server for the dispatch API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with bind settings from the environment
    pub fn new(service: ServiceConfig) -> Self {
        Self::with_config(HttpServerConfig::from_env(), service)
    }

    /// Create a server with explicit bind settings
    pub fn with_config(config: HttpServerConfig, service: ServiceConfig) -> Self {
        let router = Self::build_router(service);
        Self { config, router }
    }

    /// Build the router with CORS and tracing applied
    fn build_router(service: ServiceConfig) -> Router {
        let state = Arc::new(AppState::new(service));

        // The service is called from arbitrary origins; permissive CORS.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        api_routes(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

        tracing::info!(%addr, "listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}

/// Load configuration from the environment and run until shutdown
pub async fn run() -> io::Result<()> {
    let service = ServiceConfig::from_env();
    if service.identity.is_none() {
        // Keep listening anyway so health checks can report the problem.
        tracing::warn!("BFHL_IDENTITY is not set; all endpoints will report a configuration error");
    }
    if service.gemini_api_key.is_none() {
        tracing::info!("GEMINI_API_KEY is not set; the AI operation is disabled");
    }
    HttpServer::new(service).start().await
}
