//! Microsite server
//!
//! The only shared state is the public API client, whose caches are safe to
//! use from concurrent requests, and the compiled templates.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use super::routes::create_router;
use super::templates::SiteTemplates;
use crate::api::PublicClient;
use crate::config::{Config, SiteConfig};

/// Shared application state
#[derive(Clone)]
pub struct SiteState {
    /// Public API client with its revalidation caches
    pub client: PublicClient,

    /// Compiled page templates
    pub templates: Arc<SiteTemplates>,

    /// Site settings (origin, sitemap slugs)
    pub site: Arc<SiteConfig>,

    /// Server start time
    pub start_time: Instant,
}

impl SiteState {
    pub fn new(client: PublicClient, site: SiteConfig) -> Result<Self, ServerError> {
        let templates =
            SiteTemplates::new().map_err(|e| ServerError::Init(format!("templates: {e}")))?;
        Ok(Self {
            client,
            templates: Arc::new(templates),
            site: Arc::new(site),
            start_time: Instant::now(),
        })
    }
}

/// Server errors
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("Server error: {0}")]
    Serve(String),
}

/// HTTP server for the hospital microsites
pub struct SiteServer {
    bind_address: SocketAddr,
    state: SiteState,
}

impl SiteServer {
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let bind_address: SocketAddr = config.site.bind_address.parse().map_err(|e| {
            ServerError::Config(format!("bind address '{}': {e}", config.site.bind_address))
        })?;

        let client = PublicClient::new(&config.api, &config.site)
            .map_err(|e| ServerError::Init(e.to_string()))?;
        let state = SiteState::new(client, config.site.clone())?;

        Ok(Self {
            bind_address,
            state,
        })
    }

    pub fn state(&self) -> SiteState {
        self.state.clone()
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the router with request tracing
    pub fn build_router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Serve until the shutdown future resolves
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();

        tracing::info!(
            addr = %self.bind_address,
            origin = self.state.site.origin(),
            "Starting microsite server"
        );

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Microsite server shutdown complete");
        Ok(())
    }
}
