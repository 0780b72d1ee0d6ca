//! HTTP server for the article search service.
//!
//! The server owns the single engine client for the life of the process. Requests share
//! it read-only; nothing else is shared between requests.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::client::ElasticsearchClient;
use crate::config::Config;

pub use routes::{AppState, create_router};

/// Article search HTTP server.
pub struct ArticleServer {
    /// Handler state.
    state: Arc<AppState>,

    /// Server configuration.
    config: Config,
}

impl ArticleServer {
    /// Create a new server around an engine client.
    #[must_use]
    pub fn new(config: Config, client: ElasticsearchClient) -> Self {
        let state = Arc::new(AppState::new(client, &config));
        Self { state, config }
    }

    /// Build the router without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state), &self.config)
    }

    /// Verify the engine answers before accepting traffic.
    ///
    /// # Errors
    ///
    /// Returns error if the engine cannot be pinged.
    pub async fn check_engine(&self) -> anyhow::Result<()> {
        let url = &self.config.elasticsearch_url;
        self.state
            .client
            .ping()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to check Elasticsearch health at {url}: {e}"))?;
        tracing::info!(%url, "Elasticsearch is reachable");
        Ok(())
    }

    /// Run the HTTP server until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self) -> anyhow::Result<()> {
        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));

        tracing::info!(index = %self.config.index, "HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Get the handler state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl std::fmt::Debug for ArticleServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleServer")
            .field("index", &self.state.index)
            .field("port", &self.config.port)
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
