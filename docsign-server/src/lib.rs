//! DocSign Server - HTTP facade for the document tools
//!
//! Exposes the same tool catalog, dispatcher and resources as the stdio
//! server, over REST:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   DocSignServer                      │
//! │  ┌─────────────────────────────────────────────┐    │
//! │  │   docsign-core::ToolDispatcher / Resources   │    │
//! │  │         (all logic lives here)              │    │
//! │  └─────────────────────────────────────────────┘    │
//! │                        │                             │
//! │  ┌──────────┬──────────┼──────────┬──────────┐      │
//! │  ▼          ▼          ▼          ▼          ▼      │
//! │ /tools    /call   /resources /resources/*uri /health│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every route except `/health` lives under the configured base path
//! (default `/mcp`).

mod config;
pub mod routes;

pub use config::{ServerConfig, ServerConfigBuilder};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use docsign_core::{DocumentStore, ProviderCache, ResourceReader, ToolDispatcher};

/// Shared application state
pub struct AppState {
    pub dispatcher: Arc<ToolDispatcher>,
    pub resources: Arc<ResourceReader>,
}

impl AppState {
    pub fn new(dispatcher: Arc<ToolDispatcher>, resources: Arc<ResourceReader>) -> Self {
        Self {
            dispatcher,
            resources,
        }
    }

    /// State over a store and provider cache
    pub fn from_store(store: Arc<dyn DocumentStore>, providers: Arc<ProviderCache>) -> Self {
        Self::new(
            Arc::new(ToolDispatcher::new(Arc::clone(&store), providers)),
            Arc::new(ResourceReader::new(store)),
        )
    }
}

/// DocSign HTTP Server
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docsign_core::{InMemoryDocumentStore, ProviderCache, ProviderConfig};
/// use docsign_server::{AppState, DocSignServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let state = AppState::from_store(
///         Arc::new(InMemoryDocumentStore::new()),
///         Arc::new(ProviderCache::new(ProviderConfig::local())),
///     );
///     let config = ServerConfig::builder().port(3001).build();
///
///     DocSignServer::new(state, config).run().await.unwrap();
/// }
/// ```
pub struct DocSignServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl DocSignServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        routes::create_router(Arc::clone(&self.state), &self.config)
    }

    /// Get the socket address for the server
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.addr();
        let base = self.config.normalized_base_path();

        tracing::info!("DocSign Server listening on http://{}", addr);
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /health");
        tracing::info!("  GET  {}/tools", base);
        tracing::info!("  POST {}/call", base);
        tracing::info!("  GET  {}/resources", base);
        tracing::info!("  GET  {}/resources/:uri", base);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
