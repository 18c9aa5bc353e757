//! DocSign Server Binary
//!
//! HTTP server exposing the DocSign document tools over REST.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 3001, routes under /mcp)
//! docsign-server
//!
//! # Custom port and prefix, seeded store
//! DOCSIGN_PORT=8080 docsign-server --base-path /api --data-file documents.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use docsign_core::{DocumentStore, InMemoryDocumentStore, ProviderCache, ProviderConfig};
use docsign_server::{AppState, DocSignServer, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docsign-server")]
#[command(about = "DocSign HTTP server")]
#[command(version)]
struct Args {
    /// JSON array of documents to seed the in-memory store
    #[arg(long, env = "DOCSIGN_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "DOCSIGN_PORT", default_value_t = 3001)]
    port: u16,

    /// Prefix for the tool and resource routes
    #[arg(long, env = "DOCSIGN_BASE_PATH", default_value = "/mcp")]
    base_path: String,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsign_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let store: Arc<dyn DocumentStore> = match &args.data_file {
        Some(path) => Arc::new(InMemoryDocumentStore::from_json_file(path)?),
        None => {
            tracing::warn!("No data file given, starting with an empty store");
            Arc::new(InMemoryDocumentStore::new())
        }
    };

    let providers = ProviderConfig::from_env()?;
    tracing::info!(provider = ?providers.kind, "analysis provider configured");

    let config = ServerConfig::builder()
        .port(args.port)
        .base_path(args.base_path)
        .cors(!args.no_cors)
        .build();

    tracing::info!("Starting DocSign Server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_store(store, Arc::new(ProviderCache::new(providers)));
    let server = DocSignServer::new(state, config);
    server.run().await?;

    Ok(())
}
