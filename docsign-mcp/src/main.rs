//! DocSign MCP Server Binary
//!
//! Document tools for AI agents over stdio.
//!
//! ## Usage
//!
//! ```bash
//! # Run as MCP server (stdio), empty store
//! docsign-mcp
//!
//! # Seed the store and pick a provider
//! AI_PROVIDER=gemini GEMINI_API_KEY=... docsign-mcp --data-file documents.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use docsign_core::{DocumentStore, InMemoryDocumentStore, ProviderCache, ProviderConfig};
use docsign_mcp::McpServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docsign-mcp")]
#[command(about = "DocSign MCP server over stdio")]
#[command(version)]
struct Args {
    /// JSON array of documents to seed the in-memory store
    #[arg(long, env = "DOCSIGN_DATA_FILE")]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries protocol frames only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsign_mcp=info,docsign_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    tracing::info!("Starting DocSign MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn DocumentStore> = match &args.data_file {
        Some(path) => Arc::new(InMemoryDocumentStore::from_json_file(path)?),
        None => Arc::new(InMemoryDocumentStore::new()),
    };

    let config = ProviderConfig::from_env()?;
    tracing::info!(provider = ?config.kind, "analysis provider configured");

    let server = McpServer::from_store(store, Arc::new(ProviderCache::new(config)));

    tracing::info!("MCP server ready, listening on stdio");
    server.run_stdio().await?;

    Ok(())
}
