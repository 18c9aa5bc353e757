//! DocSign MCP Server Library
//!
//! Stdio JSON-RPC binding for the DocSign tool dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! Agent (MCP client)
//!        │  newline-delimited JSON-RPC 2.0
//!        ▼
//! ┌─────────────────┐
//! │   MCP Server    │ ◄── This crate
//! │                 │
//! │  tools/list     │
//! │  tools/call     │
//! │  resources/list │
//! │  resources/read │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  docsign-core   │
//! │                 │
//! │ Dispatcher      │
//! │ Resources       │
//! │ Store │ Provider│
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docsign_core::{InMemoryDocumentStore, ProviderCache, ProviderConfig};
//! use docsign_mcp::McpServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(InMemoryDocumentStore::new());
//!     let providers = Arc::new(ProviderCache::new(ProviderConfig::from_env().unwrap()));
//!     McpServer::from_store(store, providers).run_stdio().await.unwrap();
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use error::{McpError, McpResult};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::{McpServer, MAX_MESSAGE_BYTES};

/// Server name reported by `initialize`
pub const SERVER_NAME: &str = "docsign-mcp";

/// Server version reported by `initialize`
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";
