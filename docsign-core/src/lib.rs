//! # DocSign Core
//!
//! Tool-dispatch and resource-read layer behind the DocSign MCP facade.
//!
//! - **Tool catalog**: a fixed, ordered list of document tools with JSON Schemas
//! - **Tool dispatcher**: validates `{name, arguments}`, calls the document store
//!   and analysis provider, and returns a uniform `{content, isError}` envelope
//! - **Resource reader**: `documents://all` and `documents://pending`
//! - **Analysis providers**: OpenAI, Gemini, or a deterministic local stand-in
//!
//! Transports (stdio in `docsign-mcp`, HTTP in `docsign-server`) are thin
//! adapters around the same [`ToolDispatcher`] and [`ResourceReader`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docsign_core::{
//!     Document, InMemoryDocumentStore, ProviderCache, ProviderConfig, ToolDispatcher, User,
//! };
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let owner = User {
//!     id: "u1".to_string(),
//!     name: "Ana".to_string(),
//!     email: "ana@example.com".to_string(),
//!     role: None,
//! };
//! let mut doc = Document::new("Contrato", "Prestação de serviços", owner, &[]);
//! doc.id = "doc-1".to_string();
//!
//! let store = Arc::new(InMemoryDocumentStore::with_documents(vec![doc]));
//! let providers = Arc::new(ProviderCache::new(ProviderConfig::local()));
//! let dispatcher = ToolDispatcher::new(store, providers);
//!
//! let result = dispatcher
//!     .call_tool("get_document", &json!({ "documentId": "doc-1" }))
//!     .await;
//! assert!(!result.is_error);
//! assert_eq!(result.payload().unwrap()["id"], "doc-1");
//! # }
//! ```

pub mod analysis;
pub mod document;
pub mod error;
pub mod resources;
pub mod storage;
pub mod tools;

// Re-export main types
pub use analysis::{
    AnalysisProvider, AnalysisResult, ComplianceResult, LocalAnalysisProvider, ProviderCache,
    ProviderConfig, ProviderKind, RiskLevel,
};
pub use document::{
    Document, DocumentStatus, Signature, SignatureDecision, SignatureStatus, User,
};
pub use error::{DocSignError, ErrorCategory, ErrorResponse, Result};
pub use resources::{
    ResourceContent, ResourceContents, ResourceDefinition, ResourceReader, ALL_DOCUMENTS_URI,
    PENDING_DOCUMENTS_URI,
};
pub use storage::{DocumentStore, InMemoryDocumentStore};
pub use tools::{
    PendingSignature, ToolCatalog, ToolContent, ToolDefinition, ToolDispatcher, ToolResult,
    CATALOG_VERSION,
};
