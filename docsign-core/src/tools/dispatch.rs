//! Tool dispatcher
//!
//! Routes `{name, arguments}` to the matching catalog entry, validates the
//! arguments, calls the document store and/or analysis provider, and wraps
//! the outcome in a [`ToolResult`]. Collaborator failures never escape: they
//! become error envelopes.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use super::args::{PendingSignature, ToolArgs};
use super::{ToolCatalog, ToolDefinition, ToolResult};
use crate::analysis::{AnalysisProvider, ProviderCache};
use crate::document::Document;
use crate::error::{DocSignError, ErrorCategory, Result};
use crate::storage::DocumentStore;

/// Shared tool dispatcher used by every transport
pub struct ToolDispatcher {
    catalog: ToolCatalog,
    store: Arc<dyn DocumentStore>,
    providers: Arc<ProviderCache>,
}

impl ToolDispatcher {
    pub fn new(store: Arc<dyn DocumentStore>, providers: Arc<ProviderCache>) -> Self {
        Self {
            catalog: ToolCatalog::standard(),
            store,
            providers,
        }
    }

    /// Dispatcher bound to a fixed provider instead of a configured one
    pub fn with_provider(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn AnalysisProvider>,
    ) -> Self {
        Self::new(store, Arc::new(ProviderCache::preloaded(provider)))
    }

    /// Catalog definitions, identical on every call
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.catalog.definitions()
    }

    /// The analysis provider cache this dispatcher reads from
    pub fn providers(&self) -> &Arc<ProviderCache> {
        &self.providers
    }

    /// Call a tool and wrap the outcome in an envelope
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> ToolResult {
        tracing::debug!(tool = name, "dispatching tool call");
        match self.execute(name, arguments).await {
            Ok(payload) => ToolResult::from_payload(&payload),
            Err(err) => {
                match err.category() {
                    ErrorCategory::External | ErrorCategory::Internal => {
                        tracing::error!(tool = name, error = %err, "tool call failed")
                    }
                    _ => tracing::debug!(tool = name, error = %err, "tool call rejected"),
                }
                ToolResult::from_error(&err)
            }
        }
    }

    /// Call a tool and return the raw payload
    pub async fn execute(&self, name: &str, arguments: &Value) -> Result<Value> {
        let entry = self
            .catalog
            .find(name)
            .ok_or_else(|| DocSignError::UnknownTool {
                name: name.to_string(),
            })?;
        let args = entry.validate(arguments)?;
        self.run(args).await
    }

    async fn run(&self, args: ToolArgs) -> Result<Value> {
        match args {
            ToolArgs::GetDocuments { status } => {
                let documents = self.store.all_documents().await?;
                let documents: Vec<Document> = match status {
                    Some(status) => documents
                        .into_iter()
                        .filter(|d| d.status.as_str() == status)
                        .collect(),
                    None => documents,
                };
                Ok(serde_json::to_value(documents)?)
            }

            ToolArgs::GetDocument { document_id } => {
                let document = self.require_document(&document_id).await?;
                Ok(serde_json::to_value(document)?)
            }

            ToolArgs::AnalyzeDocument { document_id } => {
                let content = self.require_document(&document_id).await?.analysis_content();
                let provider = self.providers.get()?;
                let analysis = self.bounded(provider.analyze_document(&content)).await?;
                Ok(serde_json::to_value(analysis)?)
            }

            ToolArgs::GenerateDocumentSummary { document_id } => {
                let content = self.require_document(&document_id).await?.analysis_content();
                let provider = self.providers.get()?;
                let summary = self.bounded(provider.generate_summary(&content)).await?;
                Ok(serde_json::json!({ "summary": summary }))
            }

            ToolArgs::SuggestDocumentImprovements { document_id } => {
                let content = self.require_document(&document_id).await?.analysis_content();
                let provider = self.providers.get()?;
                let suggestions = self
                    .bounded(provider.suggest_improvements(&content))
                    .await?;
                Ok(serde_json::json!({ "suggestions": suggestions }))
            }

            ToolArgs::CheckDocumentCompliance { document_id, rules } => {
                let content = self.require_document(&document_id).await?.analysis_content();
                let provider = self.providers.get()?;
                let compliance = self
                    .bounded(provider.check_compliance(&content, rules.as_deref()))
                    .await?;
                Ok(serde_json::to_value(compliance)?)
            }

            ToolArgs::GetPendingSignatures => {
                let pending: Vec<PendingSignature> = self
                    .store
                    .all_documents()
                    .await?
                    .iter()
                    .flat_map(|doc| {
                        doc.pending_signatures().map(|signature| PendingSignature {
                            document_id: doc.id.clone(),
                            document_title: doc.title.clone(),
                            signature: signature.clone(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_value(pending)?)
            }

            ToolArgs::GetUserDocuments { user_id } => {
                let documents = self.store.documents_by_user(&user_id).await?;
                Ok(serde_json::to_value(documents)?)
            }
        }
    }

    async fn require_document(&self, document_id: &str) -> Result<Document> {
        self.store
            .get_document(document_id)
            .await?
            .ok_or_else(|| DocSignError::DocumentNotFound {
                document_id: document_id.to_string(),
            })
    }

    /// Await a provider call under the configured timeout
    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        let timeout = self.providers.timeout();
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DocSignError::ProviderTimeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.catalog.len())
            .field("store", &self.store.name())
            .field("providers", &self.providers)
            .finish()
    }
}
