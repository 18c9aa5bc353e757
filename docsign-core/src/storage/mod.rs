//! Pluggable document store
//!
//! The dispatch layer reads documents through [`DocumentStore`]. The default
//! backend is [`InMemoryDocumentStore`]; a database-backed adapter implements
//! the same trait.
//!
//! # Example
//!
//! ```rust
//! use docsign_core::storage::InMemoryDocumentStore;
//!
//! // Default in-memory store
//! let store = InMemoryDocumentStore::new();
//! assert!(store.is_empty());
//!
//! // Or seed it from an exported JSON array
//! // let store = InMemoryDocumentStore::from_json_file("documents.json")?;
//! ```

use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::document::{Document, DocumentStatus, SignatureDecision, SignatureStatus};
use crate::error::{DocSignError, Result};

/// Document store trait
///
/// Reads must be side-effect free. All methods take `&self`; implementations
/// use interior mutability.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, in insertion order
    async fn all_documents(&self) -> Result<Vec<Document>>;

    /// A single document by id
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Documents created by the given user
    async fn documents_by_user(&self, user_id: &str) -> Result<Vec<Document>> {
        Ok(self
            .all_documents()
            .await?
            .into_iter()
            .filter(|d| d.created_by.id == user_id)
            .collect())
    }

    /// Documents in the given status
    async fn documents_by_status(&self, status: DocumentStatus) -> Result<Vec<Document>> {
        Ok(self
            .all_documents()
            .await?
            .into_iter()
            .filter(|d| d.status == status)
            .collect())
    }

    /// Add a new document
    async fn insert_document(&self, document: Document) -> Result<()>;

    /// Record a signer's decision atomically
    ///
    /// The signer's pending slot moves to signed/rejected exactly once and the
    /// document status is recomputed in the same critical section.
    async fn apply_signature(
        &self,
        document_id: &str,
        user_id: &str,
        decision: SignatureDecision,
        comment: Option<String>,
    ) -> Result<Document>;

    /// Check if the backend is healthy
    async fn health_check(&self) -> Result<()>;

    /// Backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// In-memory document store (default)
///
/// Keeps documents in a `Vec` so iteration follows insertion order.
/// Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Seed a store from a JSON file holding an array of documents
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| DocSignError::IoError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        let documents: Vec<Document> = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded {} document(s) from {}",
            documents.len(),
            path.display()
        );
        Ok(Self::with_documents(documents))
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn all_documents(&self) -> Result<Vec<Document>> {
        let documents = self.documents.read().map_err(|_| DocSignError::StateLocked)?;
        Ok(documents.clone())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let documents = self.documents.read().map_err(|_| DocSignError::StateLocked)?;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_document(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().map_err(|_| DocSignError::StateLocked)?;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(DocSignError::DocumentAlreadyExists {
                document_id: document.id,
            });
        }
        documents.push(document);
        Ok(())
    }

    async fn apply_signature(
        &self,
        document_id: &str,
        user_id: &str,
        decision: SignatureDecision,
        comment: Option<String>,
    ) -> Result<Document> {
        let mut documents = self.documents.write().map_err(|_| DocSignError::StateLocked)?;

        let document = documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| DocSignError::DocumentNotFound {
                document_id: document_id.to_string(),
            })?;

        let signature = document
            .signatures
            .iter_mut()
            .find(|s| s.user_id == user_id)
            .ok_or_else(|| DocSignError::SignatureNotFound {
                document_id: document_id.to_string(),
                user_id: user_id.to_string(),
            })?;

        if signature.status != SignatureStatus::Pending {
            return Err(DocSignError::SignatureAlreadyDecided {
                document_id: document_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        let now = Utc::now();
        signature.status = decision.into();
        signature.signed_at = Some(now);
        signature.comment = comment;

        document.status = document.derived_status();
        document.updated_at = now;

        Ok(document.clone())
    }

    async fn health_check(&self) -> Result<()> {
        let _documents = self.documents.read().map_err(|_| DocSignError::StateLocked)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
