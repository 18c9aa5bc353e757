//! Read-only document resources
//!
//! Resources are URI-addressed views that agents can read in parallel to the
//! tools. URIs are opaque: transports hand them over already decoded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentStatus};
use crate::error::{DocSignError, Result};
use crate::storage::DocumentStore;

pub const ALL_DOCUMENTS_URI: &str = "documents://all";
pub const PENDING_DOCUMENTS_URI: &str = "documents://pending";

const JSON_MIME_TYPE: &str = "application/json";

/// Resource definition for MCP protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource URI
    pub uri: String,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// MIME type of the resource
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One block of resource content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// Body of a resource read: `{ "contents": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContents {
    pub contents: Vec<ResourceContent>,
}

impl ResourceContents {
    /// Body returned for URIs that match no resource
    pub fn empty() -> Self {
        Self {
            contents: Vec::new(),
        }
    }
}

/// Get all resource definitions
pub fn get_resource_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: ALL_DOCUMENTS_URI.to_string(),
            name: "Todos os documentos".to_string(),
            description: "Lista completa de documentos".to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
        },
        ResourceDefinition {
            uri: PENDING_DOCUMENTS_URI.to_string(),
            name: "Documentos pendentes".to_string(),
            description: "Documentos aguardando assinatura".to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
        },
    ]
}

/// Reads resources from the document store
pub struct ResourceReader {
    store: Arc<dyn DocumentStore>,
}

impl ResourceReader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        get_resource_definitions()
    }

    /// Read a resource by exact URI
    ///
    /// Unknown URIs yield [`DocSignError::ResourceNotFound`]; each transport
    /// decides how to report it.
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents> {
        let documents: Vec<Document> = match uri {
            ALL_DOCUMENTS_URI => self.store.all_documents().await?,
            PENDING_DOCUMENTS_URI => {
                self.store
                    .documents_by_status(DocumentStatus::Pending)
                    .await?
            }
            _ => {
                return Err(DocSignError::ResourceNotFound {
                    uri: uri.to_string(),
                })
            }
        };

        Ok(ResourceContents {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: JSON_MIME_TYPE.to_string(),
                text: serde_json::to_string_pretty(&documents)?,
            }],
        })
    }
}

impl std::fmt::Debug for ResourceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceReader")
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::User;
    use crate::storage::InMemoryDocumentStore;

    fn reader() -> ResourceReader {
        let owner = User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: None,
        };
        let pending = Document::new("Pendente", "p", owner.clone(), &[]);
        let mut signed = Document::new("Assinado", "s", owner, &[]);
        signed.status = DocumentStatus::Signed;
        ResourceReader::new(Arc::new(InMemoryDocumentStore::with_documents(vec![
            pending, signed,
        ])))
    }

    #[test]
    fn test_definitions() {
        let defs = get_resource_definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].uri, "documents://all");
        assert_eq!(defs[1].uri, "documents://pending");
        assert!(defs.iter().all(|d| d.mime_type == "application/json"));
        assert_eq!(defs, get_resource_definitions());
    }

    #[tokio::test]
    async fn test_read_all() {
        let body = reader().read_resource(ALL_DOCUMENTS_URI).await.unwrap();
        assert_eq!(body.contents.len(), 1);
        let docs: Vec<Document> = serde_json::from_str(&body.contents[0].text).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_read_pending() {
        let body = reader().read_resource(PENDING_DOCUMENTS_URI).await.unwrap();
        let docs: Vec<Document> = serde_json::from_str(&body.contents[0].text).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, DocumentStatus::Pending);
        assert_eq!(body.contents[0].uri, "documents://pending");
    }

    #[tokio::test]
    async fn test_read_unknown() {
        let err = reader().read_resource("documents://signed").await.unwrap_err();
        assert!(matches!(err, DocSignError::ResourceNotFound { .. }));

        // Matching is exact; encoded forms are the transport's job
        let err = reader()
            .read_resource("documents%3A%2F%2Fall")
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 404);
    }
}
