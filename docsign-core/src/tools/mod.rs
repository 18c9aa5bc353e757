//! Tool catalog and dispatch
//!
//! The catalog is a fixed, ordered list of [`ToolEntry`] values. Each entry
//! pairs the definition served to clients with the list of required string
//! fields and a builder that turns validated arguments into a typed
//! [`ToolArgs`]. Adding a tool means appending an entry here and a branch in
//! [`ToolDispatcher`].

mod args;
mod dispatch;
mod result;

pub use args::{PendingSignature, ToolArgs};
pub use dispatch::ToolDispatcher;
pub use result::{ToolContent, ToolResult};

use std::sync::{Arc, OnceLock};

use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;

/// Catalog version, bumped whenever a descriptor changes
pub const CATALOG_VERSION: &str = "1.0";

/// Tool definition served by `tools/list` and `GET /tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description shown to the agent
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Builds typed arguments from an already validated argument object
pub(crate) type ArgsBuilder = fn(&Map<String, Value>) -> Result<ToolArgs>;

/// Input schema, compiled on first validation and shared by clones
pub(crate) type SchemaCell = Arc<OnceLock<std::result::Result<JSONSchema, String>>>;

/// A catalog entry: definition plus validator
#[derive(Clone)]
pub struct ToolEntry {
    pub definition: ToolDefinition,
    /// String fields that must be present
    pub required: &'static [&'static str],
    pub(crate) build: ArgsBuilder,
    pub(crate) schema: SchemaCell,
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("definition", &self.definition)
            .field("required", &self.required)
            .field("schema_compiled", &self.schema.get().is_some())
            .finish()
    }
}

impl ToolEntry {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// The fixed, ordered tool catalog
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    entries: Vec<ToolEntry>,
}

impl ToolCatalog {
    /// The document tool catalog
    pub fn standard() -> Self {
        Self {
            entries: vec![
                entry(
                    "get_documents",
                    "Lista todos os documentos, opcionalmente filtrados por status",
                    json!({
                        "type": "object",
                        "properties": {
                            "status": {
                                "type": "string",
                                "description": "Filtrar por status (pending, signed, rejected, expired)"
                            }
                        }
                    }),
                    &[],
                    args::get_documents,
                ),
                entry(
                    "get_document",
                    "Obtém os detalhes de um documento específico",
                    document_id_schema(),
                    &["documentId"],
                    args::get_document,
                ),
                entry(
                    "analyze_document",
                    "Analisa um documento com IA: resumo, pontos-chave, nível de risco e sugestões",
                    document_id_schema(),
                    &["documentId"],
                    args::analyze_document,
                ),
                entry(
                    "generate_document_summary",
                    "Gera um resumo do conteúdo de um documento",
                    document_id_schema(),
                    &["documentId"],
                    args::generate_document_summary,
                ),
                entry(
                    "suggest_document_improvements",
                    "Sugere melhorias para o texto de um documento",
                    document_id_schema(),
                    &["documentId"],
                    args::suggest_document_improvements,
                ),
                entry(
                    "check_document_compliance",
                    "Verifica a conformidade de um documento com regras informadas",
                    json!({
                        "type": "object",
                        "required": ["documentId"],
                        "properties": {
                            "documentId": {
                                "type": "string",
                                "description": "ID do documento"
                            },
                            "rules": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Regras de conformidade a verificar"
                            }
                        }
                    }),
                    &["documentId"],
                    args::check_document_compliance,
                ),
                entry(
                    "get_pending_signatures",
                    "Lista todas as assinaturas pendentes em todos os documentos",
                    json!({
                        "type": "object",
                        "properties": {}
                    }),
                    &[],
                    args::get_pending_signatures,
                ),
                entry(
                    "get_user_documents",
                    "Lista os documentos criados por um usuário",
                    json!({
                        "type": "object",
                        "required": ["userId"],
                        "properties": {
                            "userId": {
                                "type": "string",
                                "description": "ID do usuário"
                            }
                        }
                    }),
                    &["userId"],
                    args::get_user_documents,
                ),
            ],
        }
    }

    /// Definitions in catalog order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.entries.iter().map(|e| e.definition.clone()).collect()
    }

    /// Exact-name lookup
    pub fn find(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    ToolCatalog::standard().definitions()
}

fn entry(
    name: &str,
    description: &str,
    input_schema: Value,
    required: &'static [&'static str],
    build: ArgsBuilder,
) -> ToolEntry {
    ToolEntry {
        definition: ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        },
        required,
        build,
        schema: SchemaCell::default(),
    }
}

fn document_id_schema() -> Value {
    json!({
        "type": "object",
        "required": ["documentId"],
        "properties": {
            "documentId": {
                "type": "string",
                "description": "ID do documento"
            }
        }
    })
}
