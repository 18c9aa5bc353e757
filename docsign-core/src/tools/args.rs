//! Argument validation and typed tool arguments

use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ToolEntry;
use crate::document::Signature;
use crate::error::{DocSignError, Result};

/// Validated, typed arguments for one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArgs {
    GetDocuments { status: Option<String> },
    GetDocument { document_id: String },
    AnalyzeDocument { document_id: String },
    GenerateDocumentSummary { document_id: String },
    SuggestDocumentImprovements { document_id: String },
    CheckDocumentCompliance {
        document_id: String,
        rules: Option<Vec<String>>,
    },
    GetPendingSignatures,
    GetUserDocuments { user_id: String },
}

/// One entry of the `get_pending_signatures` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSignature {
    pub document_id: String,
    pub document_title: String,
    pub signature: Signature,
}

impl ToolEntry {
    /// Validate raw arguments and build the typed record
    ///
    /// Order: object shape, required string fields (field-specific message),
    /// then the full input schema.
    pub fn validate(&self, arguments: &Value) -> Result<ToolArgs> {
        let empty = Map::new();
        let object = match arguments {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(DocSignError::InvalidArguments {
                    tool: self.name().to_string(),
                    reason: "arguments deve ser um objeto".to_string(),
                })
            }
        };

        for &field in self.required {
            if !object.get(field).is_some_and(Value::is_string) {
                return Err(DocSignError::MissingArgument { field });
            }
        }

        self.check_schema(object)?;
        (self.build)(object)
    }

    fn check_schema(&self, object: &Map<String, Value>) -> Result<()> {
        let invalid = |reason: String| DocSignError::InvalidArguments {
            tool: self.name().to_string(),
            reason,
        };

        let schema = self.compiled_schema().map_err(|e| invalid(e.to_string()))?;

        let instance = Value::Object(object.clone());
        let result = schema.validate(&instance);
        if let Err(errors) = result {
            let reason = errors
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(invalid(reason));
        }
        Ok(())
    }

    fn compiled_schema(&self) -> std::result::Result<&JSONSchema, &str> {
        self.schema
            .get_or_init(|| {
                JSONSchema::compile(&self.definition.input_schema).map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(DocSignError::MissingArgument { field })
}

fn document_id(object: &Map<String, Value>) -> Result<String> {
    string_field(object, "documentId")
}

pub(crate) fn get_documents(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::GetDocuments {
        status: object
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

pub(crate) fn get_document(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::GetDocument {
        document_id: document_id(object)?,
    })
}

pub(crate) fn analyze_document(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::AnalyzeDocument {
        document_id: document_id(object)?,
    })
}

pub(crate) fn generate_document_summary(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::GenerateDocumentSummary {
        document_id: document_id(object)?,
    })
}

pub(crate) fn suggest_document_improvements(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::SuggestDocumentImprovements {
        document_id: document_id(object)?,
    })
}

pub(crate) fn check_document_compliance(object: &Map<String, Value>) -> Result<ToolArgs> {
    let rules = match object.get("rules") {
        None => None,
        Some(value) => Some(serde_json::from_value::<Vec<String>>(value.clone()).map_err(
            |e| DocSignError::InvalidArguments {
                tool: "check_document_compliance".to_string(),
                reason: e.to_string(),
            },
        )?),
    };
    Ok(ToolArgs::CheckDocumentCompliance {
        document_id: document_id(object)?,
        rules,
    })
}

pub(crate) fn get_pending_signatures(_object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::GetPendingSignatures)
}

pub(crate) fn get_user_documents(object: &Map<String, Value>) -> Result<ToolArgs> {
    Ok(ToolArgs::GetUserDocuments {
        user_id: string_field(object, "userId")?,
    })
}
