//! Error types for DocSign operations
//!
//! Every failure the dispatch layer can report is a variant of [`DocSignError`].
//! Each variant carries:
//! - A human-readable message (surfaced to callers inside the error envelope)
//! - A stable error code for programmatic handling
//! - A category used to pick the HTTP status on the HTTP binding
//!
//! # Example
//!
//! ```rust
//! use docsign_core::error::{DocSignError, ErrorCategory};
//!
//! let err = DocSignError::DocumentNotFound { document_id: "doc-9".to_string() };
//! assert_eq!(err.category(), ErrorCategory::NotFound);
//! assert_eq!(err.http_status_code(), 404);
//! assert_eq!(err.to_string(), "Documento não encontrado");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for DocSign operations
pub type Result<T> = std::result::Result<T, DocSignError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed request (400)
    Validation,
    /// Entity not found (404)
    NotFound,
    /// State conflict (409)
    Conflict,
    /// Downstream collaborator failed (500)
    External,
    /// Internal failure (500)
    Internal,
}

impl ErrorCategory {
    /// HTTP status used by the HTTP binding for this category
    pub fn http_status_code(self) -> u16 {
        match self {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::External | ErrorCategory::Internal => 500,
        }
    }
}

/// Errors that can occur while dispatching tools and reading resources
#[derive(Error, Debug)]
pub enum DocSignError {
    // ═══════════════════════════════════════════════════════════════════════
    // Request validation
    // ═══════════════════════════════════════════════════════════════════════

    /// `name` missing or empty on the HTTP `/call` body
    #[error("Nome da ferramenta é obrigatório")]
    ToolNameRequired,

    /// HTTP `/call` body is not parsable JSON
    #[error("Corpo da requisição inválido: {reason}")]
    InvalidRequestBody { reason: String },

    /// Tool name is not in the catalog
    #[error("Ferramenta desconhecida: {name}")]
    UnknownTool { name: String },

    /// A required argument is missing or is not a string
    #[error("{field} é obrigatório")]
    MissingArgument { field: &'static str },

    /// Arguments don't match the tool's input schema
    #[error("Argumentos inválidos para {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Resource URI could not be decoded
    #[error("URI de recurso inválida: {reason}")]
    InvalidResourceUri { reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Not found
    // ═══════════════════════════════════════════════════════════════════════

    /// No document with the requested id
    #[error("Documento não encontrado")]
    DocumentNotFound { document_id: String },

    /// The user has no signature slot on the document
    #[error("Assinatura não encontrada para o usuário {user_id}")]
    SignatureNotFound { document_id: String, user_id: String },

    /// No resource with the requested URI
    #[error("Recurso não encontrado: {uri}")]
    ResourceNotFound { uri: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Conflicts
    // ═══════════════════════════════════════════════════════════════════════

    /// Signature was already signed or rejected
    #[error("Assinatura já registrada para o usuário {user_id}")]
    SignatureAlreadyDecided { document_id: String, user_id: String },

    /// Document id already present in the store
    #[error("Documento já existe: {document_id}")]
    DocumentAlreadyExists { document_id: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Downstream failures
    // ═══════════════════════════════════════════════════════════════════════

    /// Analysis provider rejected the call; message is surfaced verbatim
    #[error("{message}")]
    Provider { message: String },

    /// Analysis provider did not answer within the configured bound
    #[error("Tempo limite de {timeout_ms}ms excedido na análise")]
    ProviderTimeout { timeout_ms: u64 },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error: {message}")]
    IoError { message: String },

    /// A shared lock is poisoned (panic occurred while holding it)
    #[error("Internal state lock poisoned")]
    StateLocked,
}

impl DocSignError {
    /// Shorthand for a provider failure
    pub fn provider(message: impl Into<String>) -> Self {
        DocSignError::Provider {
            message: message.into(),
        }
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocSignError::ToolNameRequired
            | DocSignError::InvalidRequestBody { .. }
            | DocSignError::UnknownTool { .. }
            | DocSignError::MissingArgument { .. }
            | DocSignError::InvalidArguments { .. }
            | DocSignError::InvalidResourceUri { .. } => ErrorCategory::Validation,

            DocSignError::DocumentNotFound { .. }
            | DocSignError::SignatureNotFound { .. }
            | DocSignError::ResourceNotFound { .. } => ErrorCategory::NotFound,

            DocSignError::SignatureAlreadyDecided { .. }
            | DocSignError::DocumentAlreadyExists { .. } => ErrorCategory::Conflict,

            DocSignError::Provider { .. }
            | DocSignError::ProviderTimeout { .. }
            | DocSignError::IoError { .. } => ErrorCategory::External,

            DocSignError::JsonError(_) | DocSignError::StateLocked => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DocSignError::ToolNameRequired => "TOOL_NAME_REQUIRED",
            DocSignError::InvalidRequestBody { .. } => "INVALID_REQUEST_BODY",
            DocSignError::UnknownTool { .. } => "UNKNOWN_TOOL",
            DocSignError::MissingArgument { .. } => "MISSING_ARGUMENT",
            DocSignError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            DocSignError::InvalidResourceUri { .. } => "INVALID_RESOURCE_URI",
            DocSignError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            DocSignError::SignatureNotFound { .. } => "SIGNATURE_NOT_FOUND",
            DocSignError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            DocSignError::SignatureAlreadyDecided { .. } => "SIGNATURE_ALREADY_DECIDED",
            DocSignError::DocumentAlreadyExists { .. } => "DOCUMENT_ALREADY_EXISTS",
            DocSignError::Provider { .. } => "PROVIDER_ERROR",
            DocSignError::ProviderTimeout { .. } => "PROVIDER_TIMEOUT",
            DocSignError::JsonError(_) => "JSON_ERROR",
            DocSignError::IoError { .. } => "IO_ERROR",
            DocSignError::StateLocked => "STATE_LOCKED",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        self.category().http_status_code()
    }

    /// Converts this error to the JSON payload carried in an error envelope
    ///
    /// ```json
    /// { "error": "Documento não encontrado", "code": "DOCUMENT_NOT_FOUND" }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        }
    }
}

/// JSON payload of an error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable error code (e.g., "DOCUMENT_NOT_FOUND")
    pub code: String,
}

impl From<std::io::Error> for DocSignError {
    fn from(err: std::io::Error) -> Self {
        DocSignError::IoError {
            message: err.to_string(),
        }
    }
}
