//! Error types for the DocSign MCP server
//!
//! Tool failures never show up here: they travel inside the tool result
//! envelope. These are protocol-level failures answered with a JSON-RPC
//! `error` object.

use thiserror::Error;

use crate::protocol::JsonRpcError;

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can occur in the MCP server
#[derive(Error, Debug)]
pub enum McpError {
    /// Frame is not valid JSON, not UTF-8, or too large
    #[error("Parse error: {0}")]
    Parse(String),

    /// Frame is JSON but not a valid request
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    /// Unknown JSON-RPC method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Params missing or of the wrong shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error on the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// Get error code for the JSON-RPC protocol
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::Parse(_) => -32700,
            McpError::InvalidRequest(_) => -32600,
            McpError::MethodNotFound(_) => -32601,
            McpError::InvalidParams(_) => -32602,
            McpError::Internal(_) | McpError::Io(_) | McpError::Serialization(_) => -32603,
        }
    }

    /// Convert to the JSON-RPC error object
    pub fn to_json_rpc_error(&self) -> JsonRpcError {
        JsonRpcError {
            code: self.error_code(),
            message: self.to_string(),
            data: None,
        }
    }
}

impl From<docsign_core::DocSignError> for McpError {
    fn from(err: docsign_core::DocSignError) -> Self {
        McpError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(McpError::Parse("x".into()).error_code(), -32700);
        assert_eq!(McpError::InvalidRequest("x".into()).error_code(), -32600);
        assert_eq!(McpError::MethodNotFound("x".into()).error_code(), -32601);
        assert_eq!(McpError::InvalidParams("x".into()).error_code(), -32602);
        assert_eq!(McpError::Internal("x".into()).error_code(), -32603);
    }

    #[test]
    fn test_json_rpc_error() {
        let err = McpError::MethodNotFound("prompts/list".into()).to_json_rpc_error();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found: prompts/list");
        assert!(err.data.is_none());
    }
}
