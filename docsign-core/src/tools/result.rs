//! Result envelope shared by every tool call and transport

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocSignError, ErrorCategory};

/// A single content block inside a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Tool call response
///
/// ```json
/// { "content": [{ "type": "text", "text": "{ ... }" }], "isError": false }
/// ```
///
/// `text` is always serialized JSON, for errors too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
    /// Category of the failure; drives the HTTP status, never serialized
    #[serde(skip)]
    pub error_category: Option<ErrorCategory>,
}

impl ToolResult {
    /// Successful result carrying a pretty-printed JSON payload
    pub fn from_payload<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(text) => Self {
                content: vec![ToolContent::text(text)],
                is_error: false,
                error_category: None,
            },
            Err(e) => Self::from_error(&DocSignError::from(e)),
        }
    }

    /// Error result carrying `{"error": ..., "code": ...}`
    pub fn from_error(err: &DocSignError) -> Self {
        let response = err.to_error_response();
        let text = serde_json::to_string_pretty(&response)
            .unwrap_or_else(|_| format!("{{\"error\":{:?}}}", response.error));
        Self {
            content: vec![ToolContent::text(text)],
            is_error: true,
            error_category: Some(err.category()),
        }
    }

    /// HTTP status for this result
    pub fn http_status_code(&self) -> u16 {
        match self.error_category {
            Some(category) => category.http_status_code(),
            None if self.is_error => 500,
            None => 200,
        }
    }

    /// Parse the first content block back into JSON
    pub fn payload(&self) -> Option<Value> {
        self.content
            .first()
            .and_then(|c| serde_json::from_str(&c.text).ok())
    }

    /// Message of an error result, if any
    pub fn error_message(&self) -> Option<String> {
        if !self.is_error {
            return None;
        }
        self.payload()
            .and_then(|p| p.get("error").and_then(Value::as_str).map(str::to_string))
    }
}
