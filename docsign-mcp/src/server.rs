//! MCP Server protocol implementation
//!
//! Newline-delimited JSON-RPC 2.0 over any async reader/writer pair; the
//! binary wires it to stdin/stdout.

use std::sync::Arc;

use docsign_core::{
    DocSignError, DocumentStore, ProviderCache, ResourceContents, ResourceReader, ToolDispatcher,
    CATALOG_VERSION,
};
use serde_json::{json, Value};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::error::{McpError, McpResult};
use crate::protocol::{is_valid_id, JsonRpcRequest, JsonRpcResponse};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

/// Maximum bytes per JSON-RPC message (1 MiB)
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// DocSign MCP server
pub struct McpServer {
    dispatcher: Arc<ToolDispatcher>,
    resources: Arc<ResourceReader>,
}

impl McpServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>, resources: Arc<ResourceReader>) -> Self {
        Self {
            dispatcher,
            resources,
        }
    }

    /// Build a server over a store and provider cache
    pub fn from_store(store: Arc<dyn DocumentStore>, providers: Arc<ProviderCache>) -> Self {
        Self::new(
            Arc::new(ToolDispatcher::new(Arc::clone(&store), providers)),
            Arc::new(ResourceReader::new(store)),
        )
    }

    /// Run the MCP server over stdio
    pub async fn run_stdio(&self) -> McpResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve frames from `reader` until EOF, writing replies to `writer`
    ///
    /// At most `MAX_MESSAGE_BYTES + 1` bytes of a frame are buffered; the
    /// rest of an oversized frame is skipped up to its newline.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            let response = match read_frame(&mut reader, &mut raw).await? {
                Frame::Eof => break,
                Frame::TooLarge(bytes) => {
                    tracing::warn!(bytes, limit = MAX_MESSAGE_BYTES, "message too large");
                    Some(parse_error(format!(
                        "message of {bytes} bytes exceeds limit of {MAX_MESSAGE_BYTES}"
                    )))
                }
                Frame::Line => match std::str::from_utf8(&raw) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => self.handle_line(line.trim()).await,
                    Err(e) => Some(parse_error(e.to_string())),
                },
            };

            if let Some(response) = response {
                write_response(&mut writer, &response).await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame
    ///
    /// Invalid JSON is a parse error (-32700, null id). Valid JSON that is not
    /// a request is an invalid request (-32600) echoing any usable id.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "unparsable frame");
                return Some(parse_error(e.to_string()));
            }
        };

        let id = value
            .get("id")
            .filter(|id| is_valid_id(id))
            .cloned()
            .unwrap_or(Value::Null);

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                tracing::debug!(error = %e, "invalid request frame");
                let err = McpError::InvalidRequest(e.to_string());
                Some(JsonRpcResponse::error(id, err.to_json_rpc_error()))
            }
        }
    }

    /// Handle an MCP request; notifications yield `None`
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            let err = McpError::InvalidRequest(format!(
                "unsupported jsonrpc version {:?}",
                request.jsonrpc
            ));
            return request
                .id
                .map(|id| JsonRpcResponse::error(id, err.to_json_rpc_error()));
        }

        let outcome = self.dispatch(&request.method, request.params).await;

        let id = match request.id {
            Some(id) => id,
            None => {
                if let Err(e) = outcome {
                    tracing::debug!(method = %request.method, error = %e, "notification failed");
                }
                return None;
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, e.to_json_rpc_error()),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> McpResult<Value> {
        match method {
            "initialize" => Ok(self.handle_initialize()),
            "notifications/initialized" | "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.dispatcher.list_tools() })),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(json!({ "resources": self.resources.list_resources() })),
            "resources/read" => self.handle_resources_read(params).await,
            _ => Err(McpError::MethodNotFound(method.to_string())),
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "catalogVersion": CATALOG_VERSION
            },
            "capabilities": {
                "tools": {},
                "resources": {}
            }
        })
    }

    /// `tools/call`: the dispatcher reports a missing name as an unknown tool
    async fn handle_tools_call(&self, params: Value) -> McpResult<Value> {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self.dispatcher.call_tool(name, &arguments).await;
        Ok(serde_json::to_value(result)?)
    }

    /// `resources/read`: unknown URIs read as an empty content list
    async fn handle_resources_read(&self, params: Value) -> McpResult<Value> {
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::InvalidParams("uri é obrigatório".to_string()))?;

        let contents = match self.resources.read_resource(uri).await {
            Ok(contents) => contents,
            Err(DocSignError::ResourceNotFound { .. }) => ResourceContents::empty(),
            Err(e) => {
                tracing::error!(uri, error = %e, "resource read failed");
                return Err(e.into());
            }
        };
        Ok(serde_json::to_value(contents)?)
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("dispatcher", &self.dispatcher)
            .field("resources", &self.resources)
            .finish()
    }
}

fn parse_error(detail: String) -> JsonRpcResponse {
    JsonRpcResponse::error(Value::Null, McpError::Parse(detail).to_json_rpc_error())
}

/// Result of reading one newline-delimited frame
enum Frame {
    /// A complete frame is in the buffer
    Line,
    /// Frame exceeded the limit; carries its size in bytes
    TooLarge(usize),
    Eof,
}

async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> McpResult<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = MAX_MESSAGE_BYTES as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }
    if n > MAX_MESSAGE_BYTES {
        let rest = if buf.last() == Some(&b'\n') {
            0
        } else {
            skip_line(reader).await?
        };
        buf.clear();
        return Ok(Frame::TooLarge(n + rest));
    }
    Ok(Frame::Line)
}

/// Consume input through the next newline without buffering it
async fn skip_line<R>(reader: &mut R) -> McpResult<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut skipped = 0;
    loop {
        let (used, done) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(used);
        skipped += used;
        if done {
            return Ok(skipped);
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(response)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
