use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::bridge::Bridge;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
pub struct McpServer {
    bridge: Bridge,
    initialized: bool,
}

impl McpServer {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`.
    pub async fn serve<R, W>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                tracing::warn!(bytes = n, limit = MAX_MESSAGE_BYTES, "message too large");
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                ).await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                    ).await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "parse error");
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                    ).await?;
                    continue;
                }
            };

            // Validate jsonrpc version
            if req.jsonrpc != "2.0" {
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
                ).await?;
                continue;
            }

            // Initialization gate: only `initialize` is allowed before handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request_with("Server not initialized"),
                    ),
                ).await?;
                continue;
            }

            if let Some(resp) = handlers::dispatch(&req, &self.bridge).await {
                write_response(&mut writer, &resp).await?;
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }
}

async fn write_response<W>(
    writer: &mut W,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
