pub mod blobs;
pub mod comments;
pub mod documents;
pub mod history;
pub mod search;
pub mod workspaces;

use serde_json::{json, Value};

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorResponse,
    ReadResourceParams, ToolCallParams, ToolResult,
};
use crate::{registry, resources};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, bridge: &Bridge) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            if let Some(params) = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v.clone()).ok())
            {
                let client = params.client_info.as_ref();
                tracing::info!(
                    client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    protocol_version = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "client initializing"
                );
            }
            let result = json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": "mcp-affine-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "tools": registry::list() }),
        )),

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req, "tools/call") {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };
            Some(handle_tool_call(req, params, bridge).await)
        }

        "resources/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "resources": resources::list(bridge) }),
        )),

        "resources/templates/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "resourceTemplates": resources::templates() }),
        )),

        "resources/read" => {
            let params: ReadResourceParams = match parse_params(req, "resources/read") {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };
            Some(handle_resource_read(req, params, bridge).await)
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    req: &JsonRpcRequest,
    method: &str,
) -> Result<T, JsonRpcResponse> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_params(format!("Invalid {method} params: {e}")),
            )
        }),
        None => Err(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_params(format!("Missing params for {method}")),
        )),
    }
}

/// Unknown tools become a JSON-RPC error; every other failure is reported
/// inside a tool result with `isError: true`.
async fn handle_tool_call(
    req: &JsonRpcRequest,
    params: ToolCallParams,
    bridge: &Bridge,
) -> JsonRpcResponse {
    let tool_result = match registry::invoke(&params.name, params.arguments, bridge).await {
        Ok(value) => ToolResult::json(&value),
        Err(err @ BridgeError::UnknownTool { .. }) => {
            tracing::warn!(tool = %params.name, "unknown tool requested");
            return JsonRpcResponse::error(req.id.clone(), McpErrorResponse::from(err).into());
        }
        Err(err) => {
            tracing::warn!(tool = %params.name, error = %err, "tool call failed");
            McpErrorResponse::from(err).into()
        }
    };

    match serde_json::to_value(&tool_result) {
        Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
        Err(e) => {
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::internal_error(e.to_string()))
        }
    }
}

async fn handle_resource_read(
    req: &JsonRpcRequest,
    params: ReadResourceParams,
    bridge: &Bridge,
) -> JsonRpcResponse {
    match resources::resolve(&params.uri, bridge).await {
        Ok(content) => {
            JsonRpcResponse::success(req.id.clone(), resource_contents(&params.uri, &content))
        }
        Err(err) => {
            tracing::warn!(uri = %params.uri, error = %err, "resource read failed");
            JsonRpcResponse::error(req.id.clone(), McpErrorResponse::from(err).into())
        }
    }
}

fn resource_contents(uri: &str, content: &Value) -> Value {
    json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": format!("{content:#}")
        }]
    })
}
