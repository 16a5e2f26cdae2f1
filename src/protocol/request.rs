use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::DocMode;

/// JSON-RPC 2.0 ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<Value>,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<Value>,
}

/// Parameters for `resources/read`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

// ---------------------------------------------------------------------------
// Tool arguments
// ---------------------------------------------------------------------------

/// Arguments for tools scoped to one workspace and nothing else.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceParams {
    pub workspace_id: Option<String>,
}

/// Arguments for `search_documents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    pub workspace_id: Option<String>,
    pub limit: Option<u32>,
}

/// Arguments for `list_documents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsParams {
    pub workspace_id: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

/// Arguments for tools addressing a single document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParams {
    pub doc_id: String,
    pub workspace_id: Option<String>,
}

/// Arguments for `publish_document`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishParams {
    pub doc_id: String,
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub mode: DocMode,
}

/// Arguments for `list_comments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsParams {
    pub doc_id: String,
    pub workspace_id: Option<String>,
    pub limit: Option<u32>,
}

/// Arguments for `create_comment`. `content` is forwarded untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentParams {
    pub doc_id: String,
    pub content: Value,
    pub workspace_id: Option<String>,
    pub doc_title: Option<String>,
    #[serde(default)]
    pub doc_mode: DocMode,
}

/// Arguments for `update_comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentParams {
    pub comment_id: String,
    pub content: Value,
}

/// Arguments for `resolve_comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCommentParams {
    pub comment_id: String,
    pub resolved: bool,
}

/// Arguments for `delete_comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentParams {
    pub comment_id: String,
}

/// Arguments for `list_history`. `before` is an exclusive timestamp cursor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListHistoryParams {
    pub doc_id: String,
    pub workspace_id: Option<String>,
    pub limit: Option<u32>,
    pub before: Option<String>,
}

/// Arguments for `delete_blob`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBlobParams {
    pub key: String,
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub permanently: bool,
}
